// Dweve Ogma - Object Graph Mapping for Cypher Stores
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Mapping decoded graph data onto typed entities.
//!
//! An [`EntityDescriptor`] registers per-key writers (and readers for
//! collections); the mapper walks a node's property map or a raw result
//! row and funnels each value through the matching writer. Keys without a
//! registered field are skipped with a warning unless
//! [`MapperConfig::deny_unknown_properties`] is set.

pub mod descriptor;
pub mod merge;

pub use descriptor::{EntityDescriptor, FieldAccessor, FieldKind};
pub use merge::merge_collection;

use ogma_core::{NodeModel, Row, Value};
use tracing::warn;

use crate::config::MapperConfig;
use crate::error::{OgmaError, Result};

/// Maps graph data onto instances of registered entity types.
#[derive(Debug, Clone, Default)]
pub struct EntityMapper {
    config: MapperConfig,
}

impl EntityMapper {
    /// Create a mapper with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper with the given configuration.
    pub fn with_config(config: MapperConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Construct a fresh `T` and populate it from a node's properties.
    pub fn map_node<T>(&self, descriptor: &EntityDescriptor<T>, node: &NodeModel) -> Result<T> {
        let mut target = descriptor.new_instance()?;
        self.populate(descriptor, &mut target, node.properties.iter())?;
        Ok(target)
    }

    /// Map each node in order, stopping at the first failure.
    pub fn map_nodes<'a, T>(
        &self,
        descriptor: &EntityDescriptor<T>,
        nodes: impl IntoIterator<Item = &'a NodeModel>,
    ) -> Result<Vec<T>> {
        nodes
            .into_iter()
            .map(|node| self.map_node(descriptor, node))
            .collect()
    }

    /// Populate an existing instance from a node's properties.
    ///
    /// Scalar writes overwrite; collection writes merge with the field's
    /// current contents when the configuration asks for it.
    pub fn map_onto<T>(
        &self,
        descriptor: &EntityDescriptor<T>,
        target: &mut T,
        node: &NodeModel,
    ) -> Result<()> {
        self.populate(descriptor, target, node.properties.iter())
    }

    /// Construct a fresh `T` from a raw result row, treating each column
    /// as a property key.
    ///
    /// The column list and the row must agree in length.
    pub fn map_row<T>(
        &self,
        descriptor: &EntityDescriptor<T>,
        columns: &[String],
        row: &Row,
    ) -> Result<T> {
        if columns.len() != row.len() {
            return Err(OgmaError::Decode {
                expected: format!("{} columns", columns.len()),
                actual: format!("{} values", row.len()),
            });
        }
        let mut target = descriptor.new_instance()?;
        self.populate(
            descriptor,
            &mut target,
            columns.iter().zip(row.values()),
        )?;
        Ok(target)
    }

    /// Map each row in order, stopping at the first failure.
    pub fn map_rows<'a, T>(
        &self,
        descriptor: &EntityDescriptor<T>,
        columns: &[String],
        rows: impl IntoIterator<Item = &'a Row>,
    ) -> Result<Vec<T>> {
        rows.into_iter()
            .map(|row| self.map_row(descriptor, columns, row))
            .collect()
    }

    fn populate<'a, T>(
        &self,
        descriptor: &EntityDescriptor<T>,
        target: &mut T,
        entries: impl Iterator<Item = (&'a String, &'a Value)>,
    ) -> Result<()> {
        for (key, value) in entries {
            self.write_property(descriptor, target, key, value)?;
        }
        Ok(())
    }

    fn write_property<T>(
        &self,
        descriptor: &EntityDescriptor<T>,
        target: &mut T,
        key: &str,
        value: &Value,
    ) -> Result<()> {
        let accessor = match descriptor.accessor(key) {
            Some(accessor) => accessor,
            None if self.config.deny_unknown_properties => {
                return Err(OgmaError::InvalidArgument(format!(
                    "no field registered for property '{}' on {}",
                    key,
                    descriptor.type_name()
                )));
            }
            None => {
                warn!(
                    property = key,
                    entity = descriptor.type_name(),
                    "skipping property with no registered field"
                );
                return Ok(());
            }
        };

        let value = match (accessor.kind, accessor.read, value) {
            (FieldKind::Collection, Some(read), Value::List(incoming))
                if self.config.merge_collections =>
            {
                let existing = read(target);
                let existing = existing.as_list().unwrap_or_default();
                Value::List(merge_collection(incoming, existing))
            }
            _ => value.clone(),
        };
        (accessor.write)(target, value);
        Ok(())
    }
}
