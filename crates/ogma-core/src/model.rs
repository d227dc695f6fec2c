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

//! In-process representatives of remote graph entities.

use crate::value::Value;
use std::collections::BTreeMap;

/// A property map, keyed deterministically.
pub type Properties = BTreeMap<String, Value>;

/// A node decoded from a result row.
///
/// The durable identifier is assigned by the store and immutable once set;
/// labels keep insertion order with set semantics. A node representative is
/// created fresh on every decode and then either returned as-is or merged
/// into the identity cache of the current unit of work.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeModel {
    id: i64,
    labels: Vec<String>,
    /// The node's property map.
    pub properties: BTreeMap<String, Value>,
}

impl NodeModel {
    /// Create a node representative. Duplicate labels collapse, keeping the
    /// first occurrence's position.
    pub fn new(
        id: i64,
        labels: impl IntoIterator<Item = String>,
        properties: BTreeMap<String, Value>,
    ) -> Self {
        let mut node = Self {
            id,
            labels: Vec::new(),
            properties,
        };
        for label in labels {
            node.add_label(label);
        }
        node
    }

    /// The store-assigned identifier.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The node's labels, in first-seen order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Whether the node carries the given label.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Add a label; returns `false` if it was already present.
    pub fn add_label(&mut self, label: String) -> bool {
        if self.has_label(&label) {
            return false;
        }
        self.labels.push(label);
        true
    }

    /// Remove a label; returns `false` if it was absent.
    pub fn remove_label(&mut self, label: &str) -> bool {
        let before = self.labels.len();
        self.labels.retain(|l| l != label);
        self.labels.len() != before
    }

    /// Replace label set and properties in place, e.g. after re-fetching
    /// the node. The identifier never changes.
    pub fn refresh_from(&mut self, other: NodeModel) {
        debug_assert_eq!(self.id, other.id);
        self.labels = other.labels;
        self.properties = other.properties;
    }

    /// Get a property value.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Set a property value.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Builder-style property insertion, for tests and fixtures.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(key, value);
        self
    }
}

/// A relationship decoded from a result row.
///
/// Endpoints are referenced by identifier, never by ownership. Unlike nodes,
/// relationship representatives are not deduplicated; every fetch yields a
/// fresh value.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipModel {
    id: i64,
    rel_type: String,
    start: i64,
    end: i64,
    /// The relationship's property map.
    pub properties: BTreeMap<String, Value>,
}

impl RelationshipModel {
    /// Create a relationship representative.
    pub fn new(
        id: i64,
        rel_type: impl Into<String>,
        properties: BTreeMap<String, Value>,
        start: i64,
        end: i64,
    ) -> Self {
        Self {
            id,
            rel_type: rel_type.into(),
            start,
            end,
            properties,
        }
    }

    /// The store-assigned identifier.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The single relationship type.
    pub fn rel_type(&self) -> &str {
        &self.rel_type
    }

    /// Identifier of the start node.
    pub fn start_id(&self) -> i64 {
        self.start
    }

    /// Identifier of the end node.
    pub fn end_id(&self) -> i64 {
        self.end
    }

    /// Get a property value.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
