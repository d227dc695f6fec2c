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

//! Capability tables describing how property values reach a target type.
//!
//! A descriptor is built once per entity type and registers, per property
//! key, a writer and optionally a reader. Plain function pointers keep the
//! table `'static` and copy-cheap; a missing construct function surfaces
//! as an instantiation error at mapping time, not at registration.

use std::collections::BTreeMap;

use ogma_core::Value;

use crate::error::{OgmaError, Result};

/// Whether a field holds one value or a collection of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single value; writes overwrite.
    Scalar,
    /// A list of values; writes may merge with the current contents.
    Collection,
}

/// Writer plus optional reader for one field of `T`.
pub struct FieldAccessor<T> {
    /// What write semantics the field gets.
    pub kind: FieldKind,
    /// Store a decoded value into the field.
    pub write: fn(&mut T, Value),
    /// Read the field's current value, when the type exposes one.
    /// Collection merge needs a reader; without one, writes overwrite.
    pub read: Option<fn(&T) -> Value>,
}

// Manual impls because fn pointers don't need T: Clone/Debug bounds.
impl<T> Clone for FieldAccessor<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            write: self.write,
            read: self.read,
        }
    }
}

impl<T> std::fmt::Debug for FieldAccessor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("kind", &self.kind)
            .field("has_reader", &self.read.is_some())
            .finish()
    }
}

/// Mapping capabilities for one entity type.
#[derive(Debug, Clone)]
pub struct EntityDescriptor<T> {
    type_name: &'static str,
    construct: Option<fn() -> T>,
    fields: BTreeMap<&'static str, FieldAccessor<T>>,
}

impl<T> EntityDescriptor<T> {
    /// Start a descriptor for `type_name` with no construct function.
    ///
    /// Such a descriptor can map onto existing instances but cannot create
    /// fresh ones.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            construct: None,
            fields: BTreeMap::new(),
        }
    }

    /// Register a construct function for creating fresh instances.
    pub fn constructed_by(mut self, construct: fn() -> T) -> Self {
        self.construct = Some(construct);
        self
    }

    /// Register a scalar field.
    pub fn scalar(mut self, key: &'static str, write: fn(&mut T, Value)) -> Self {
        self.fields.insert(
            key,
            FieldAccessor {
                kind: FieldKind::Scalar,
                write,
                read: None,
            },
        );
        self
    }

    /// Register a collection field with both a writer and a reader.
    pub fn collection(
        mut self,
        key: &'static str,
        write: fn(&mut T, Value),
        read: fn(&T) -> Value,
    ) -> Self {
        self.fields.insert(
            key,
            FieldAccessor {
                kind: FieldKind::Collection,
                write,
                read: Some(read),
            },
        );
        self
    }

    /// The registered name of the target type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Look up the accessor for a property key.
    pub fn accessor(&self, key: &str) -> Option<&FieldAccessor<T>> {
        self.fields.get(key)
    }

    /// Registered property keys, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// Construct a fresh instance of the target type.
    pub fn new_instance(&self) -> Result<T> {
        match self.construct {
            Some(construct) => Ok(construct()),
            None => Err(OgmaError::Instantiation(self.type_name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Debug, PartialEq)]
    struct Person {
        name: String,
        tags: Vec<String>,
    }

    fn descriptor() -> EntityDescriptor<Person> {
        EntityDescriptor::new("Person")
            .constructed_by(Person::default)
            .scalar("name", |p, v| {
                if let Some(s) = v.as_str() {
                    p.name = s.to_string();
                }
            })
            .collection(
                "tags",
                |p, v| {
                    if let Some(items) = v.as_list() {
                        p.tags = items
                            .iter()
                            .filter_map(|i| i.as_str().map(str::to_string))
                            .collect();
                    }
                },
                |p| Value::from(p.tags.clone()),
            )
    }

    #[test]
    fn test_accessor_lookup() {
        let desc = descriptor();
        assert_eq!(desc.accessor("name").unwrap().kind, FieldKind::Scalar);
        assert_eq!(desc.accessor("tags").unwrap().kind, FieldKind::Collection);
        assert!(desc.accessor("missing").is_none());
    }

    #[test]
    fn test_new_instance() {
        let person = descriptor().new_instance().unwrap();
        assert_eq!(person, Person::default());
    }

    #[test]
    fn test_missing_construct_is_instantiation_error() {
        let desc: EntityDescriptor<Person> = EntityDescriptor::new("Person");
        let err = desc.new_instance().unwrap_err();
        assert!(matches!(err, OgmaError::Instantiation(name) if name == "Person"));
    }

    #[test]
    fn test_writer_mutates_target() {
        let desc = descriptor();
        let mut person = Person::default();
        (desc.accessor("name").unwrap().write)(&mut person, Value::from("Trinity"));
        assert_eq!(person.name, "Trinity");
    }

    #[test]
    fn test_collection_reader_reports_current_value() {
        let desc = descriptor();
        let person = Person {
            name: String::new(),
            tags: vec!["a".to_string()],
        };
        let read = desc.accessor("tags").unwrap().read.unwrap();
        assert_eq!(read(&person), Value::from(vec!["a"]));
    }
}
