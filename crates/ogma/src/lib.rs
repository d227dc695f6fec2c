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

//! Object graph mapping over Cypher-speaking graph stores.
//!
//! This crate translates graph operations into parameterized Cypher
//! statements, runs them through a pluggable transport, and decodes the
//! results back into entity representatives with per-unit-of-work node
//! identity.
//!
//! # Translation Strategy
//!
//! | Graph operation | Cypher shape |
//! |-----------------|--------------|
//! | Fetch node by id | `MATCH (n) WHERE id(n) = $id` + node projection |
//! | Create node | `CREATE (n:Label $props)` + node projection |
//! | Merge node | `MERGE (n:Label {key: $value}) ON CREATE SET n = $props` |
//! | Create relationship | match both endpoints, `CREATE (n)-[r:TYPE]->(m)` |
//! | Degree | `MATCH (n)-[r]-() ... RETURN count(*)` |
//! | Index lookup | `START n=node:index(key = $query)` |
//!
//! Identifiers (labels, relationship types, property keys, index names)
//! cannot travel as bound parameters, so they are escaped into the
//! statement text; every data value travels as a parameter.
//!
//! # Example
//!
//! ```rust
//! use ogma::cypher::build;
//! use ogma::{EntityDescriptor, EntityMapper};
//! use ogma_core::{NodeModel, Properties, Value};
//!
//! // Compile a fetch without touching any store.
//! let statement = build::get_node(42);
//! assert!(statement.text.starts_with("MATCH (n)"));
//!
//! // Map a decoded node onto a typed entity.
//! #[derive(Default)]
//! struct Person {
//!     name: String,
//! }
//!
//! let descriptor = EntityDescriptor::new("Person")
//!     .constructed_by(Person::default)
//!     .scalar("name", |p: &mut Person, v| {
//!         if let Some(s) = v.as_str() {
//!             p.name = s.to_string();
//!         }
//!     });
//!
//! let node = NodeModel::new(42, vec!["Person".to_string()], Properties::new())
//!     .with_property("name", Value::from("Neo"));
//! let person = EntityMapper::new().map_node(&descriptor, &node).unwrap();
//! assert_eq!(person.name, "Neo");
//! ```
//!
//! # Units of Work
//!
//! A [`Session`] bundles a transport, a transaction context, and a node
//! identity cache. Within one session, fetching the same node id twice
//! yields the same shared handle ([`Rc::ptr_eq`](std::rc::Rc::ptr_eq)
//! holds), and mutations through one handle are visible through the
//! other. Sessions are thread-confined.

#![deny(missing_docs)]

pub mod cache;
pub mod config;
pub mod cypher;
pub mod decode;
pub mod error;
pub mod mapper;
pub mod result;
pub mod session;
pub mod transaction;
pub mod transport;

pub use cache::{IdentityCache, NodeRef};
pub use config::{MapperConfig, MapperConfigBuilder};
pub use cypher::{Direction, EntityKind, LabelMode, Params, Statement};
pub use decode::{node_from_row, relationship_from_row};
pub use error::{OgmaError, Result};
pub use mapper::{merge_collection, EntityDescriptor, EntityMapper, FieldAccessor, FieldKind};
pub use result::{IndexHits, NodeRows, RelationshipRows};
pub use session::Session;
pub use transaction::{TransactionContext, TxState};
pub use transport::{CypherTransport, StatementsPayload, TransportError, TxToken, WireFailure};
