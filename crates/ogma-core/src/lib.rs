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

//! Core data model shared by the Ogma object-graph mapping crates.
//!
//! This crate defines the in-process values exchanged with a remote graph
//! store, independent of any query language or transport:
//!
//! - [`Value`]: a property or statement-parameter value (scalar, list, map).
//! - [`NodeModel`] / [`RelationshipModel`]: representatives of remote graph
//!   entities, decoded from result rows.
//! - [`Row`] / [`RowSet`]: the tabular shape one executed statement returns.
//!
//! The crate is intentionally free of I/O and query construction; those live
//! in the `ogma` crate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod model;
pub mod row;
pub mod value;

pub use model::{NodeModel, Properties, RelationshipModel};
pub use row::{Row, RowSet};
pub use value::Value;
