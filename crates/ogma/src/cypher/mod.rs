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

//! Cypher statement construction: identifier escaping, statement values,
//! and the per-operation builders.

pub mod build;
pub mod escape;
pub mod statement;

pub use build::{Direction, LabelMode};
pub use escape::{escape_identifier, escape_label, escape_relationship_type, is_valid_identifier};
pub use statement::{EntityKind, Params, Statement, RETURN_NODE, RETURN_RELATIONSHIP};
