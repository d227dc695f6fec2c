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

//! Tabular results of executed statements.

use crate::value::Value;

/// A fixed-arity ordered sequence of values.
///
/// Positional meaning is determined by the originating statement's return
/// projection; the decoder depends on that column order being exact.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Row(Vec<Value>);

impl Row {
    /// Create a row from positional values.
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Value at the given position.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The positional values as a slice.
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Consume the row, yielding its values.
    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

/// The complete result of one executed statement: parallel column names and
/// the ordered rows.
///
/// The underlying row source is consumed by the transport layer, so a
/// `RowSet` is handed over materialized; entity decoding on top of it stays
/// lazy and single-pass.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowSet {
    /// Column names, parallel to each row's positions.
    pub columns: Vec<String>,
    /// The result rows, in statement order.
    pub rows: Vec<Row>,
}

impl RowSet {
    /// Create a result set.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Whether the statement returned no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows returned.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// The first row, if any. Single-entity projections use exactly this.
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Consume the set, yielding its rows and dropping column names.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}
