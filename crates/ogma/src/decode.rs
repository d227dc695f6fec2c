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

//! Decoding result rows into entity representatives.
//!
//! Every entity-returning statement uses one of two fixed projections
//! ([`RETURN_NODE`](crate::cypher::RETURN_NODE) and
//! [`RETURN_RELATIONSHIP`](crate::cypher::RETURN_RELATIONSHIP)), so rows
//! are decoded positionally. A row that does not match its projection is a
//! decode error naming both the promised and the observed shape.

use ogma_core::{NodeModel, Properties, RelationshipModel, Row, Value};

use crate::error::{OgmaError, Result};

const NODE_SHAPE: &str = "node row (id, labels, data)";
const RELATIONSHIP_SHAPE: &str = "relationship row (id, type, data, start, end)";

/// Decode a row produced by the node projection.
pub fn node_from_row(row: &Row) -> Result<NodeModel> {
    if row.len() != 3 {
        return Err(shape_error(NODE_SHAPE, format!("{} columns", row.len())));
    }
    let id = entity_id(row.get(0), NODE_SHAPE)?;
    let labels = string_list(row.get(1), NODE_SHAPE)?;
    let properties = property_map(row.get(2), NODE_SHAPE)?;
    Ok(NodeModel::new(id, labels, properties))
}

/// Decode a row produced by the relationship projection.
pub fn relationship_from_row(row: &Row) -> Result<RelationshipModel> {
    if row.len() != 5 {
        return Err(shape_error(
            RELATIONSHIP_SHAPE,
            format!("{} columns", row.len()),
        ));
    }
    let id = entity_id(row.get(0), RELATIONSHIP_SHAPE)?;
    let rel_type = row
        .get(1)
        .and_then(Value::as_str)
        .ok_or_else(|| column_error(RELATIONSHIP_SHAPE, "type", row.get(1)))?
        .to_string();
    let properties = property_map(row.get(2), RELATIONSHIP_SHAPE)?;
    let start = entity_id(row.get(3), RELATIONSHIP_SHAPE)?;
    let end = entity_id(row.get(4), RELATIONSHIP_SHAPE)?;
    Ok(RelationshipModel::new(id, rel_type, properties, start, end))
}

fn entity_id(value: Option<&Value>, expected: &str) -> Result<i64> {
    value
        .and_then(Value::as_entity_id)
        .ok_or_else(|| column_error(expected, "id", value))
}

fn string_list(value: Option<&Value>, expected: &str) -> Result<Vec<String>> {
    let items = value
        .and_then(Value::as_list)
        .ok_or_else(|| column_error(expected, "labels", value))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| column_error(expected, "labels", Some(item)))
        })
        .collect()
}

fn property_map(value: Option<&Value>, expected: &str) -> Result<Properties> {
    value
        .and_then(Value::as_map)
        .cloned()
        .ok_or_else(|| column_error(expected, "data", value))
}

fn shape_error(expected: &str, actual: String) -> OgmaError {
    OgmaError::Decode {
        expected: expected.to_string(),
        actual,
    }
}

fn column_error(expected: &str, column: &str, value: Option<&Value>) -> OgmaError {
    let kind = value.map_or("missing", Value::kind);
    shape_error(expected, format!("{} of kind {}", column, kind))
}
