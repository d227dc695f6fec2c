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

//! Parameterized statements and the fixed return projections.

use ogma_core::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Bound statement parameters. `BTreeMap` keys make the wire serialization
/// deterministic.
pub type Params = BTreeMap<String, Value>;

/// The fixed node projection. The decoder depends on this exact column
/// order: `(id, labels, data)`.
pub const RETURN_NODE: &str = " RETURN id(n) AS id, labels(n) AS labels, n AS data";

/// The fixed relationship projection: `(id, type, data, start, end)`.
pub const RETURN_RELATIONSHIP: &str =
    " RETURN id(r) AS id, type(r) AS type, r AS data, id(startNode(r)) AS start, id(endNode(r)) AS end";

/// Which kind of graph entity an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// A labeled node.
    Node,
    /// A typed relationship.
    Relationship,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Node => f.write_str("node"),
            EntityKind::Relationship => f.write_str("relationship"),
        }
    }
}

/// A single parameterized Cypher statement.
///
/// Only values are bound as parameters; identifiers are interpolated into
/// `text` by the builders after passing through the escaping boundary.
/// Serializes to the transactional wire shape
/// `{"statement": …, "parameters": …}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// The statement text.
    #[serde(rename = "statement")]
    pub text: String,
    /// Bound parameter values.
    pub parameters: Params,
}

impl Statement {
    /// Create a statement with no parameters.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parameters: Params::new(),
        }
    }

    /// Bind one parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Bind several parameters.
    pub fn with_params(mut self, params: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.parameters.extend(params);
        self
    }

    /// Whether any parameters are bound.
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_basic() {
        let stmt = Statement::new("MATCH (n) RETURN n");
        assert_eq!(stmt.text, "MATCH (n) RETURN n");
        assert!(!stmt.has_parameters());
    }

    #[test]
    fn test_statement_with_params() {
        let stmt = Statement::new("MATCH (n) WHERE id(n) = $id RETURN n")
            .with_param("id", 7i64)
            .with_params(vec![("name".to_string(), Value::from("Alice"))]);
        assert!(stmt.has_parameters());
        assert_eq!(stmt.parameters.get("id"), Some(&Value::Int(7)));
        assert_eq!(
            stmt.parameters.get("name"),
            Some(&Value::String("Alice".to_string()))
        );
    }

    #[test]
    fn test_wire_serialization_shape() {
        let stmt = Statement::new("RETURN $x").with_param("x", 1i64);
        let json = serde_json::to_string(&stmt).unwrap();
        assert_eq!(json, r#"{"statement":"RETURN $x","parameters":{"x":1}}"#);
    }

    #[test]
    fn test_wire_serialization_is_deterministic() {
        let stmt = Statement::new("RETURN 1")
            .with_param("zeta", 1i64)
            .with_param("alpha", 2i64);
        let a = serde_json::to_string(&stmt).unwrap();
        let b = serde_json::to_string(&stmt.clone()).unwrap();
        assert_eq!(a, b);
        // BTreeMap ordering: alpha serializes before zeta.
        assert!(a.find("alpha").unwrap() < a.find("zeta").unwrap());
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Node.to_string(), "node");
        assert_eq!(EntityKind::Relationship.to_string(), "relationship");
    }
}
