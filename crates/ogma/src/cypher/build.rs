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

//! Pure statement builders, one per graph operation.
//!
//! Each builder deterministically produces statement text and bound
//! parameters. Values always travel as parameters; identifiers are escaped
//! by [`crate::cypher::escape`] and interpolated, since the query language
//! cannot parameterize them.

use ogma_core::{Properties, Value};

use crate::cypher::escape::{escape_identifier, escape_label, escape_relationship_type};
use crate::cypher::statement::{
    EntityKind, Statement, RETURN_NODE, RETURN_RELATIONSHIP,
};
use crate::error::{OgmaError, Result};

/// Relationship direction relative to the anchored node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Relationships leaving the node.
    Outgoing,
    /// Relationships arriving at the node.
    Incoming,
    /// Either direction.
    Either,
}

/// Whether a label mutation adds or removes the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    /// `SET n:Label`.
    Add,
    /// `REMOVE n:Label`.
    Remove,
}

const MATCH_NODE: &str = "MATCH (n) WHERE id(n) = $id";
const MATCH_RELATIONSHIP: &str = "MATCH ()-[r]->() WHERE id(r) = $id";

/// `:A:B` fragment for a label set; empty when no labels are given.
fn label_fragment(labels: &[String]) -> String {
    labels
        .iter()
        .map(|l| format!(":{}", escape_label(l)))
        .collect()
}

/// Relationship pattern fragment anchored on `(n)`, e.g. `-[r:KNOWS]->`.
///
/// Empty type list matches any type; multiple types are alternated with
/// `|`.
fn rel_pattern(direction: Direction, types: &[&str]) -> String {
    let type_fragment = if types.is_empty() {
        String::new()
    } else {
        let alternatives: Vec<String> = types
            .iter()
            .map(|t| escape_relationship_type(t))
            .collect();
        format!(":{}", alternatives.join("|"))
    };
    let core = format!("-[r{}]-", type_fragment);
    match direction {
        Direction::Outgoing => format!("{}>", core),
        Direction::Incoming => format!("<{}", core),
        Direction::Either => core,
    }
}

/// Fetch a node by identifier, with the fixed node projection.
pub fn get_node(id: i64) -> Statement {
    Statement::new(format!("{}{}", MATCH_NODE, RETURN_NODE)).with_param("id", id)
}

/// Fetch a relationship by identifier, with the fixed relationship
/// projection.
pub fn get_relationship(id: i64) -> Statement {
    Statement::new(format!("{}{}", MATCH_RELATIONSHIP, RETURN_RELATIONSHIP)).with_param("id", id)
}

/// Create a node carrying all given labels and the full property map bound
/// as a single parameter.
pub fn create_node(labels: &[String], properties: &Properties) -> Statement {
    Statement::new(format!(
        "CREATE (n{} $props){}",
        label_fragment(labels),
        RETURN_NODE
    ))
    .with_param("props", Value::Map(properties.clone()))
}

/// Merge a node on `(label, key = value)`.
///
/// This is create-or-fetch, not upsert: the property map is applied with
/// `ON CREATE SET` only, so a matched node keeps the properties it was
/// first created with. Labels in `extra_labels` other than the merge label
/// are set on both paths. The merge key/value pair is folded into the bound
/// property map when absent, so a created node always carries its key.
pub fn merge_node(
    label: &str,
    key: &str,
    value: &Value,
    properties: &Properties,
    extra_labels: &[String],
) -> Result<Statement> {
    if label.is_empty() {
        return Err(OgmaError::InvalidArgument(
            "merge requires a non-empty label".to_string(),
        ));
    }
    if key.is_empty() {
        return Err(OgmaError::InvalidArgument(
            "merge requires a non-empty key".to_string(),
        ));
    }
    if value.is_null() {
        return Err(OgmaError::InvalidArgument(format!(
            "merge on '{}.{}' requires a non-null value",
            label, key
        )));
    }

    let mut props = properties.clone();
    props
        .entry(key.to_string())
        .or_insert_with(|| value.clone());

    let mut text = format!(
        "MERGE (n:{} {{{}: $value}}) ON CREATE SET n = $props",
        escape_label(label),
        escape_identifier(key)
    );
    for extra in extra_labels {
        if extra == label {
            continue;
        }
        text.push_str(&format!(" SET n:{}", escape_label(extra)));
    }
    text.push_str(RETURN_NODE);

    Ok(Statement::new(text)
        .with_param("value", value.clone())
        .with_param("props", Value::Map(props)))
}

/// Create a relationship between two nodes matched by identifier.
///
/// Both endpoints are matched before the edge is created, so a missing
/// endpoint yields an empty result set, which the executing layer reports
/// as an operation failure.
pub fn create_relationship(
    start_id: i64,
    end_id: i64,
    rel_type: &str,
    properties: &Properties,
) -> Statement {
    Statement::new(format!(
        "MATCH (n) WHERE id(n) = $start MATCH (m) WHERE id(m) = $end \
         CREATE (n)-[r:{}]->(m) SET r = $props{}",
        escape_relationship_type(rel_type),
        RETURN_RELATIONSHIP
    ))
    .with_param("start", start_id)
    .with_param("end", end_id)
    .with_param("props", Value::Map(properties.clone()))
}

/// Count relationships touching a node, optionally restricted by type.
///
/// Zero matching relationships is a degree of `0`, not an error; the
/// executing layer treats an empty result the same way.
pub fn degree(id: i64, rel_type: Option<&str>, direction: Direction) -> Statement {
    let types: Vec<&str> = rel_type.into_iter().collect();
    Statement::new(format!(
        "MATCH (n){}() WHERE id(n) = $id RETURN count(*) AS degree",
        rel_pattern(direction, &types)
    ))
    .with_param("id", id)
}

/// Fetch relationships touching a node, optionally restricted by type.
pub fn relationships(id: i64, direction: Direction, types: &[&str]) -> Statement {
    Statement::new(format!(
        "{} MATCH (n){}(){}",
        MATCH_NODE,
        rel_pattern(direction, types),
        RETURN_RELATIONSHIP
    ))
    .with_param("id", id)
}

/// Distinct relationship types touching a node.
pub fn relationship_types(id: i64) -> Statement {
    Statement::new(format!(
        "{} MATCH (n)-[r]-() RETURN DISTINCT type(r) AS relType",
        MATCH_NODE
    ))
    .with_param("id", id)
}

/// Add or remove one or more labels on a node.
///
/// The two modes use different statement forms, but both re-project the
/// node so the caller can refresh its cached representative.
pub fn label_mutation(id: i64, labels: &[String], mode: LabelMode) -> Statement {
    let text = match mode {
        LabelMode::Add => format!("{} SET n{}{}", MATCH_NODE, label_fragment(labels), RETURN_NODE),
        LabelMode::Remove => format!(
            "{} REMOVE n{}{}",
            MATCH_NODE,
            label_fragment(labels),
            RETURN_NODE
        ),
    };
    Statement::new(text).with_param("id", id)
}

/// All nodes carrying a label.
pub fn nodes_by_label(label: &str) -> Statement {
    Statement::new(format!("MATCH (n:{}){}", escape_label(label), RETURN_NODE))
}

/// Nodes carrying a label whose property equals the bound value.
pub fn nodes_by_label_and_property(label: &str, key: &str, value: &Value) -> Statement {
    Statement::new(format!(
        "MATCH (n:{}) WHERE n.{} = $value{}",
        escape_label(label),
        escape_identifier(key),
        RETURN_NODE
    ))
    .with_param("value", value.clone())
}

/// Look up entities through a named index.
///
/// With a `key`, the lookup is an exact match on that key; without one, the
/// bound `$query` runs against the whole index.
pub fn index_lookup(kind: EntityKind, index_name: &str, key: Option<&str>, query: &Value) -> Statement {
    let index = match key {
        Some(key) => format!(
            ":{}({} = $query)",
            escape_identifier(index_name),
            escape_identifier(key)
        ),
        None => format!(":{}($query)", escape_identifier(index_name)),
    };
    let text = match kind {
        EntityKind::Node => format!("START n=node{}{}", index, RETURN_NODE),
        EntityKind::Relationship => format!("START r=rel{}{}", index, RETURN_RELATIONSHIP),
    };
    Statement::new(text).with_param("query", query.clone())
}

/// Delete an entity by identifier.
pub fn delete_entity(kind: EntityKind, id: i64) -> Statement {
    let text = match kind {
        EntityKind::Node => format!("{} DELETE n", MATCH_NODE),
        EntityKind::Relationship => format!("{} DELETE r", MATCH_RELATIONSHIP),
    };
    Statement::new(text).with_param("id", id)
}

/// Set a single property on an entity.
pub fn set_property(kind: EntityKind, id: i64, key: &str, value: &Value) -> Statement {
    let text = match kind {
        EntityKind::Node => format!("{} SET n.{} = $value", MATCH_NODE, escape_identifier(key)),
        EntityKind::Relationship => format!(
            "{} SET r.{} = $value",
            MATCH_RELATIONSHIP,
            escape_identifier(key)
        ),
    };
    Statement::new(text)
        .with_param("id", id)
        .with_param("value", value.clone())
}

/// Replace an entity's whole property map.
pub fn set_properties(kind: EntityKind, id: i64, properties: &Properties) -> Statement {
    let text = match kind {
        EntityKind::Node => format!("{} SET n = $props", MATCH_NODE),
        EntityKind::Relationship => format!("{} SET r = $props", MATCH_RELATIONSHIP),
    };
    Statement::new(text)
        .with_param("id", id)
        .with_param("props", Value::Map(properties.clone()))
}

/// Remove a single property from an entity.
pub fn remove_property(kind: EntityKind, id: i64, key: &str) -> Statement {
    let text = match kind {
        EntityKind::Node => format!("{} REMOVE n.{}", MATCH_NODE, escape_identifier(key)),
        EntityKind::Relationship => {
            format!("{} REMOVE r.{}", MATCH_RELATIONSHIP, escape_identifier(key))
        }
    };
    Statement::new(text).with_param("id", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ogma_core::Properties;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_get_node_projection() {
        let stmt = get_node(42);
        assert_eq!(
            stmt.text,
            "MATCH (n) WHERE id(n) = $id RETURN id(n) AS id, labels(n) AS labels, n AS data"
        );
        assert_eq!(stmt.parameters.get("id"), Some(&Value::Int(42)));
    }

    #[test]
    fn test_get_relationship_projection() {
        let stmt = get_relationship(5);
        assert!(stmt.text.starts_with("MATCH ()-[r]->() WHERE id(r) = $id"));
        assert!(stmt.text.ends_with(
            "RETURN id(r) AS id, type(r) AS type, r AS data, \
             id(startNode(r)) AS start, id(endNode(r)) AS end"
        ));
    }

    #[test]
    fn test_create_node_appends_all_labels() {
        let stmt = create_node(&labels(&["Person", "Admin"]), &Properties::new());
        assert!(stmt.text.starts_with("CREATE (n:Person:Admin $props)"));
        assert_eq!(
            stmt.parameters.get("props"),
            Some(&Value::Map(Properties::new()))
        );
    }

    #[test]
    fn test_create_node_no_labels() {
        let stmt = create_node(&[], &Properties::new());
        assert!(stmt.text.starts_with("CREATE (n $props)"));
    }

    #[test]
    fn test_create_node_quotes_hostile_label() {
        let stmt = create_node(&labels(&["Bad Label`) DETACH DELETE (m"]), &Properties::new());
        assert!(stmt.text.contains("`Bad Label``) DETACH DELETE (m`"));
    }

    #[test]
    fn test_merge_node_create_only_semantics() {
        let mut props = Properties::new();
        props.insert("name".to_string(), Value::from("Alice"));
        let stmt = merge_node(
            "Person",
            "email",
            &Value::from("a@example.com"),
            &props,
            &labels(&["Person", "Admin"]),
        )
        .unwrap();

        assert!(stmt
            .text
            .starts_with("MERGE (n:Person {email: $value}) ON CREATE SET n = $props"));
        // No update-on-match clause, ever.
        assert!(!stmt.text.contains("ON MATCH"));
        // The merge label is not re-set; the extra one is.
        assert!(stmt.text.contains(" SET n:Admin"));
        assert!(!stmt.text.contains("SET n:Person"));
    }

    #[test]
    fn test_merge_node_folds_key_into_props() {
        let stmt = merge_node(
            "Person",
            "email",
            &Value::from("a@example.com"),
            &Properties::new(),
            &[],
        )
        .unwrap();
        let props = stmt.parameters.get("props").and_then(Value::as_map).unwrap();
        assert_eq!(
            props.get("email"),
            Some(&Value::String("a@example.com".to_string()))
        );
    }

    #[test]
    fn test_merge_node_keeps_explicit_key_property() {
        let mut props = Properties::new();
        props.insert("email".to_string(), Value::from("explicit@example.com"));
        let stmt = merge_node("Person", "email", &Value::from("merge@example.com"), &props, &[])
            .unwrap();
        let bound = stmt.parameters.get("props").and_then(Value::as_map).unwrap();
        assert_eq!(
            bound.get("email"),
            Some(&Value::String("explicit@example.com".to_string()))
        );
    }

    #[test]
    fn test_merge_node_validates_inputs() {
        let v = Value::from("x");
        assert!(matches!(
            merge_node("", "k", &v, &Properties::new(), &[]),
            Err(OgmaError::InvalidArgument(_))
        ));
        assert!(matches!(
            merge_node("L", "", &v, &Properties::new(), &[]),
            Err(OgmaError::InvalidArgument(_))
        ));
        assert!(matches!(
            merge_node("L", "k", &Value::Null, &Properties::new(), &[]),
            Err(OgmaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_create_relationship_matches_endpoints_first() {
        let stmt = create_relationship(1, 2, "KNOWS", &Properties::new());
        assert!(stmt.text.starts_with(
            "MATCH (n) WHERE id(n) = $start MATCH (m) WHERE id(m) = $end CREATE (n)-[r:KNOWS]->(m)"
        ));
        assert_eq!(stmt.parameters.get("start"), Some(&Value::Int(1)));
        assert_eq!(stmt.parameters.get("end"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_degree_directions() {
        let out = degree(1, Some("KNOWS"), Direction::Outgoing);
        assert!(out.text.contains("(n)-[r:KNOWS]->()"));

        let inc = degree(1, Some("KNOWS"), Direction::Incoming);
        assert!(inc.text.contains("(n)<-[r:KNOWS]-()"));

        let either = degree(1, None, Direction::Either);
        assert!(either.text.contains("(n)-[r]-()"));
        assert!(either.text.ends_with("RETURN count(*) AS degree"));
    }

    #[test]
    fn test_relationships_pattern_alternation() {
        let stmt = relationships(1, Direction::Either, &["KNOWS", "LIKES"]);
        assert!(stmt.text.contains("-[r:KNOWS|LIKES]-"));
    }

    #[test]
    fn test_label_mutation_forms_differ() {
        let add = label_mutation(1, &labels(&["Admin"]), LabelMode::Add);
        assert!(add.text.contains(" SET n:Admin"));
        assert!(add.text.ends_with("n AS data"));

        let remove = label_mutation(1, &labels(&["Admin"]), LabelMode::Remove);
        assert!(remove.text.contains(" REMOVE n:Admin"));
        assert!(remove.text.ends_with("n AS data"));
    }

    #[test]
    fn test_nodes_by_label_and_property_quotes_key() {
        let stmt = nodes_by_label_and_property("Person", "user name", &Value::from("Alice"));
        assert!(stmt.text.contains("WHERE n.`user name` = $value"));
        assert_eq!(
            stmt.parameters.get("value"),
            Some(&Value::String("Alice".to_string()))
        );
    }

    #[test]
    fn test_index_lookup_with_and_without_key() {
        let keyed = index_lookup(EntityKind::Node, "people", Some("name"), &Value::from("Al*"));
        assert!(keyed.text.starts_with("START n=node:people(name = $query)"));

        let whole = index_lookup(EntityKind::Relationship, "friendships", None, &Value::from("*"));
        assert!(whole.text.starts_with("START r=rel:friendships($query)"));
        assert!(whole.text.contains("startNode"));
    }

    #[test]
    fn test_property_mutations_per_kind() {
        let set = set_property(EntityKind::Node, 1, "name", &Value::from("A"));
        assert!(set.text.contains("SET n.name = $value"));

        let set_rel = set_property(EntityKind::Relationship, 1, "since", &Value::from(2024i64));
        assert!(set_rel.text.contains("SET r.since = $value"));

        let replace = set_properties(EntityKind::Node, 1, &Properties::new());
        assert!(replace.text.contains("SET n = $props"));

        let remove = remove_property(EntityKind::Relationship, 1, "since");
        assert!(remove.text.contains("REMOVE r.since"));
    }

    #[test]
    fn test_delete_entity_forms() {
        assert!(delete_entity(EntityKind::Node, 1).text.ends_with("DELETE n"));
        assert!(delete_entity(EntityKind::Relationship, 1)
            .text
            .ends_with("DELETE r"));
    }
}
