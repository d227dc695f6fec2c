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

//! The unit-of-work facade tying the pieces together.
//!
//! A [`Session`] owns one transport, one transaction context, and one
//! identity cache. Graph operations compile to parameterized statements,
//! route through the transaction context, and decode back into entity
//! representatives, with node handles deduplicated by the cache.

use std::cell::RefCell;
use std::rc::Rc;

use ogma_core::{Properties, RelationshipModel, RowSet, Value};
use tracing::debug;

use crate::cache::{IdentityCache, NodeRef};
use crate::cypher::{build, Direction, EntityKind, LabelMode, Params, Statement};
use crate::decode;
use crate::error::{OgmaError, Result};
use crate::result::{IndexHits, NodeRows, RelationshipRows};
use crate::transaction::{TransactionContext, TxState};
use crate::transport::CypherTransport;

/// A single unit of work against a Cypher store.
#[derive(Debug)]
pub struct Session<T: CypherTransport> {
    transport: T,
    tx: TransactionContext,
    cache: Rc<RefCell<IdentityCache>>,
}

impl<T: CypherTransport> Session<T> {
    /// Start a unit of work over the given transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            tx: TransactionContext::new(),
            cache: Rc::new(RefCell::new(IdentityCache::new())),
        }
    }

    /// The transaction context's current state.
    pub fn tx_state(&self) -> TxState {
        self.tx.state()
    }

    /// Tear the session down, handing the transport back.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Open an explicit transaction; subsequent operations join it until
    /// [`commit`](Self::commit) or [`rollback`](Self::rollback).
    pub fn begin(&mut self) -> Result<()> {
        self.tx.begin(&mut self.transport)
    }

    /// Commit the open transaction.
    pub fn commit(&mut self) -> Result<()> {
        self.tx.commit(&mut self.transport)
    }

    /// Roll the open transaction back.
    pub fn rollback(&mut self) -> Result<()> {
        self.tx.rollback(&mut self.transport)
    }

    /// Run an arbitrary parameterized statement and return the raw rows.
    pub fn query(&mut self, text: impl Into<String>, parameters: Params) -> Result<RowSet> {
        let statement = Statement::new(text).with_params(parameters);
        self.run(&statement)
    }

    // -- nodes ------------------------------------------------------------

    /// Fetch a node by identifier.
    ///
    /// A node already seen in this unit of work comes back as the same
    /// handle without touching the store.
    pub fn get_node(&mut self, id: i64) -> Result<NodeRef> {
        if let Some(node) = self.cache.borrow().get(id) {
            debug!(id, "node served from identity cache");
            return Ok(node);
        }
        let rows = self.run(&build::get_node(id))?;
        let row = rows.first().ok_or(OgmaError::NotFound {
            kind: EntityKind::Node,
            id,
        })?;
        let node = decode::node_from_row(row)?;
        Ok(self.cache.borrow_mut().put_if_absent(node))
    }

    /// Create a node with the given labels and properties.
    pub fn create_node(&mut self, labels: &[String], properties: &Properties) -> Result<NodeRef> {
        let rows = self.run(&build::create_node(labels, properties))?;
        self.node_from_first_row(rows, "node creation returned no row")
    }

    /// Fetch the node matching `label` and the key property, creating it
    /// with `properties` when absent. Properties only apply on creation;
    /// a matched node keeps its stored state.
    pub fn merge_node(
        &mut self,
        label: &str,
        key: &str,
        value: &Value,
        properties: &Properties,
        extra_labels: &[String],
    ) -> Result<NodeRef> {
        let statement = build::merge_node(label, key, value, properties, extra_labels)?;
        let rows = self.run(&statement)?;
        self.node_from_first_row(rows, "node merge returned no row")
    }

    /// Delete a node and evict it from the identity cache.
    pub fn delete_node(&mut self, id: i64) -> Result<()> {
        self.run(&build::delete_entity(EntityKind::Node, id))?;
        self.cache.borrow_mut().remove(id);
        Ok(())
    }

    /// Nodes carrying the given label.
    pub fn nodes_by_label(&mut self, label: &str) -> Result<NodeRows> {
        let rows = self.run(&build::nodes_by_label(label))?;
        Ok(NodeRows::new(rows, self.cache.clone()))
    }

    /// Nodes carrying the given label whose property equals `value`.
    pub fn nodes_by_label_and_property(
        &mut self,
        label: &str,
        key: &str,
        value: &Value,
    ) -> Result<NodeRows> {
        let rows = self.run(&build::nodes_by_label_and_property(label, key, value))?;
        Ok(NodeRows::new(rows, self.cache.clone()))
    }

    /// Add labels to a node, refreshing any cached handle in place.
    pub fn add_labels(&mut self, id: i64, labels: &[String]) -> Result<NodeRef> {
        let rows = self.run(&build::label_mutation(id, labels, LabelMode::Add))?;
        let row = rows.first().ok_or(OgmaError::NotFound {
            kind: EntityKind::Node,
            id,
        })?;
        let node = decode::node_from_row(row)?;
        Ok(self.refresh_cached(node))
    }

    /// Remove labels from a node, refreshing any cached handle in place.
    pub fn remove_labels(&mut self, id: i64, labels: &[String]) -> Result<NodeRef> {
        let rows = self.run(&build::label_mutation(id, labels, LabelMode::Remove))?;
        // Both label mutations match by id, so an empty result means the
        // node does not exist.
        let row = rows.first().ok_or(OgmaError::NotFound {
            kind: EntityKind::Node,
            id,
        })?;
        let node = decode::node_from_row(row)?;
        Ok(self.refresh_cached(node))
    }

    // -- relationships ----------------------------------------------------

    /// Fetch a relationship by identifier.
    pub fn get_relationship(&mut self, id: i64) -> Result<RelationshipModel> {
        let rows = self.run(&build::get_relationship(id))?;
        let row = rows.first().ok_or(OgmaError::NotFound {
            kind: EntityKind::Relationship,
            id,
        })?;
        decode::relationship_from_row(row)
    }

    /// Create a relationship between two existing nodes.
    pub fn create_relationship(
        &mut self,
        start_id: i64,
        end_id: i64,
        rel_type: &str,
        properties: &Properties,
    ) -> Result<RelationshipModel> {
        let rows = self.run(&build::create_relationship(
            start_id, end_id, rel_type, properties,
        ))?;
        let row = rows
            .first()
            .ok_or_else(|| OgmaError::no_rows("relationship creation returned no row"))?;
        decode::relationship_from_row(row)
    }

    /// Delete a relationship.
    pub fn delete_relationship(&mut self, id: i64) -> Result<()> {
        self.run(&build::delete_entity(EntityKind::Relationship, id))?;
        Ok(())
    }

    /// Relationships attached to a node, optionally filtered by direction
    /// and type.
    pub fn relationships(
        &mut self,
        id: i64,
        direction: Direction,
        types: &[&str],
    ) -> Result<RelationshipRows> {
        let rows = self.run(&build::relationships(id, direction, types))?;
        Ok(RelationshipRows::new(rows))
    }

    /// Count of relationships attached to a node.
    ///
    /// A node with no matching relationships counts zero; an id that
    /// matches no node also counts zero, matching what the aggregation
    /// reports.
    pub fn degree(&mut self, id: i64, rel_type: Option<&str>, direction: Direction) -> Result<u64> {
        let rows = self.run(&build::degree(id, rel_type, direction))?;
        let count = rows
            .first()
            .and_then(|row| row.get(0))
            .and_then(Value::as_entity_id)
            .unwrap_or(0);
        Ok(count.max(0) as u64)
    }

    /// Distinct relationship types attached to a node.
    pub fn relationship_types(&mut self, id: i64) -> Result<Vec<String>> {
        let rows = self.run(&build::relationship_types(id))?;
        rows.rows
            .iter()
            .map(|row| {
                row.get(0)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| OgmaError::Decode {
                        expected: "type name string".to_string(),
                        actual: row.get(0).map_or("missing", Value::kind).to_string(),
                    })
            })
            .collect()
    }

    // -- legacy index lookups ---------------------------------------------

    /// Look up nodes through a named legacy index.
    ///
    /// With a `key` the query value is matched exactly; without one the
    /// value is passed through as a raw index query.
    pub fn node_index_lookup(
        &mut self,
        index_name: &str,
        key: Option<&str>,
        query: &Value,
    ) -> Result<IndexHits<NodeRows>> {
        let rows = self.run(&build::index_lookup(
            EntityKind::Node,
            index_name,
            key,
            query,
        ))?;
        let size = rows.len();
        Ok(IndexHits::new(size, NodeRows::new(rows, self.cache.clone())))
    }

    /// Look up relationships through a named legacy index.
    pub fn relationship_index_lookup(
        &mut self,
        index_name: &str,
        key: Option<&str>,
        query: &Value,
    ) -> Result<IndexHits<RelationshipRows>> {
        let rows = self.run(&build::index_lookup(
            EntityKind::Relationship,
            index_name,
            key,
            query,
        ))?;
        let size = rows.len();
        Ok(IndexHits::new(size, RelationshipRows::new(rows)))
    }

    // -- properties -------------------------------------------------------

    /// Set a single property on an entity.
    pub fn set_property(
        &mut self,
        kind: EntityKind,
        id: i64,
        key: &str,
        value: &Value,
    ) -> Result<()> {
        self.run(&build::set_property(kind, id, key, value))?;
        Ok(())
    }

    /// Replace an entity's entire property map.
    pub fn set_properties(
        &mut self,
        kind: EntityKind,
        id: i64,
        properties: &Properties,
    ) -> Result<()> {
        self.run(&build::set_properties(kind, id, properties))?;
        Ok(())
    }

    /// Remove a property from an entity.
    pub fn remove_property(&mut self, kind: EntityKind, id: i64, key: &str) -> Result<()> {
        self.run(&build::remove_property(kind, id, key))?;
        Ok(())
    }

    // -- cache ------------------------------------------------------------

    /// The handle cached for a node id, if this unit of work has seen it.
    pub fn cached_node(&self, id: i64) -> Option<NodeRef> {
        self.cache.borrow().get(id)
    }

    /// Drop every cached node handle.
    pub fn clear_cache(&mut self) {
        self.cache.borrow_mut().clear();
    }

    // -- internals --------------------------------------------------------

    fn run(&mut self, statement: &Statement) -> Result<RowSet> {
        self.tx.send(&mut self.transport, statement)
    }

    fn node_from_first_row(&mut self, rows: RowSet, detail: &str) -> Result<NodeRef> {
        let row = rows.first().ok_or_else(|| OgmaError::no_rows(detail))?;
        let node = decode::node_from_row(row)?;
        Ok(self.cache.borrow_mut().put_if_absent(node))
    }

    /// Fold a freshly decoded node into the cache: refresh an existing
    /// handle in place so earlier holders observe the change, otherwise
    /// register it.
    fn refresh_cached(&mut self, node: ogma_core::NodeModel) -> NodeRef {
        let cached = self.cache.borrow().get(node.id());
        match cached {
            Some(handle) => {
                handle.borrow_mut().refresh_from(node);
                handle
            }
            None => self.cache.borrow_mut().put_if_absent(node),
        }
    }
}
