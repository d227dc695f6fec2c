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

//! Per-unit-of-work node identity cache.
//!
//! Within one unit of work, two lookups of the same store id yield the
//! same shared handle, so mutations through one handle are visible through
//! the other. The cache is first-seen-wins: a node decoded a second time
//! never replaces the handle already registered under its id.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use ogma_core::NodeModel;

/// Shared handle to a cached node.
///
/// Handle identity is reference identity: compare with [`Rc::ptr_eq`].
/// The unit of work is confined to one thread, hence `Rc` over `Arc`.
pub type NodeRef = Rc<RefCell<NodeModel>>;

/// First-seen-wins map from store id to node handle.
#[derive(Debug, Default)]
pub struct IdentityCache {
    nodes: HashMap<i64, NodeRef>,
}

impl IdentityCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the handle registered for `id`, if any.
    pub fn get(&self, id: i64) -> Option<NodeRef> {
        self.nodes.get(&id).cloned()
    }

    /// Register `node` under its id unless one is already present.
    ///
    /// Returns the canonical handle either way; a `node` that loses the
    /// race is dropped.
    pub fn put_if_absent(&mut self, node: NodeModel) -> NodeRef {
        self.nodes
            .entry(node.id())
            .or_insert_with(|| Rc::new(RefCell::new(node)))
            .clone()
    }

    /// Forget the handle for `id`, returning it if one was registered.
    pub fn remove(&mut self, id: i64) -> Option<NodeRef> {
        self.nodes.remove(&id)
    }

    /// Drop every registered handle.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the cache holds no handles.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
