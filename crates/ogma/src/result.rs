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

//! Lazy iterators over multi-row results.
//!
//! Rows are buffered by the transport, but decoding is deferred: each
//! `next()` decodes exactly one row, so a malformed row surfaces as an
//! error item at its position without poisoning the rows before it.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec;

use ogma_core::{RelationshipModel, Row, RowSet};

use crate::cache::{IdentityCache, NodeRef};
use crate::decode;
use crate::error::Result;

/// Iterator over node rows, registering each decoded node in the identity
/// cache as it goes.
///
/// Yielded handles are the cache's canonical ones, so a node already seen
/// in this unit of work comes back as the same handle.
#[derive(Debug)]
pub struct NodeRows {
    rows: vec::IntoIter<Row>,
    cache: Rc<RefCell<IdentityCache>>,
}

impl NodeRows {
    pub(crate) fn new(rows: RowSet, cache: Rc<RefCell<IdentityCache>>) -> Self {
        Self {
            rows: rows.into_rows().into_iter(),
            cache,
        }
    }
}

impl Iterator for NodeRows {
    type Item = Result<NodeRef>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(decode::node_from_row(&row).map(|node| self.cache.borrow_mut().put_if_absent(node)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

/// Iterator over relationship rows.
///
/// Relationships are not identity-cached; every row yields a fresh value.
#[derive(Debug)]
pub struct RelationshipRows {
    rows: vec::IntoIter<Row>,
}

impl RelationshipRows {
    pub(crate) fn new(rows: RowSet) -> Self {
        Self {
            rows: rows.into_rows().into_iter(),
        }
    }
}

impl Iterator for RelationshipRows {
    type Item = Result<RelationshipModel>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(decode::relationship_from_row(&row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

/// An index lookup result: a lazy iterator that also knows its total hit
/// count up front.
///
/// The count covers every buffered row, including any that later fail to
/// decode.
#[derive(Debug)]
pub struct IndexHits<I> {
    size: usize,
    inner: I,
}

impl<I> IndexHits<I> {
    pub(crate) fn new(size: usize, inner: I) -> Self {
        Self { size, inner }
    }

    /// Total number of hits, available before iteration.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl<I: Iterator> Iterator for IndexHits<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
