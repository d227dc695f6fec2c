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

//! Shared test transport that replays scripted responses.

use std::collections::VecDeque;

use ogma::{CypherTransport, Statement, TransportError, TxToken};
use ogma_core::{Properties, Row, RowSet, Value};

/// A transport that pops one scripted response per statement and records
/// every statement text it saw, in order.
pub struct ScriptedTransport {
    responses: VecDeque<Result<RowSet, TransportError>>,
    pub calls: Vec<String>,
    next_tx: u32,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<RowSet, TransportError>>) -> Self {
        Self {
            responses: responses.into(),
            calls: Vec::new(),
            next_tx: 0,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    fn pop(&mut self) -> Result<RowSet, TransportError> {
        self.responses
            .pop_front()
            .unwrap_or_else(|| Ok(RowSet::default()))
    }
}

impl CypherTransport for ScriptedTransport {
    fn run(&mut self, statement: &Statement) -> Result<RowSet, TransportError> {
        self.calls.push(format!("run:{}", statement.text));
        self.pop()
    }

    fn begin(&mut self) -> Result<TxToken, TransportError> {
        self.next_tx += 1;
        self.calls.push(format!("begin:{}", self.next_tx));
        Ok(TxToken(format!("tx-{}", self.next_tx)))
    }

    fn send(&mut self, tx: &TxToken, statement: &Statement) -> Result<RowSet, TransportError> {
        self.calls.push(format!("send[{}]:{}", tx.0, statement.text));
        self.pop()
    }

    fn commit(&mut self, tx: &TxToken) -> Result<(), TransportError> {
        self.calls.push(format!("commit:{}", tx.0));
        Ok(())
    }

    fn rollback(&mut self, tx: &TxToken) -> Result<(), TransportError> {
        self.calls.push(format!("rollback:{}", tx.0));
        Ok(())
    }
}

/// A row set in the node projection shape.
pub fn node_rows(nodes: &[(i64, &[&str])]) -> RowSet {
    RowSet::new(
        vec!["id".into(), "labels".into(), "data".into()],
        nodes
            .iter()
            .map(|(id, labels)| {
                Row::new(vec![
                    Value::Int(*id),
                    Value::from(labels.to_vec()),
                    Value::Map(Properties::new()),
                ])
            })
            .collect(),
    )
}

/// A row set in the relationship projection shape.
pub fn relationship_rows(rels: &[(i64, &str, i64, i64)]) -> RowSet {
    RowSet::new(
        vec![
            "id".into(),
            "type".into(),
            "data".into(),
            "start".into(),
            "end".into(),
        ],
        rels.iter()
            .map(|(id, rel_type, start, end)| {
                Row::new(vec![
                    Value::Int(*id),
                    Value::from(*rel_type),
                    Value::Map(Properties::new()),
                    Value::Int(*start),
                    Value::Int(*end),
                ])
            })
            .collect(),
    )
}
