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

//! The single-active-transaction state machine.
//!
//! One [`TransactionContext`] exists per unit of work and holds at most one
//! open transaction. Every compiled statement routes through it: into the
//! open transaction when there is one, otherwise as an implicit
//! single-statement transaction that commits immediately.
//!
//! The context is an explicit value owned by its unit of work, not ambient
//! state; it is confined to one logical caller at a time, and each send is
//! a full round trip before the next can be issued.

use ogma_core::RowSet;
use tracing::debug;

use crate::cypher::Statement;
use crate::error::{OgmaError, Result};
use crate::transport::{CypherTransport, TransportError, TxToken};

/// Lifecycle states of the context's transaction.
///
/// `Unopened → Open → {Committed | RolledBack | Failed}`; the terminal
/// states are final for this context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    /// No transaction has been opened; sends auto-commit.
    Unopened,
    /// A transaction is open; sends append to it.
    Open,
    /// The transaction committed.
    Committed,
    /// The transaction rolled back.
    RolledBack,
    /// A transport failure terminated the transaction.
    Failed,
}

/// Per-unit-of-work transaction state.
#[derive(Debug)]
pub struct TransactionContext {
    state: TxState,
    token: Option<TxToken>,
}

impl Default for TransactionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionContext {
    /// Create a context with no transaction.
    pub fn new() -> Self {
        Self {
            state: TxState::Unopened,
            token: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TxState {
        self.state
    }

    /// Whether a transaction is currently open.
    pub fn is_open(&self) -> bool {
        self.state == TxState::Open
    }

    /// Open a transaction on the remote store.
    ///
    /// Fails with [`OgmaError::IllegalState`] when one is already open, or
    /// when this context already ran a transaction to completion.
    pub fn begin<T: CypherTransport>(&mut self, transport: &mut T) -> Result<()> {
        match self.state {
            TxState::Unopened => {}
            TxState::Open => {
                return Err(OgmaError::IllegalState(
                    "a transaction is already open in this context".to_string(),
                ))
            }
            terminal => {
                return Err(OgmaError::IllegalState(format!(
                    "context already finished in {:?}",
                    terminal
                )))
            }
        }
        let token = transport.begin().map_err(|e| self.fail(e))?;
        debug!(token = %token.0, "transaction opened");
        self.token = Some(token);
        self.state = TxState::Open;
        Ok(())
    }

    /// Route one statement through the context.
    ///
    /// With an open transaction the statement is appended to it and the
    /// result returned without committing. With no transaction, the
    /// statement runs as an implicit single-statement transaction that
    /// commits immediately. After a terminal state, sending is an error.
    pub fn send<T: CypherTransport>(
        &mut self,
        transport: &mut T,
        statement: &Statement,
    ) -> Result<RowSet> {
        match self.state {
            TxState::Unopened => {
                debug!(statement = %statement.text, "auto-commit send");
                statement_result(transport.run(statement)).map_err(|e| self.check_fail(e))
            }
            TxState::Open => {
                debug!(statement = %statement.text, "transactional send");
                // Invariant: Open implies a token.
                let token = self.token.clone().ok_or_else(|| {
                    OgmaError::IllegalState("open transaction lost its token".to_string())
                })?;
                statement_result(transport.send(&token, statement)).map_err(|e| self.check_fail(e))
            }
            terminal => Err(OgmaError::IllegalState(format!(
                "cannot send a statement in {:?}",
                terminal
            ))),
        }
    }

    /// Commit the open transaction.
    pub fn commit<T: CypherTransport>(&mut self, transport: &mut T) -> Result<()> {
        let token = self.require_open("commit")?;
        transport.commit(&token).map_err(|e| self.fail(e))?;
        self.state = TxState::Committed;
        self.token = None;
        Ok(())
    }

    /// Roll the open transaction back.
    pub fn rollback<T: CypherTransport>(&mut self, transport: &mut T) -> Result<()> {
        let token = self.require_open("rollback")?;
        transport.rollback(&token).map_err(|e| self.fail(e))?;
        self.state = TxState::RolledBack;
        self.token = None;
        Ok(())
    }

    fn require_open(&self, action: &str) -> Result<TxToken> {
        if self.state != TxState::Open {
            return Err(OgmaError::IllegalState(format!(
                "cannot {} in {:?}",
                action, self.state
            )));
        }
        self.token.clone().ok_or_else(|| {
            OgmaError::IllegalState("open transaction lost its token".to_string())
        })
    }

    /// Record a transport failure; the context is unusable afterwards.
    fn fail(&mut self, err: TransportError) -> OgmaError {
        self.state = TxState::Failed;
        self.token = None;
        err.into()
    }

    /// Move to `Failed` only on transport-caused errors; row-shape errors
    /// raised by `statement_result` do not poison the context.
    fn check_fail(&mut self, err: OgmaError) -> OgmaError {
        if matches!(
            err,
            OgmaError::OperationFailed {
                source: Some(_),
                ..
            }
        ) {
            self.state = TxState::Failed;
            self.token = None;
        }
        err
    }
}

fn statement_result(result: std::result::Result<RowSet, TransportError>) -> Result<RowSet> {
    result.map_err(OgmaError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ogma_core::{Row, Value};
    use std::collections::VecDeque;

    /// A transport that replays scripted responses and records the calls
    /// it saw.
    struct ScriptedTransport {
        responses: VecDeque<std::result::Result<RowSet, TransportError>>,
        pub calls: Vec<String>,
        next_tx: u32,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<std::result::Result<RowSet, TransportError>>) -> Self {
            Self {
                responses: responses.into(),
                calls: Vec::new(),
                next_tx: 0,
            }
        }

        fn pop(&mut self) -> std::result::Result<RowSet, TransportError> {
            self.responses
                .pop_front()
                .unwrap_or_else(|| Ok(RowSet::default()))
        }
    }

    impl CypherTransport for ScriptedTransport {
        fn run(&mut self, statement: &Statement) -> std::result::Result<RowSet, TransportError> {
            self.calls.push(format!("run:{}", statement.text));
            self.pop()
        }

        fn begin(&mut self) -> std::result::Result<TxToken, TransportError> {
            self.next_tx += 1;
            self.calls.push(format!("begin:{}", self.next_tx));
            Ok(TxToken(format!("tx-{}", self.next_tx)))
        }

        fn send(
            &mut self,
            tx: &TxToken,
            statement: &Statement,
        ) -> std::result::Result<RowSet, TransportError> {
            self.calls.push(format!("send[{}]:{}", tx.0, statement.text));
            self.pop()
        }

        fn commit(&mut self, tx: &TxToken) -> std::result::Result<(), TransportError> {
            self.calls.push(format!("commit:{}", tx.0));
            Ok(())
        }

        fn rollback(&mut self, tx: &TxToken) -> std::result::Result<(), TransportError> {
            self.calls.push(format!("rollback:{}", tx.0));
            Ok(())
        }
    }

    fn one_row() -> RowSet {
        RowSet::new(
            vec!["x".to_string()],
            vec![Row::new(vec![Value::Int(1)])],
        )
    }

    #[test]
    fn test_unopened_send_auto_commits() {
        let mut transport = ScriptedTransport::new(vec![Ok(one_row())]);
        let mut ctx = TransactionContext::new();

        let rows = ctx.send(&mut transport, &Statement::new("RETURN 1")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(ctx.state(), TxState::Unopened);
        assert_eq!(transport.calls, vec!["run:RETURN 1"]);
    }

    #[test]
    fn test_open_sends_route_through_transaction_in_order() {
        let mut transport = ScriptedTransport::new(vec![Ok(one_row()), Ok(one_row())]);
        let mut ctx = TransactionContext::new();

        ctx.begin(&mut transport).unwrap();
        ctx.send(&mut transport, &Statement::new("RETURN 1")).unwrap();
        ctx.send(&mut transport, &Statement::new("RETURN 2")).unwrap();
        ctx.commit(&mut transport).unwrap();

        assert_eq!(
            transport.calls,
            vec![
                "begin:1",
                "send[tx-1]:RETURN 1",
                "send[tx-1]:RETURN 2",
                "commit:tx-1",
            ]
        );
        assert_eq!(ctx.state(), TxState::Committed);
    }

    #[test]
    fn test_double_begin_is_illegal() {
        let mut transport = ScriptedTransport::new(vec![]);
        let mut ctx = TransactionContext::new();
        ctx.begin(&mut transport).unwrap();
        assert!(matches!(
            ctx.begin(&mut transport),
            Err(OgmaError::IllegalState(_))
        ));
        // Still open and usable.
        assert!(ctx.is_open());
    }

    #[test]
    fn test_send_after_commit_is_illegal() {
        let mut transport = ScriptedTransport::new(vec![]);
        let mut ctx = TransactionContext::new();
        ctx.begin(&mut transport).unwrap();
        ctx.commit(&mut transport).unwrap();
        assert!(matches!(
            ctx.send(&mut transport, &Statement::new("RETURN 1")),
            Err(OgmaError::IllegalState(_))
        ));
    }

    #[test]
    fn test_send_after_rollback_is_illegal() {
        let mut transport = ScriptedTransport::new(vec![]);
        let mut ctx = TransactionContext::new();
        ctx.begin(&mut transport).unwrap();
        ctx.rollback(&mut transport).unwrap();
        assert_eq!(ctx.state(), TxState::RolledBack);
        assert!(matches!(
            ctx.send(&mut transport, &Statement::new("RETURN 1")),
            Err(OgmaError::IllegalState(_))
        ));
    }

    #[test]
    fn test_commit_without_open_is_illegal() {
        let mut transport = ScriptedTransport::new(vec![]);
        let mut ctx = TransactionContext::new();
        assert!(matches!(
            ctx.commit(&mut transport),
            Err(OgmaError::IllegalState(_))
        ));
    }

    #[test]
    fn test_transport_failure_poisons_context() {
        let mut transport =
            ScriptedTransport::new(vec![Err(TransportError::new(500, None))]);
        let mut ctx = TransactionContext::new();
        ctx.begin(&mut transport).unwrap();

        let err = ctx
            .send(&mut transport, &Statement::new("RETURN 1"))
            .unwrap_err();
        assert!(matches!(err, OgmaError::OperationFailed { .. }));
        assert_eq!(ctx.state(), TxState::Failed);

        assert!(matches!(
            ctx.send(&mut transport, &Statement::new("RETURN 2")),
            Err(OgmaError::IllegalState(_))
        ));
        assert!(matches!(
            ctx.commit(&mut transport),
            Err(OgmaError::IllegalState(_))
        ));
    }

    #[test]
    fn test_auto_commit_failure_poisons_context() {
        let mut transport =
            ScriptedTransport::new(vec![Err(TransportError::new(503, None))]);
        let mut ctx = TransactionContext::new();

        assert!(ctx
            .send(&mut transport, &Statement::new("RETURN 1"))
            .is_err());
        assert_eq!(ctx.state(), TxState::Failed);
    }
}
