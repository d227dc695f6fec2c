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

//! The request/response contract with the transport collaborator.
//!
//! HTTP, authentication, retries, and timeouts all live behind
//! [`CypherTransport`]; this crate only sees blocking request/response
//! round trips. Each call completes before the next is issued, which is
//! what gives statements their send-order guarantee inside an open
//! transaction.

use ogma_core::RowSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cypher::Statement;

/// A machine-readable failure classification from the remote store.
///
/// Distinguishes a structured error payload from a bare non-success status:
/// transports that received a parseable error body attach one of these,
/// transports that received nothing leave [`TransportError::failure`]
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireFailure {
    /// The store's failure code, e.g. `Neo.ClientError.Statement.SyntaxError`.
    pub code: String,
    /// Human-readable failure message.
    pub message: String,
}

/// A failed transport round trip: non-success status plus the optional
/// structured failure payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failure (status {status}): {}", self.describe())]
pub struct TransportError {
    /// The transport-level status (e.g. HTTP status code).
    pub status: u16,
    /// The structured failure, when the payload carried one.
    pub failure: Option<WireFailure>,
}

impl TransportError {
    /// Create a transport error.
    pub fn new(status: u16, failure: Option<WireFailure>) -> Self {
        Self { status, failure }
    }

    fn describe(&self) -> String {
        match &self.failure {
            Some(f) => format!("{}: {}", f.code, f.message),
            None => "no failure payload".to_string(),
        }
    }
}

/// Opaque handle to a server-side transaction, e.g. the transaction
/// endpoint URL a remote store hands back on begin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxToken(pub String);

/// The wire envelope wrapping statements for transactional endpoints.
///
/// Serializes to `{"statements": [{"statement": …, "parameters": …}, …]}`,
/// deterministically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementsPayload {
    /// The statements to run in this round trip.
    pub statements: Vec<Statement>,
}

impl StatementsPayload {
    /// Wrap a single statement.
    pub fn single(statement: Statement) -> Self {
        Self {
            statements: vec![statement],
        }
    }
}

/// Blocking request/response transport to a Cypher-speaking store.
///
/// Implementations own everything network-shaped: endpoints, auth, retry
/// and timeout policy. A failed round trip is reported as a
/// [`TransportError`]; this crate never retries.
pub trait CypherTransport {
    /// Execute one statement in an implicit transaction that commits
    /// immediately.
    fn run(&mut self, statement: &Statement) -> Result<RowSet, TransportError>;

    /// Open a server-side transaction.
    fn begin(&mut self) -> Result<TxToken, TransportError>;

    /// Execute a statement inside the open transaction without committing.
    fn send(&mut self, tx: &TxToken, statement: &Statement) -> Result<RowSet, TransportError>;

    /// Commit the open transaction.
    fn commit(&mut self, tx: &TxToken) -> Result<(), TransportError>;

    /// Roll the open transaction back.
    fn rollback(&mut self, tx: &TxToken) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display_with_failure() {
        let err = TransportError::new(
            400,
            Some(WireFailure {
                code: "Neo.ClientError.Statement.SyntaxError".to_string(),
                message: "bad query".to_string(),
            }),
        );
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("SyntaxError"));
        assert!(msg.contains("bad query"));
    }

    #[test]
    fn test_transport_error_display_without_failure() {
        let err = TransportError::new(503, None);
        assert!(err.to_string().contains("no failure payload"));
    }

    #[test]
    fn test_payload_envelope_shape() {
        let payload = StatementsPayload::single(Statement::new("RETURN 1"));
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            r#"{"statements":[{"statement":"RETURN 1","parameters":{}}]}"#
        );
    }
}
