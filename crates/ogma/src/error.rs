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

//! Error types for Ogma graph operations.

use crate::cypher::EntityKind;
use crate::transport::TransportError;
use thiserror::Error;

/// Error type for graph mapping operations.
///
/// Decode and instantiation errors are surfaced to the caller without local
/// retry. Transaction-protocol violations are programmer errors. Retry
/// policy for transport failures, if any, belongs to the transport
/// collaborator, not to this crate.
#[derive(Debug, Error)]
pub enum OgmaError {
    /// An empty result set where exactly one row was expected.
    #[error("{kind} {id} not found")]
    NotFound {
        /// The kind of entity looked up.
        kind: EntityKind,
        /// The identifier that produced no rows.
        id: i64,
    },

    /// A required statement input was missing or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Transaction protocol violation (double begin, send after a terminal
    /// state, commit without an open transaction).
    #[error("illegal transaction state: {0}")]
    IllegalState(String),

    /// A result row did not match the statement's return projection.
    #[error("row decode failed: expected {expected}, got {actual}")]
    Decode {
        /// The shape the projection promised.
        expected: String,
        /// The shape actually observed.
        actual: String,
    },

    /// A mapping target type could not be constructed.
    #[error("cannot construct an instance of '{0}'")]
    Instantiation(String),

    /// The statement executed but returned no usable rows, or the transport
    /// reported a failure.
    #[error("operation failed: {detail}")]
    OperationFailed {
        /// What was being attempted.
        detail: String,
        /// The transport failure, when one caused this.
        #[source]
        source: Option<TransportError>,
    },

    /// Wire payload serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OgmaError {
    /// Shorthand for an [`OgmaError::OperationFailed`] with no transport
    /// cause (statement ran, produced nothing usable).
    pub fn no_rows(detail: impl Into<String>) -> Self {
        OgmaError::OperationFailed {
            detail: detail.into(),
            source: None,
        }
    }
}

impl From<TransportError> for OgmaError {
    fn from(err: TransportError) -> Self {
        OgmaError::OperationFailed {
            detail: "transport reported failure".to_string(),
            source: Some(err),
        }
    }
}

/// Result type alias for graph mapping operations.
pub type Result<T> = std::result::Result<T, OgmaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = OgmaError::NotFound {
            kind: EntityKind::Node,
            id: 42,
        };
        assert_eq!(err.to_string(), "node 42 not found");
    }

    #[test]
    fn test_decode_display_names_shapes() {
        let err = OgmaError::Decode {
            expected: "node row (id, labels, data)".to_string(),
            actual: "2 columns".to_string(),
        };
        assert!(err.to_string().contains("node row"));
        assert!(err.to_string().contains("2 columns"));
    }

    #[test]
    fn test_transport_failure_becomes_operation_failed() {
        let err: OgmaError = TransportError::new(500, None).into();
        assert!(matches!(
            err,
            OgmaError::OperationFailed {
                source: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn test_from_json_error() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("bogus").unwrap_err();
        let err: OgmaError = json_err.into();
        assert!(matches!(err, OgmaError::Json(_)));
    }
}
