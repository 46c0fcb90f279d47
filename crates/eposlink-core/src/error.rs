// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Closed error taxonomy for the bridge.
//
// Every failure that can reach a caller is one of these variants. Anything
// unforeseen (a panicking native call, a method nobody registered) is folded
// into `UnknownMethod` / `Internal` before it leaves the dispatcher.

use thiserror::Error;

use crate::status::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// Argument bundle missing, not a map, or a required field is absent or
    /// of the wrong type.
    #[error("malformed arguments")]
    MalformedArguments,

    /// A field restricted to a fixed set of names held something else.
    #[error("{field} = {value}")]
    InvalidEnumValue { field: String, value: String },

    /// The native SDK returned a non-success status.
    #[error("native operation failed with status {0}")]
    NativeOperationFailed(StatusCode),

    /// No live instance is registered under this id.
    #[error("invalid instance id {0}")]
    UnknownHandle(i32),

    #[error("unknown method {0}")]
    UnknownMethod(String),

    /// Uncategorised internal fault, carrying its original description.
    #[error("{0}")]
    Internal(String),
}

impl BridgeError {
    pub fn invalid_enum(field: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidEnumValue {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
