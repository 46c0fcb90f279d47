// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wire shapes delivered back to the app runtime.
//
// Existing Dart callers switch on the exact `code` strings below, so these
// constants and the `{code, message, details}` field names must not change.

use serde::{Deserialize, Serialize, Serializer};

use crate::value::Value;

pub const CODE_BAD_MARSHAL: &str = "lib-BadMarshal";
pub const CODE_BAD_ENUM: &str = "lib-BadEnum";
pub const CODE_INVALID_INSTANCE_ID: &str = "lib-InvalidInstanceId";
pub const CODE_UNKNOWN: &str = "lib-Unknown";

/// Normalised failure shape. `message` and `details` serialise as `null`
/// when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: Option<String>,
    pub details: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(
        code: impl Into<String>,
        message: Option<String>,
        details: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message,
            details,
        }
    }
}

/// What the completion sink receives for one call.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Void acknowledgment: the operation succeeded and returned nothing.
    Ack,
    /// The native result payload, unchanged.
    Value(Value),
    Error(ErrorEnvelope),
}

impl Reply {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn error(&self) -> Option<&ErrorEnvelope> {
        match self {
            Self::Error(env) => Some(env),
            _ => None,
        }
    }
}

/// `Ack` → `null`, `Value` → the value itself, `Error` → the envelope object.
impl Serialize for Reply {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Ack => serializer.serialize_unit(),
            Self::Value(value) => value.serialize(serializer),
            Self::Error(envelope) => envelope.serialize(serializer),
        }
    }
}
