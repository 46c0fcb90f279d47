// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outcome → reply translation.
//
// Total over `Outcome`: every call produces exactly one `Reply`. The match on
// `BridgeError` is exhaustive so a new variant cannot slip through untranslated.

use eposlink_core::envelope::{CODE_BAD_ENUM, CODE_BAD_MARSHAL, CODE_INVALID_INSTANCE_ID, CODE_UNKNOWN};
use eposlink_core::{BridgeError, ErrorEnvelope, Reply};

use crate::dispatch::Outcome;

/// Turn a dispatch outcome into what the completion sink receives.
pub fn translate(method: &str, outcome: Outcome) -> Reply {
    match outcome {
        Ok(None) => Reply::Ack,
        Ok(Some(value)) => Reply::Value(value),
        Err(error) => Reply::Error(envelope_for(&error, method)),
    }
}

/// Wire envelope for one failure. `details` always carries the method name.
pub fn envelope_for(error: &BridgeError, method: &str) -> ErrorEnvelope {
    let details = Some(method.to_owned());
    match error {
        BridgeError::MalformedArguments => ErrorEnvelope::new(
            CODE_BAD_MARSHAL,
            Some(format!("Bad Marshal from {method}")),
            details,
        ),
        BridgeError::InvalidEnumValue { field, value } => {
            ErrorEnvelope::new(CODE_BAD_ENUM, Some(format!("{field} = {value}")), details)
        }
        BridgeError::UnknownHandle(id) => ErrorEnvelope::new(
            CODE_INVALID_INSTANCE_ID,
            Some(format!("Invalid instance id {id}")),
            details,
        ),
        BridgeError::NativeOperationFailed(status) => {
            ErrorEnvelope::new(status.identifier(), None, details)
        }
        BridgeError::UnknownMethod(_) | BridgeError::Internal(_) => {
            ErrorEnvelope::new(CODE_UNKNOWN, Some(error.to_string()), details)
        }
    }
}
