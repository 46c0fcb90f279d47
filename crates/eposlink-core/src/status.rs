// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native ePOS2 result codes and their stable wire identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Raw status code returned by every native SDK call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub i32);

/// Known codes: (raw value, wire identifier, plain-English meaning).
const STATUS_TABLE: &[(i32, &str, &str)] = &[
    (1, "ERR_PARAM", "an argument was out of range or invalid"),
    (2, "ERR_CONNECT", "could not connect to the printer"),
    (3, "ERR_TIMEOUT", "the printer did not respond in time"),
    (4, "ERR_MEMORY", "the SDK ran out of memory"),
    (5, "ERR_ILLEGAL", "the call is not allowed in the current state"),
    (6, "ERR_PROCESSING", "the printer could not process the request"),
    (7, "ERR_NOT_FOUND", "the target device was not found"),
    (8, "ERR_IN_USE", "the device is in use by another process"),
    (9, "ERR_TYPE_INVALID", "the device type does not match"),
    (10, "ERR_DISCONNECT", "the connection was lost"),
    (11, "ERR_ALREADY_OPENED", "the device is already open"),
    (12, "ERR_ALREADY_USED", "the device id is already in use"),
    (13, "ERR_BOX_COUNT_OVER", "too many device boxes"),
    (14, "ERR_BOX_CLIENT_OVER", "too many clients in the device box"),
    (15, "ERR_UNSUPPORTED", "the operation is not supported by this model"),
    (255, "ERR_FAILURE", "unspecified SDK failure"),
];

/// Identifier for codes missing from the table.
pub const UNKNOWN_STATUS_IDENTIFIER: &str = "ERR_UNKNOWN";

impl StatusCode {
    /// The one code meaning "operation succeeded".
    pub const SUCCESS: Self = Self(0);

    pub const ERR_PARAM: Self = Self(1);
    pub const ERR_CONNECT: Self = Self(2);
    pub const ERR_TIMEOUT: Self = Self(3);
    pub const ERR_ILLEGAL: Self = Self(5);
    pub const ERR_UNSUPPORTED: Self = Self(15);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// `Ok(())` for the success sentinel, `NativeOperationFailed` otherwise.
    pub fn check(self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(BridgeError::NativeOperationFailed(self))
        }
    }

    /// Stable wire identifier for a failure code.
    ///
    /// Total over `i32`: codes outside the table map to `ERR_UNKNOWN`. The
    /// success sentinel has no failure identifier and also lands there;
    /// callers go through [`StatusCode::check`] first.
    pub fn identifier(self) -> &'static str {
        self.lookup()
            .map(|(_, ident, _)| ident)
            .unwrap_or(UNKNOWN_STATUS_IDENTIFIER)
    }

    /// Plain-English meaning, for log records.
    pub fn description(self) -> &'static str {
        if self.is_success() {
            return "success";
        }
        self.lookup()
            .map(|(_, _, text)| text)
            .unwrap_or("unrecognised SDK status")
    }

    fn lookup(self) -> Option<(i32, &'static str, &'static str)> {
        STATUS_TABLE.iter().copied().find(|(code, _, _)| *code == self.0)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
