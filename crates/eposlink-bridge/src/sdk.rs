// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Seam between the bridge and the native printer SDK.
//
// The SDK is opaque: every operation takes a printer instance plus a typed
// command and comes back with a status code and, sometimes, a payload.
// Platform builds wrap the vendor library; desktop/CI builds use
// `simulated::SimulatedSdk`.

use eposlink_core::{Result, StatusCode, Value};

use crate::commands::PrinterCommand;

/// Raw result of one native call.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeReply {
    pub status: StatusCode,
    pub payload: Option<Value>,
}

impl NativeReply {
    /// Success with no return data.
    pub fn ok() -> Self {
        Self {
            status: StatusCode::SUCCESS,
            payload: None,
        }
    }

    pub fn with_payload(payload: Value) -> Self {
        Self {
            status: StatusCode::SUCCESS,
            payload: Some(payload),
        }
    }

    pub fn failed(status: StatusCode) -> Self {
        Self {
            status,
            payload: None,
        }
    }

    /// Payload on the success sentinel, `NativeOperationFailed` otherwise.
    /// A payload attached to a failure status is discarded.
    pub fn into_result(self) -> Result<Option<Value>> {
        self.status.check()?;
        Ok(self.payload)
    }
}

/// The native printer SDK.
///
/// Calls may block (network I/O to the printer). Implementations that need
/// per-instance serialisation provide it themselves.
pub trait PrinterSdk: Send + Sync {
    /// Live instance type, owned by the registry.
    type Printer: Send + Sync;

    fn execute(&self, printer: &Self::Printer, command: &PrinterCommand) -> NativeReply;
}
