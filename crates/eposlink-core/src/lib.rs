// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// eposlink — Core values, error taxonomy and wire envelopes shared by the
// bridge and whatever transport sits in front of it.

pub mod config;
pub mod envelope;
pub mod error;
pub mod status;
pub mod value;

pub use config::{BridgeConfig, ConfigError, MissingArgsPolicy};
pub use envelope::{ErrorEnvelope, Reply};
pub use error::{BridgeError, Result};
pub use status::StatusCode;
pub use value::{Value, ValueMap};
