// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How an id+args call is treated when the `args` key is absent or null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingArgsPolicy {
    /// Fail with `MalformedArguments` (the runtime always sends `args`).
    #[default]
    Reject,
    /// Proceed with an empty parameter map.
    TreatAsEmpty,
}

/// Tunable behaviour of the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub missing_args: MissingArgsPolicy,
    /// Include argument values in call log records.
    pub log_arguments: bool,
    /// Include result payloads in call log records.
    pub log_results: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            missing_args: MissingArgsPolicy::Reject,
            log_arguments: true,
            log_results: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BridgeConfig {
    /// Load from a JSON file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"missing_args": "treat_as_empty"}}"#).expect("write");

        let config = BridgeConfig::load(file.path()).expect("load");
        assert_eq!(config.missing_args, MissingArgsPolicy::TreatAsEmpty);
        assert!(config.log_arguments);
        assert!(config.log_results);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = BridgeConfig::load(dir.path().join("absent.json")).expect_err("should fail");
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn bad_policy_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"missing_args": "sometimes"}}"#).expect("write");
        let err = BridgeConfig::load(file.path()).expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
