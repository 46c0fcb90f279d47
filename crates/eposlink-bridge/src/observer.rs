// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Call observers: advisory hooks at fixed points of a dispatch.
//
// Observers see shared references and return nothing, so they can record a
// call but never change its outcome.

use tracing::{info, warn};

use eposlink_core::{BridgeConfig, Reply, Value};

pub trait CallObserver: Send + Sync {
    /// Called once per call, before any decoding or native work.
    fn before_invoke(&self, _method: &str, _arguments: Option<&Value>) {}

    /// Called once per call with the reply about to reach the sink.
    fn before_deliver(&self, _method: &str, _reply: &Reply) {}
}

/// Observer that records nothing.
pub struct NoopObserver;

impl CallObserver for NoopObserver {}

/// Default observer: one `tracing` record per hook.
pub struct TracingObserver {
    log_arguments: bool,
    log_results: bool,
}

impl TracingObserver {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            log_arguments: config.log_arguments,
            log_results: config.log_results,
        }
    }
}

impl CallObserver for TracingObserver {
    fn before_invoke(&self, method: &str, arguments: Option<&Value>) {
        match arguments {
            Some(args) if self.log_arguments => info!(method, %args, "call"),
            Some(args) => info!(method, kind = args.kind(), "call"),
            None => info!(method, "call without arguments"),
        }
    }

    fn before_deliver(&self, method: &str, reply: &Reply) {
        match reply {
            Reply::Ack => info!(method, "call completed"),
            Reply::Value(value) if self.log_results => info!(method, result = %value, "call completed"),
            Reply::Value(value) => info!(method, kind = value.kind(), "call completed"),
            Reply::Error(envelope) => warn!(
                method,
                code = %envelope.code,
                reason = envelope.message.as_deref().unwrap_or(""),
                "call failed"
            ),
        }
    }
}
