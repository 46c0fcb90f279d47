// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// eposlink harness — stands in for the app runtime's method channel.
//
// Reads one JSON request per stdin line (`{"method": ..., "arguments": ...}`),
// dispatches it against the simulated SDK and writes one JSON reply per line
// to stdout. Logs go to stderr.
//
// Instance lifecycle belongs to the registry owner, not the bridge, so the
// harness answers `createPrinter` and `disposePrinter` itself.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use eposlink_bridge::decode::decode_id_only;
use eposlink_bridge::{Dispatcher, HandleRegistry, InstanceRegistry, Request, SimulatedPrinter, SimulatedSdk, translate};
use eposlink_core::envelope::CODE_UNKNOWN;
use eposlink_core::{BridgeConfig, BridgeError, ErrorEnvelope, Reply, Value};

/// Environment variable naming an optional JSON config file.
const CONFIG_ENV: &str = "EPOSLINK_CONFIG";

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load config");
            std::process::exit(2);
        }
    };
    tracing::info!(?config, "eposlink harness starting");

    let registry = Arc::new(InstanceRegistry::<SimulatedPrinter>::new());
    let dispatcher = Dispatcher::new(Arc::new(SimulatedSdk::new()), registry.clone(), config);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "stdin read failed");
                break;
            }
        };
        let Some(reply) = reply_for_line(&dispatcher, registry.as_ref(), &line) else {
            continue;
        };

        if writeln!(stdout, "{}", encode(&reply)).and_then(|()| stdout.flush()).is_err() {
            tracing::error!("stdout closed");
            break;
        }
    }

    tracing::info!(live_instances = registry.len(), "eposlink harness stopped");
}

fn load_config() -> Result<BridgeConfig, eposlink_core::ConfigError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => BridgeConfig::load(path),
        None => Ok(BridgeConfig::default()),
    }
}

/// Reply for one stdin line; `None` for a blank line.
fn reply_for_line(
    dispatcher: &Dispatcher<SimulatedSdk>,
    registry: &InstanceRegistry<SimulatedPrinter>,
    line: &str,
) -> Option<Reply> {
    if line.trim().is_empty() {
        return None;
    }
    let reply = match serde_json::from_str::<Request>(line) {
        Ok(request) => handle(dispatcher, registry, request),
        Err(e) => {
            tracing::warn!(error = %e, "unparseable request line");
            translate("<request>", Err(BridgeError::MalformedArguments))
        }
    };
    Some(reply)
}

fn handle(
    dispatcher: &Dispatcher<SimulatedSdk>,
    registry: &InstanceRegistry<SimulatedPrinter>,
    request: Request,
) -> Reply {
    match request.method.as_str() {
        "createPrinter" => {
            let id = registry.register(SimulatedPrinter::new());
            Reply::Value(Value::from(id))
        }
        "disposePrinter" => {
            let outcome = decode_id_only(request.arguments.as_ref()).and_then(|call| {
                registry
                    .unregister(call.handle_id)
                    .map(|_| None)
                    .ok_or(BridgeError::UnknownHandle(call.handle_id))
            });
            translate(&request.method, outcome)
        }
        _ => {
            let mut reply = None;
            dispatcher.handle(request, |r: Reply| reply = Some(r));
            reply.unwrap_or_else(|| {
                Reply::Error(ErrorEnvelope::new(CODE_UNKNOWN, Some("no reply delivered".into()), None))
            })
        }
    }
}

fn encode(reply: &Reply) -> String {
    serde_json::to_string(reply).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "reply not representable as JSON");
        let fallback = ErrorEnvelope::new(CODE_UNKNOWN, Some(e.to_string()), None);
        serde_json::to_string(&fallback).unwrap_or_else(|_| String::from("null"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harness() -> (Dispatcher<SimulatedSdk>, Arc<InstanceRegistry<SimulatedPrinter>>) {
        let registry = Arc::new(InstanceRegistry::new());
        let dispatcher = Dispatcher::new(
            Arc::new(SimulatedSdk::new()),
            registry.clone(),
            BridgeConfig::default(),
        );
        (dispatcher, registry)
    }

    fn reply(line: &str) -> Reply {
        let (dispatcher, registry) = harness();
        reply_for_line(&dispatcher, &registry, line).expect("non-blank line")
    }

    fn code(reply: &Reply) -> Option<&str> {
        reply.error().map(|e| e.code.as_str())
    }

    #[test]
    fn create_printer_returns_fresh_ids() {
        let (dispatcher, registry) = harness();
        let line = r#"{"method": "createPrinter"}"#;
        let first = reply_for_line(&dispatcher, &registry, line).expect("reply");
        let second = reply_for_line(&dispatcher, &registry, line).expect("reply");

        assert!(matches!(first, Reply::Value(Value::Int(_))));
        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn dispose_unknown_id_is_invalid_instance() {
        let r = reply(r#"{"method": "disposePrinter", "arguments": {"id": 42}}"#);
        assert_eq!(code(&r), Some("lib-InvalidInstanceId"));
        assert_eq!(r.error().and_then(|e| e.message.as_deref()), Some("Invalid instance id 42"));
    }

    #[test]
    fn dispose_without_id_is_bad_marshal() {
        let r = reply(r#"{"method": "disposePrinter", "arguments": {"printer": 1}}"#);
        assert_eq!(code(&r), Some("lib-BadMarshal"));
        assert_eq!(r.error().and_then(|e| e.details.as_deref()), Some("disposePrinter"));
    }

    #[test]
    fn dispose_then_call_is_invalid_instance() {
        let (dispatcher, registry) = harness();
        let id = registry.register(SimulatedPrinter::new());
        let dispose = format!(r#"{{"method": "disposePrinter", "arguments": {{"id": {id}}}}}"#);
        assert_eq!(reply_for_line(&dispatcher, &registry, &dispose), Some(Reply::Ack));

        let status = format!(r#"{{"method": "getStatus", "arguments": {{"id": {id}}}}}"#);
        let r = reply_for_line(&dispatcher, &registry, &status).expect("reply");
        assert_eq!(code(&r), Some("lib-InvalidInstanceId"));
    }

    #[test]
    fn unparseable_line_is_bad_marshal() {
        let r = reply("{not json");
        assert_eq!(code(&r), Some("lib-BadMarshal"));
        assert_eq!(r.error().and_then(|e| e.details.as_deref()), Some("<request>"));
    }

    #[test]
    fn blank_line_produces_no_reply() {
        let (dispatcher, registry) = harness();
        assert_eq!(reply_for_line(&dispatcher, &registry, "   "), None);
    }

    #[test]
    fn bridge_methods_are_forwarded() {
        let (dispatcher, registry) = harness();
        let id = registry.register(SimulatedPrinter::new());
        let line = format!(
            r#"{{"method": "connect", "arguments": {{"id": {id}, "args": {{"target": "TCP:192.168.0.20"}}}}}}"#
        );
        assert_eq!(reply_for_line(&dispatcher, &registry, &line), Some(Reply::Ack));
        assert_eq!(encode(&Reply::Ack), "null");
    }
}
