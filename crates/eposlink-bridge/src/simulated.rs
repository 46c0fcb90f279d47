// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Simulated SDK for desktop/CI builds where the vendor library is absent.
//
// Models the printer state machine closely enough to produce the same status
// codes the real SDK returns for misuse (send before connect, nested
// transactions, out-of-range arguments). Printed output is kept in memory.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use eposlink_core::{StatusCode, Value};

use crate::commands::{PARAM_DEFAULT, PrinterCommand};
use crate::sdk::{NativeReply, PrinterSdk};

/// Accepted `connect` target prefixes.
const TARGET_PREFIXES: &[&str] = &["TCP:", "TCPS:", "BT:", "USB:"];

/// Accepted explicit `sendData` timeout range (milliseconds).
const SEND_TIMEOUT_RANGE: std::ops::RangeInclusive<i32> = 5_000..=600_000;

/// Maximum `addFeedLine` count.
const MAX_FEED_LINES: i32 = 255;

/// One simulated printer instance.
#[derive(Default)]
pub struct SimulatedPrinter {
    state: Mutex<PrinterState>,
}

#[derive(Default)]
struct PrinterState {
    connected_to: Option<String>,
    in_transaction: bool,
    buffer: Vec<PrinterCommand>,
    printed: Vec<Vec<PrinterCommand>>,
}

impl SimulatedPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connected_to(&self) -> Option<String> {
        self.lock().connected_to.clone()
    }

    /// Commands queued since the last send or clear.
    pub fn buffered(&self) -> Vec<PrinterCommand> {
        self.lock().buffer.clone()
    }

    /// Every buffer flushed by `sendData`, oldest first.
    pub fn printed(&self) -> Vec<Vec<PrinterCommand>> {
        self.lock().printed.clone()
    }

    fn lock(&self) -> MutexGuard<'_, PrinterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Simulated SDK. Every target is reachable unless marked otherwise.
#[derive(Default)]
pub struct SimulatedSdk {
    unreachable: HashSet<String>,
}

impl SimulatedSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `connect` to `target` fail with `ERR_CONNECT`.
    pub fn with_unreachable(mut self, target: impl Into<String>) -> Self {
        self.unreachable.insert(target.into());
        self
    }

    fn connect(&self, state: &mut PrinterState, target: &str) -> StatusCode {
        if state.connected_to.is_some() {
            return StatusCode::ERR_ILLEGAL;
        }
        if !TARGET_PREFIXES.iter().any(|prefix| target.starts_with(prefix)) {
            return StatusCode::ERR_PARAM;
        }
        if self.unreachable.contains(target) {
            warn!(target, "simulated printer unreachable");
            return StatusCode::ERR_CONNECT;
        }
        info!(target, "simulated printer connected");
        state.connected_to = Some(target.to_owned());
        StatusCode::SUCCESS
    }
}

impl PrinterSdk for SimulatedSdk {
    type Printer = SimulatedPrinter;

    fn execute(&self, printer: &SimulatedPrinter, command: &PrinterCommand) -> NativeReply {
        let mut state = printer.lock();
        debug!(?command, "simulated SDK call");

        let status = match command {
            PrinterCommand::Connect { target, .. } => self.connect(&mut state, target),
            PrinterCommand::Disconnect => {
                if state.connected_to.take().is_none() {
                    StatusCode::ERR_ILLEGAL
                } else {
                    state.in_transaction = false;
                    StatusCode::SUCCESS
                }
            }
            PrinterCommand::BeginTransaction => {
                if state.connected_to.is_none() || state.in_transaction {
                    StatusCode::ERR_ILLEGAL
                } else {
                    state.in_transaction = true;
                    StatusCode::SUCCESS
                }
            }
            PrinterCommand::EndTransaction => {
                if !state.in_transaction {
                    StatusCode::ERR_ILLEGAL
                } else {
                    state.in_transaction = false;
                    StatusCode::SUCCESS
                }
            }
            PrinterCommand::ClearCommandBuffer => {
                state.buffer.clear();
                StatusCode::SUCCESS
            }
            PrinterCommand::AddFeedLine { line } if !(0..=MAX_FEED_LINES).contains(line) => {
                StatusCode::ERR_PARAM
            }
            cmd if cmd.is_buffered() => {
                state.buffer.push(cmd.clone());
                StatusCode::SUCCESS
            }
            PrinterCommand::SendData { timeout } => {
                if *timeout != PARAM_DEFAULT && !SEND_TIMEOUT_RANGE.contains(timeout) {
                    StatusCode::ERR_PARAM
                } else if state.connected_to.is_none() || state.buffer.is_empty() {
                    StatusCode::ERR_ILLEGAL
                } else {
                    let job = std::mem::take(&mut state.buffer);
                    info!(commands = job.len(), "simulated print job sent");
                    state.printed.push(job);
                    StatusCode::SUCCESS
                }
            }
            PrinterCommand::GetStatus => {
                let connected = state.connected_to.is_some();
                return NativeReply::with_payload(Value::map([
                    ("connection", Value::from(connected)),
                    ("online", Value::from(connected)),
                    ("transaction", Value::from(state.in_transaction)),
                    ("buffered", Value::from(state.buffer.len() as i64)),
                ]));
            }
            _ => StatusCode::ERR_UNSUPPORTED,
        };

        NativeReply::failed(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CutType;

    fn run(sdk: &SimulatedSdk, printer: &SimulatedPrinter, command: PrinterCommand) -> StatusCode {
        sdk.execute(printer, &command).status
    }

    fn connect(target: &str) -> PrinterCommand {
        PrinterCommand::Connect {
            target: target.into(),
            timeout: PARAM_DEFAULT,
        }
    }

    #[test]
    fn full_receipt_flow() {
        let sdk = SimulatedSdk::new();
        let printer = SimulatedPrinter::new();

        assert_eq!(run(&sdk, &printer, connect("TCP:192.168.0.20")), StatusCode::SUCCESS);
        assert_eq!(run(&sdk, &printer, PrinterCommand::BeginTransaction), StatusCode::SUCCESS);
        assert_eq!(
            run(&sdk, &printer, PrinterCommand::AddText { data: "Total 4.20\n".into() }),
            StatusCode::SUCCESS
        );
        assert_eq!(
            run(&sdk, &printer, PrinterCommand::AddCut { cut: CutType::Feed }),
            StatusCode::SUCCESS
        );
        assert_eq!(
            run(&sdk, &printer, PrinterCommand::SendData { timeout: PARAM_DEFAULT }),
            StatusCode::SUCCESS
        );
        assert_eq!(run(&sdk, &printer, PrinterCommand::EndTransaction), StatusCode::SUCCESS);

        assert_eq!(printer.printed().len(), 1);
        assert_eq!(printer.printed()[0].len(), 2);
        assert!(printer.buffered().is_empty());
    }

    #[test]
    fn send_before_connect_is_illegal() {
        let sdk = SimulatedSdk::new();
        let printer = SimulatedPrinter::new();
        run(&sdk, &printer, PrinterCommand::AddText { data: "x".into() });
        assert_eq!(
            run(&sdk, &printer, PrinterCommand::SendData { timeout: PARAM_DEFAULT }),
            StatusCode::ERR_ILLEGAL
        );
    }

    #[test]
    fn connect_errors() {
        let sdk = SimulatedSdk::new().with_unreachable("TCP:10.0.0.9");
        let printer = SimulatedPrinter::new();
        assert_eq!(run(&sdk, &printer, connect("192.168.0.20")), StatusCode::ERR_PARAM);
        assert_eq!(run(&sdk, &printer, connect("TCP:10.0.0.9")), StatusCode::ERR_CONNECT);
        assert_eq!(run(&sdk, &printer, connect("BT:00:01:90:AA:BB:CC")), StatusCode::SUCCESS);
        assert_eq!(run(&sdk, &printer, connect("BT:00:01:90:AA:BB:CC")), StatusCode::ERR_ILLEGAL);
        assert_eq!(printer.connected_to().as_deref(), Some("BT:00:01:90:AA:BB:CC"));
    }

    #[test]
    fn out_of_range_arguments_are_err_param() {
        let sdk = SimulatedSdk::new();
        let printer = SimulatedPrinter::new();
        assert_eq!(
            run(&sdk, &printer, PrinterCommand::AddFeedLine { line: 256 }),
            StatusCode::ERR_PARAM
        );
        assert_eq!(
            run(&sdk, &printer, PrinterCommand::SendData { timeout: 10 }),
            StatusCode::ERR_PARAM
        );
    }

    #[test]
    fn status_reports_buffer_depth() {
        let sdk = SimulatedSdk::new();
        let printer = SimulatedPrinter::new();
        run(&sdk, &printer, PrinterCommand::AddFeedLine { line: 3 });
        let reply = sdk.execute(&printer, &PrinterCommand::GetStatus);
        let payload = reply.into_result().expect("status ok").expect("payload");
        let map = payload.as_map().expect("map");
        assert_eq!(map["buffered"], Value::Int(1));
        assert_eq!(map["connection"], Value::Bool(false));
    }
}
