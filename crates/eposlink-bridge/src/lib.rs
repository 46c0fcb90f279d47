// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// eposlink bridge — typed call dispatch between the app runtime's method
// channel and the native ePOS printer SDK.
//
// A call flows decode → resolve → native → translate:
//
// - `decode` validates the untyped argument bundle into a `DecodedCall`.
// - `registry` resolves the instance id to a live printer.
// - `dispatch` runs the named operation against the `PrinterSdk`.
// - `translate` turns the outcome into a `Reply` for the completion sink.

pub mod commands;
pub mod decode;
pub mod dispatch;
pub mod observer;
pub mod params;
pub mod registry;
pub mod sdk;
pub mod simulated;
pub mod translate;

pub use decode::{ArgShape, DecodedCall};
pub use dispatch::{CompletionSink, Dispatcher, Outcome, Request};
pub use observer::{CallObserver, NoopObserver, TracingObserver};
pub use params::{Params, WireEnum};
pub use registry::{HandleRegistry, InstanceRegistry};
pub use sdk::{NativeReply, PrinterSdk};
pub use simulated::{SimulatedPrinter, SimulatedSdk};
pub use translate::translate;
