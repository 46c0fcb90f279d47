// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dispatch core: one named call → decode → resolve → native → outcome.
//
// Runs synchronously on the caller's thread. A native call that blocks
// blocks the dispatch; offloading is the transport's business. Nothing is
// retried and nothing is cached between calls.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use eposlink_core::{BridgeConfig, BridgeError, Reply, Result, Value};

use crate::commands;
use crate::decode::{ArgShape, decode};
use crate::observer::{CallObserver, TracingObserver};
use crate::params::Params;
use crate::registry::{HandleRegistry, resolve};
use crate::sdk::{NativeReply, PrinterSdk};
use crate::translate::translate;

/// Result of one dispatch before translation: a payload (or none) on
/// success, a taxonomy error otherwise.
pub type Outcome = Result<Option<Value>>;

/// One inbound call as handed over by the transport.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Request {
    pub method: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl Request {
    pub fn new(method: impl Into<String>, arguments: Option<Value>) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// Receives the single reply for a call.
pub trait CompletionSink {
    fn deliver(self, reply: Reply);
}

impl<F: FnOnce(Reply)> CompletionSink for F {
    fn deliver(self, reply: Reply) {
        self(reply)
    }
}

/// Operation body: decode its own params, call the SDK.
type Handler<S> =
    Box<dyn Fn(&S, &<S as PrinterSdk>::Printer, &Params) -> Result<NativeReply> + Send + Sync>;

struct Operation<S: PrinterSdk> {
    shape: ArgShape,
    handler: Handler<S>,
}

/// Routes named calls to operations against registry-owned printers.
pub struct Dispatcher<S: PrinterSdk> {
    sdk: Arc<S>,
    registry: Arc<dyn HandleRegistry<S::Printer>>,
    config: BridgeConfig,
    observer: Box<dyn CallObserver>,
    operations: HashMap<String, Operation<S>>,
}

impl<S: PrinterSdk + 'static> Dispatcher<S> {
    /// Dispatcher with every built-in printer command registered and the
    /// tracing observer installed.
    pub fn new(
        sdk: Arc<S>,
        registry: Arc<dyn HandleRegistry<S::Printer>>,
        config: BridgeConfig,
    ) -> Self {
        let observer = Box::new(TracingObserver::new(&config));
        let mut dispatcher = Self {
            sdk,
            registry,
            config,
            observer,
            operations: HashMap::new(),
        };
        for spec in commands::CATALOGUE {
            let build = spec.build;
            dispatcher.register(spec.method, spec.shape, move |sdk, printer, params| {
                let command = build(params)?;
                Ok(sdk.execute(printer, &command))
            });
        }
        dispatcher
    }

    /// Replace the observer.
    pub fn with_observer(mut self, observer: impl CallObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Add or replace the operation behind `method`.
    pub fn register<F>(&mut self, method: impl Into<String>, shape: ArgShape, handler: F) -> &mut Self
    where
        F: Fn(&S, &S::Printer, &Params) -> Result<NativeReply> + Send + Sync + 'static,
    {
        self.operations.insert(
            method.into(),
            Operation {
                shape,
                handler: Box::new(handler),
            },
        );
        self
    }

    /// Run one call to an untranslated outcome.
    ///
    /// Fails fast: a decode failure never resolves, a resolve failure never
    /// reaches the SDK. A panic in the registry or the operation is caught
    /// here and reported as `Internal`.
    #[instrument(skip_all, fields(method = %method))]
    pub fn dispatch(&self, method: &str, arguments: Option<&Value>) -> Outcome {
        panic::catch_unwind(AssertUnwindSafe(|| self.run(method, arguments)))
            .unwrap_or_else(|payload| Err(BridgeError::Internal(panic_message(payload.as_ref()))))
    }

    fn run(&self, method: &str, arguments: Option<&Value>) -> Outcome {
        self.observe(method, |o| o.before_invoke(method, arguments));

        let operation = self
            .operations
            .get(method)
            .ok_or_else(|| BridgeError::UnknownMethod(method.to_owned()))?;
        let call = decode(arguments, operation.shape, self.config.missing_args)?;
        let printer = resolve(self.registry.as_ref(), call.handle_id)?;
        let params = call.params.unwrap_or_default();

        let reply = (operation.handler)(self.sdk.as_ref(), printer.as_ref(), &params)?;

        debug!(
            id = call.handle_id,
            status = %reply.status,
            meaning = reply.status.description(),
            "native call returned"
        );
        reply.into_result()
    }

    /// Dispatch and translate.
    pub fn call(&self, method: &str, arguments: Option<&Value>) -> Reply {
        let reply = translate(method, self.dispatch(method, arguments));
        self.observe(method, |o| o.before_deliver(method, &reply));
        reply
    }

    /// Run an observer hook; a panicking observer is logged and ignored.
    fn observe(&self, method: &str, hook: impl FnOnce(&dyn CallObserver)) {
        if panic::catch_unwind(AssertUnwindSafe(|| hook(self.observer.as_ref()))).is_err() {
            warn!(method, "call observer panicked");
        }
    }

    /// Handle a transport request, delivering exactly one reply to `sink`.
    pub fn handle(&self, request: Request, sink: impl CompletionSink) {
        let reply = self.call(&request.method, request.arguments.as_ref());
        sink.deliver(reply);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "native operation panicked".to_owned()
    }
}
