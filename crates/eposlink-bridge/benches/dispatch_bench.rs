// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for argument decoding and full dispatch against the
// simulated SDK.

use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use eposlink_bridge::decode::{ArgShape, decode};
use eposlink_bridge::{Dispatcher, HandleRegistry, InstanceRegistry, NoopObserver, SimulatedPrinter, SimulatedSdk};
use eposlink_core::{BridgeConfig, MissingArgsPolicy, Value};

fn text_call(id: i32) -> Value {
    Value::map([
        ("id", Value::from(id)),
        ("args", Value::map([("data", "Flat white          3.20\n")])),
    ])
}

fn bench_decode(c: &mut Criterion) {
    let args = text_call(1);
    c.bench_function("decode_id_with_args", |b| {
        b.iter(|| {
            decode(
                black_box(Some(&args)),
                ArgShape::IdWithArgs,
                MissingArgsPolicy::Reject,
            )
        })
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let registry = Arc::new(InstanceRegistry::new());
    let id = registry.register(SimulatedPrinter::new());
    let dispatcher = Dispatcher::new(Arc::new(SimulatedSdk::new()), registry, BridgeConfig::default())
        .with_observer(NoopObserver);

    let text = text_call(id);
    c.bench_function("dispatch_add_text", |b| {
        b.iter(|| {
            let reply = dispatcher.call("addText", black_box(Some(&text)));
            // keep the simulated buffer from growing across iterations
            dispatcher.call("clearCommandBuffer", Some(&Value::map([("id", id)])));
            reply
        })
    });

    let stale = Value::map([("id", id + 1000)]);
    c.bench_function("dispatch_invalid_instance", |b| {
        b.iter(|| dispatcher.call("disconnect", black_box(Some(&stale))))
    });
}

criterion_group!(benches, bench_decode, bench_dispatch);
criterion_main!(benches);
