// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Instance registry and handle resolution.
//
// The registry owns every live native instance and hands out opaque `i32`
// ids to the app runtime. The dispatcher only borrows an `Arc` for the span
// of one call and never caches it; the instance may be unregistered between
// calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use eposlink_core::{BridgeError, Result};

/// Lookup service mapping opaque ids to live instances.
pub trait HandleRegistry<H>: Send + Sync {
    fn lookup(&self, id: i32) -> Option<Arc<H>>;

    /// Take ownership of a new instance and return its id.
    fn register(&self, handle: H) -> i32;

    /// Drop the registry's reference. Calls already holding the `Arc`
    /// finish against it.
    fn unregister(&self, id: i32) -> Option<Arc<H>>;
}

/// Resolve a decoded id to a live instance.
pub fn resolve<H, R>(registry: &R, id: i32) -> Result<Arc<H>>
where
    R: HandleRegistry<H> + ?Sized,
{
    registry.lookup(id).ok_or(BridgeError::UnknownHandle(id))
}

/// In-process registry. Ids start at 1 and increase monotonically. A live id
/// is never handed out again; once the `i32` space wraps, only ids that have
/// been unregistered are reused.
pub struct InstanceRegistry<H> {
    inner: Mutex<Inner<H>>,
}

struct Inner<H> {
    next_id: i32,
    instances: HashMap<i32, Arc<H>>,
}

impl<H> Inner<H> {
    /// Next id not held by a live instance. After the counter passes
    /// `i32::MAX` it restarts at 1 and skips occupied ids; with `n` live
    /// instances a free id is found within `n + 1` steps.
    fn claim_id(&mut self) -> i32 {
        loop {
            let id = self.next_id;
            self.next_id = match self.next_id.checked_add(1) {
                Some(next) => next,
                None => 1,
            };
            if !self.instances.contains_key(&id) {
                return id;
            }
        }
    }
}

impl<H> InstanceRegistry<H> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                instances: HashMap::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned guard is still usable.
    fn lock(&self) -> MutexGuard<'_, Inner<H>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<H> Default for InstanceRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Send + Sync> HandleRegistry<H> for InstanceRegistry<H> {
    fn lookup(&self, id: i32) -> Option<Arc<H>> {
        self.lock().instances.get(&id).cloned()
    }

    fn register(&self, handle: H) -> i32 {
        let mut inner = self.lock();
        let id = inner.claim_id();
        inner.instances.insert(id, Arc::new(handle));
        debug!(id, "instance registered");
        id
    }

    fn unregister(&self, id: i32) -> Option<Arc<H>> {
        let removed = self.lock().instances.remove(&id);
        debug!(id, found = removed.is_some(), "instance unregistered");
        removed
    }
}
