//! Fan-out delivery of host→UI events.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use spyglass_host_protocol::{HostEvent, HostEventKind};

use crate::bridge::HostEventCallback;

/// Multi-subscriber dispatch table for host→UI events.
///
/// Concrete bindings feed frames received from the host process into
/// [`EventBus::publish`]; UI code subscribes per event kind. Registration
/// order is preserved per kind, and there is no unsubscribe: a registration
/// lives for the rest of the process, matching the contract of
/// `HostBridge::on_host_event`.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<HashMap<HostEventKind, Vec<HostEventCallback>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for every future occurrence of `kind`.
    pub fn subscribe<F>(&self, kind: HostEventKind, callback: F)
    where
        F: Fn(&HostEvent) + Send + Sync + 'static,
    {
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(kind)
            .or_default()
            .push(Arc::new(callback));
    }

    /// Register an already-boxed callback; the form `HostBridge`
    /// implementations receive.
    pub fn subscribe_callback(&self, kind: HostEventKind, callback: HostEventCallback) {
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(kind)
            .or_default()
            .push(callback);
    }

    /// Deliver one event occurrence to every subscriber of its kind, in
    /// registration order. Returns the number of callbacks invoked; zero
    /// subscribers is a silent no-op, not an error.
    ///
    /// Delivery is synchronous, so feeding frames in receipt order gives the
    /// per-kind first-emitted, first-delivered guarantee for free.
    pub fn publish(&self, event: &HostEvent) -> usize {
        // Snapshot under the lock, invoke outside it, so a callback may
        // subscribe re-entrantly. Late subscriptions take effect from the
        // next publish.
        let callbacks: Vec<HostEventCallback> = {
            let subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
            subscribers.get(&event.kind()).cloned().unwrap_or_default()
        };
        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }

    pub fn subscriber_count(&self, kind: HostEventKind) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&kind)
            .map_or(0, Vec::len)
    }
}
