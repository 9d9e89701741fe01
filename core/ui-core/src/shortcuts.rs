//! Global shortcut registration plumbing.
//!
//! The registry is the bookkeeping side a concrete binding embeds; actually
//! grabbing the accelerator from the OS stays in the binding. The headless
//! host skips the registry entirely and hands out no-op handles.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::bridge::ShortcutCallback;

type Unregister = Box<dyn FnOnce() + Send>;

/// Handle returned by `HostBridge::register_shortcut`.
///
/// The handle is the only way to release the registration. `unregister` is
/// idempotent: the second and later calls are no-ops. Dropping the handle
/// without calling it leaves the registration in place for the rest of the
/// process.
pub struct ShortcutHandle {
    release: Mutex<Option<Unregister>>,
}

impl ShortcutHandle {
    pub(crate) fn new(release: Unregister) -> Self {
        Self {
            release: Mutex::new(Some(release)),
        }
    }

    /// Handle for hosts without a shortcut facility; `unregister` does
    /// nothing.
    pub fn noop() -> Self {
        Self {
            release: Mutex::new(None),
        }
    }

    /// Release the underlying registration. Safe to call more than once.
    pub fn unregister(&self) {
        let release = self
            .release
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(release) = release {
            release();
        }
    }
}

struct ShortcutEntry {
    id: u64,
    accelerator: String,
    callback: ShortcutCallback,
}

/// Accelerator string → registered callbacks, in registration order.
pub struct ShortcutRegistry {
    entries: Mutex<Vec<ShortcutEntry>>,
    next_id: AtomicU64,
}

impl ShortcutRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        })
    }

    /// Register `callback` under `accelerator`.
    ///
    /// The returned handle is the unique way to undo this registration; no
    /// other API removes it.
    pub fn register(
        self: &Arc<Self>,
        accelerator: &str,
        callback: ShortcutCallback,
    ) -> ShortcutHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ShortcutEntry {
                id,
                accelerator: accelerator.to_string(),
                callback,
            });
        debug!(accelerator, "shortcut registered");

        // Weak so an outstanding handle does not keep the binding's registry
        // alive past teardown.
        let registry = Arc::downgrade(self);
        ShortcutHandle::new(Box::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.remove(id);
            }
        }))
    }

    fn remove(&self, id: u64) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|entry| entry.id != id);
    }

    /// Invoke every callback currently registered for `accelerator`, in
    /// registration order. Bindings call this when the OS reports the
    /// accelerator fired; tests use it to simulate that. Returns the number
    /// of callbacks invoked.
    pub fn trigger(&self, accelerator: &str) -> usize {
        let callbacks: Vec<ShortcutCallback> = self
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|entry| entry.accelerator == accelerator)
            .map(|entry| entry.callback.clone())
            .collect();
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    pub fn is_registered(&self, accelerator: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|entry| entry.accelerator == accelerator)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
