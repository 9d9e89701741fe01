//! The host capability contract.
//!
//! [`HostBridge`] is the single surface the UI may use to reach its host
//! environment. The native shell and the browser bridge each implement it
//! outside this crate; [`crate::headless`] provides the deterministic
//! in-process one. UI code programs against the trait and never learns which
//! host is underneath.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use spyglass_host_protocol::config::ServerConfig;
use spyglass_host_protocol::{HostEvent, HostEventKind, UiEvent};

use crate::error::Result;
use crate::shortcuts::ShortcutHandle;

/// Callback invoked once per delivered host→UI event occurrence.
pub type HostEventCallback = Arc<dyn Fn(&HostEvent) + Send + Sync>;

/// Callback invoked when a registered global shortcut fires.
pub type ShortcutCallback = Arc<dyn Fn() + Send + Sync>;

/// Options for the save-path picker of the legacy dialog capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveDialogOptions {
    pub default_path: Option<PathBuf>,
    pub message: Option<String>,
    pub title: Option<String>,
}

/// Extension filter for the open-path picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFilter {
    pub extensions: Vec<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenDialogOptions {
    pub default_path: Option<PathBuf>,
    pub filter: Option<FileFilter>,
}

/// Low-level dialog operations kept for hosts that still expose them.
///
/// `None` from any operation means the user cancelled. That is normal
/// control flow, never an error.
pub trait LegacyDialogs {
    fn show_save_dialog(&self, options: &SaveDialogOptions) -> Option<PathBuf>;
    fn show_open_dialog(&self, options: &OpenDialogOptions) -> Option<PathBuf>;
    fn select_directory(&self, default_path: Option<&Path>) -> Option<PathBuf>;
}

/// Options for the newer file-import surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileImportOptions {
    pub default_path: Option<PathBuf>,
    pub extensions: Vec<String>,
    pub title: Option<String>,
}

/// A file the user picked for import, with its contents already read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedFile {
    pub name: String,
    pub path: Option<PathBuf>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileExportOptions {
    pub default_path: Option<PathBuf>,
    pub title: Option<String>,
    pub message: Option<String>,
}

/// Live connection to the privileged backend, present only in full-host mode.
///
/// The backend collaborator implements this; the UI only ever holds it as a
/// handle. Messages are best-effort: a torn-down backend drops them.
pub trait ServerLink: Send + Sync {
    fn is_connected(&self) -> bool;

    /// Queue one message toward the backend. Returns `false` when the
    /// connection is gone; callers must not treat that as an error.
    fn try_send(&self, message: Value) -> bool;
}

/// Utilities provided by the host environment backing a UI instance.
///
/// Implementors should:
/// - Keep the probes (`has_focus`, `should_use_dark_colors`, `gatekeeper`)
///   side-effect free; the UI may call them on every render.
/// - Never panic from `gatekeeper`; unknown gate names resolve to `false`.
/// - Treat `send_ui_event` as best-effort: a send to a torn-down host is
///   swallowed, not surfaced.
///
/// Exactly one implementation is bound per process, at bootstrap, via
/// [`crate::binding`].
pub trait HostBridge: Send + Sync {
    /// OS process id of the UI process; `-1` in headless mode.
    fn process_id(&self) -> i32;

    fn is_production(&self) -> bool;

    /// Clipboard read; `None` when the host cannot read the clipboard.
    fn read_clipboard_text(&self) -> Option<String>;

    /// Clipboard write. No failure is signalled.
    fn write_clipboard_text(&self, text: &str);

    /// Legacy dialog capability, if this host still supports it.
    ///
    /// Callers branch on the returned capability rather than probing
    /// individual methods for presence.
    fn legacy_dialogs(&self) -> Option<&dyn LegacyDialogs> {
        None
    }

    /// Let the user pick a file and read it. `Ok(None)` means cancelled.
    fn import_file(&self, options: &FileImportOptions) -> Result<Option<ImportedFile>>;

    /// Let the user pick a destination and write `data` there.
    /// `Ok(None)` means cancelled.
    fn export_file(&self, data: &[u8], options: &FileExportOptions) -> Result<Option<PathBuf>>;

    /// Register a global shortcut.
    ///
    /// The returned handle is the unique way to reverse this registration;
    /// calling [`ShortcutHandle::unregister`] more than once is a safe no-op.
    fn register_shortcut(&self, accelerator: &str, callback: ShortcutCallback) -> ShortcutHandle;

    fn has_focus(&self) -> bool;

    fn should_use_dark_colors(&self) -> bool;

    /// Subscribe to host→UI events of `kind`.
    ///
    /// Fan-out: every registration for a kind is invoked per occurrence, in
    /// registration order. Occurrences of the same kind are delivered
    /// first-emitted, first-delivered; ordering across kinds is not
    /// guaranteed. There is no unsubscribe; callers needing cleanup layer
    /// their own bookkeeping.
    fn on_host_event(&self, kind: HostEventKind, callback: HostEventCallback);

    /// Send one UI→host event. Fire-and-forget: no acknowledgment, and a
    /// send to an unreachable host is silently dropped.
    fn send_ui_event(&self, event: UiEvent);

    /// Restart the host, optionally applying a staged update first.
    fn restart(&self, apply_update: bool);

    /// Open `url` in the system browser.
    fn open_link(&self, url: &str);

    /// Plugin id → bundled module value. Ownership of the returned values
    /// transfers to the caller.
    fn load_default_plugins(&self) -> HashMap<String, Value>;

    /// Feature-gate lookup. Must never panic; unknown names are `false`.
    fn gatekeeper(&self, name: &str) -> bool;

    /// Connection to the privileged backend, in full-host mode only.
    fn server(&self) -> Option<Arc<dyn ServerLink>> {
        None
    }

    /// The host-produced configuration snapshot, immutable for the process
    /// lifetime.
    fn server_config(&self) -> &ServerConfig;
}
