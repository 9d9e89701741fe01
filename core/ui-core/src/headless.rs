//! Deterministic headless host binding.
//!
//! Active when the application is composed with `BootMode::Headless`: tests
//! and host-less runs get a fully inert but schema-valid host, so UI code
//! never needs host-presence conditionals. Every capability is free of real
//! I/O and answers the same way on every machine.

use std::collections::{HashMap, HashSet};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, trace};

use spyglass_host_protocol::config::{
    DeviceSettings, HostPaths, LauncherSettings, ProcessConfig, ReleaseChannel, ServerConfig,
    Tristate, NULL_DEVICE,
};
use spyglass_host_protocol::{HostEventKind, ThemePreference, UiEvent};

use crate::binding;
use crate::bridge::{
    FileExportOptions, FileImportOptions, HostBridge, HostEventCallback, ImportedFile,
    ShortcutCallback,
};
use crate::error::Result;
use crate::shortcuts::ShortcutHandle;

/// Gate forced on in the headless gatekeeper table, for deterministic
/// feature-gate tests.
pub const TEST_PASSING_GK: &str = "TEST_PASSING_GK";
/// Gate forced off in the headless gatekeeper table.
pub const TEST_FAILING_GK: &str = "TEST_FAILING_GK";

/// The headless [`HostBridge`].
///
/// Construction captures the configuration snapshot once; from then on the
/// bridge is pure bookkeeping.
pub struct HeadlessBridge {
    config: ServerConfig,
}

impl HeadlessBridge {
    pub fn new() -> Self {
        Self {
            config: headless_config(),
        }
    }
}

impl Default for HeadlessBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the headless binding into the process-wide slot.
///
/// Idempotent: if a binding (headless or real) is already installed, that
/// binding is returned unchanged.
pub fn install() -> &'static Arc<dyn HostBridge> {
    binding::get_or_init_with(|| Arc::new(HeadlessBridge::new()))
}

/// The literal snapshot a headless run reports.
///
/// Paths are the null-device sentinel except the computed application root,
/// the real temp directory, and the real executable path. The gatekeeper
/// table is the same one `gatekeeper` consults, so the two can never
/// disagree.
fn headless_config() -> ServerConfig {
    let null = PathBuf::from(NULL_DEVICE);
    let app_path = env::current_dir().unwrap_or_else(|_| null.clone());
    ServerConfig {
        env: env::vars().collect(),
        gatekeepers: HashMap::from([
            (TEST_PASSING_GK.to_string(), true),
            (TEST_FAILING_GK.to_string(), false),
        ]),
        is_production: false,
        launcher: LauncherSettings {
            ignore_local_pin: false,
            release_channel: ReleaseChannel::Default,
        },
        paths: HostPaths {
            static_path: app_path.join("static"),
            desktop_path: null.clone(),
            exec_path: env::current_exe().unwrap_or_else(|_| null.clone()),
            home_path: null.clone(),
            temp_path: env::temp_dir(),
            app_path,
        },
        process: ProcessConfig {
            disabled_plugins: HashSet::new(),
            last_window_position: None,
            launcher_enabled: false,
            launcher_msg: None,
            screen_capture_path: null.clone(),
        },
        settings: DeviceSettings {
            android_home: null.clone(),
            dark_mode: ThemePreference::Light,
            enable_android: false,
            enable_ios: false,
            enable_physical_ios: false,
            enable_prefetching: Tristate::False,
            idb_path: null,
            show_welcome_at_startup: false,
            suppress_plugin_errors: false,
        },
        valid_web_socket_origins: Vec::new(),
    }
}

impl HostBridge for HeadlessBridge {
    fn process_id(&self) -> i32 {
        -1
    }

    fn is_production(&self) -> bool {
        false
    }

    fn read_clipboard_text(&self) -> Option<String> {
        Some(String::new())
    }

    fn write_clipboard_text(&self, _text: &str) {}

    fn import_file(&self, _options: &FileImportOptions) -> Result<Option<ImportedFile>> {
        Ok(None)
    }

    fn export_file(&self, _data: &[u8], _options: &FileExportOptions) -> Result<Option<PathBuf>> {
        Ok(None)
    }

    fn register_shortcut(&self, accelerator: &str, _callback: ShortcutCallback) -> ShortcutHandle {
        trace!(accelerator, "headless host accepts shortcut; it will never fire");
        ShortcutHandle::noop()
    }

    fn has_focus(&self) -> bool {
        true
    }

    fn should_use_dark_colors(&self) -> bool {
        false
    }

    fn on_host_event(&self, kind: HostEventKind, _callback: HostEventCallback) {
        trace!(kind = %kind, "headless host accepts subscription; events are never delivered");
    }

    fn send_ui_event(&self, event: UiEvent) {
        debug!(event = %event.kind(), "headless host dropped UI event");
    }

    fn restart(&self, _apply_update: bool) {}

    fn open_link(&self, _url: &str) {}

    fn load_default_plugins(&self) -> HashMap<String, serde_json::Value> {
        HashMap::new()
    }

    fn gatekeeper(&self, name: &str) -> bool {
        self.config.gatekeeper(name)
    }

    fn server_config(&self) -> &ServerConfig {
        &self.config
    }
}
