//! Host-produced configuration snapshot consumed by the UI.
//!
//! The snapshot is captured once at host startup and is immutable for the
//! process lifetime. Persistence of the underlying settings belongs to the
//! host; this crate only defines the shape that crosses the boundary.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::env;
use std::path::PathBuf;

use crate::ThemePreference;

/// Sentinel path reported where a headless or partially-configured host has
/// no real location to offer.
pub const NULL_DEVICE: &str = "/dev/null";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
    Default,
    Stable,
    Insiders,
}

/// Three-valued toggle for settings the user may leave undecided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tristate {
    True,
    False,
    Unset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherSettings {
    pub ignore_local_pin: bool,
    pub release_channel: ReleaseChannel,
}

/// Filesystem locations detected by the host at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostPaths {
    pub app_path: PathBuf,
    pub desktop_path: PathBuf,
    pub exec_path: PathBuf,
    pub home_path: PathBuf,
    pub static_path: PathBuf,
    pub temp_path: PathBuf,
}

impl HostPaths {
    /// Detect real host paths relative to the application root.
    ///
    /// Locations that cannot be resolved fall back to the null device rather
    /// than failing; the UI can always render without them.
    pub fn detect(app_path: PathBuf) -> Self {
        let null = PathBuf::from(NULL_DEVICE);
        Self {
            static_path: app_path.join("static"),
            desktop_path: dirs::desktop_dir().unwrap_or_else(|| null.clone()),
            exec_path: env::current_exe().unwrap_or_else(|_| null.clone()),
            home_path: dirs::home_dir().unwrap_or_else(|| null.clone()),
            temp_path: env::temp_dir(),
            app_path,
        }
    }
}

/// Persisted window geometry from the previous run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Process-level state the launcher and shell carry across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessConfig {
    #[serde(default)]
    pub disabled_plugins: HashSet<String>,
    #[serde(default)]
    pub last_window_position: Option<WindowRect>,
    pub launcher_enabled: bool,
    #[serde(default)]
    pub launcher_msg: Option<String>,
    pub screen_capture_path: PathBuf,
}

/// Device-integration settings mirrored into the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSettings {
    pub android_home: PathBuf,
    pub dark_mode: ThemePreference,
    pub enable_android: bool,
    pub enable_ios: bool,
    pub enable_physical_ios: bool,
    pub enable_prefetching: Tristate,
    pub idb_path: PathBuf,
    pub show_welcome_at_startup: bool,
    pub suppress_plugin_errors: bool,
}

/// The full host-produced snapshot.
///
/// Read-only from the UI's perspective: environment and path values are
/// captured once, and no API in this layer mutates them afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub env: HashMap<String, String>,
    pub gatekeepers: HashMap<String, bool>,
    pub is_production: bool,
    pub launcher: LauncherSettings,
    pub paths: HostPaths,
    pub process: ProcessConfig,
    pub settings: DeviceSettings,
    #[serde(default)]
    pub valid_web_socket_origins: Vec<String>,
}

impl ServerConfig {
    /// Feature-gate lookup. Unknown gate names resolve to `false`.
    pub fn gatekeeper(&self, name: &str) -> bool {
        self.gatekeepers.get(name).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ServerConfig {
        let null = PathBuf::from(NULL_DEVICE);
        ServerConfig {
            env: HashMap::from([("SPYGLASS_PORT".to_string(), "52342".to_string())]),
            gatekeepers: HashMap::from([("timeline_v2".to_string(), true)]),
            is_production: true,
            launcher: LauncherSettings {
                ignore_local_pin: false,
                release_channel: ReleaseChannel::Stable,
            },
            paths: HostPaths::detect(PathBuf::from("/opt/spyglass")),
            process: ProcessConfig {
                disabled_plugins: HashSet::from(["network".to_string()]),
                last_window_position: Some(WindowRect {
                    x: 10,
                    y: 20,
                    width: 1280,
                    height: 800,
                }),
                launcher_enabled: true,
                launcher_msg: None,
                screen_capture_path: null.clone(),
            },
            settings: DeviceSettings {
                android_home: null.clone(),
                dark_mode: ThemePreference::System,
                enable_android: true,
                enable_ios: false,
                enable_physical_ios: false,
                enable_prefetching: Tristate::Unset,
                idb_path: null,
                show_welcome_at_startup: true,
                suppress_plugin_errors: false,
            },
            valid_web_socket_origins: vec!["app://spyglass".to_string()],
        }
    }

    #[test]
    fn gatekeeper_defaults_to_false_for_unknown_names() {
        let config = snapshot();
        assert!(config.gatekeeper("timeline_v2"));
        assert!(!config.gatekeeper("does_not_exist"));
        assert!(!config.gatekeeper(""));
    }

    #[test]
    fn detect_derives_static_path_from_app_root() {
        let paths = HostPaths::detect(PathBuf::from("/opt/spyglass"));
        assert_eq!(paths.app_path, PathBuf::from("/opt/spyglass"));
        assert_eq!(paths.static_path, PathBuf::from("/opt/spyglass/static"));
    }

    #[test]
    fn snapshot_round_trips_unchanged() {
        let config = snapshot();
        let wire = serde_json::to_string(&config).unwrap();
        let back: ServerConfig = serde_json::from_str(&wire).unwrap();
        assert_eq!(back.env["SPYGLASS_PORT"], "52342");
        assert!(back.gatekeeper("timeline_v2"));
        assert_eq!(
            back.process.last_window_position,
            config.process.last_window_position
        );
        assert_eq!(back.settings.enable_prefetching, Tristate::Unset);
        assert_eq!(back.valid_web_socket_origins, config.valid_web_socket_origins);
    }

    #[test]
    fn window_position_defaults_absent() {
        let raw = r#"{
            "env": {},
            "gatekeepers": {},
            "is_production": false,
            "launcher": {"ignore_local_pin": false, "release_channel": "default"},
            "paths": {
                "app_path": "/opt/spyglass",
                "desktop_path": "/dev/null",
                "exec_path": "/dev/null",
                "home_path": "/dev/null",
                "static_path": "/opt/spyglass/static",
                "temp_path": "/tmp"
            },
            "process": {
                "launcher_enabled": false,
                "screen_capture_path": "/dev/null"
            },
            "settings": {
                "android_home": "/dev/null",
                "dark_mode": "light",
                "enable_android": false,
                "enable_ios": false,
                "enable_physical_ios": false,
                "enable_prefetching": "false",
                "idb_path": "/dev/null",
                "show_welcome_at_startup": false,
                "suppress_plugin_errors": false
            }
        }"#;
        let config: ServerConfig = serde_json::from_str(raw).unwrap();
        assert!(config.process.last_window_position.is_none());
        assert!(config.process.disabled_plugins.is_empty());
        assert!(config.valid_web_socket_origins.is_empty());
    }
}
