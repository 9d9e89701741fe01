//! # spyglass-ui-core
//!
//! Host capability contract for the Spyglass UI: one strongly-typed boundary
//! the UI programs against regardless of which environment is running it
//! (native shell, browser bridge, or headless).
//!
//! ## Design principles
//!
//! - **Synchronous**: no async runtime dependency. Event delivery is
//!   callback-based; the host side owns any queuing.
//! - **One binding per process**: the host installs exactly one
//!   [`HostBridge`] at bootstrap, before any UI code runs, and the UI reads
//!   it through [`host_bridge`].
//! - **Graceful degradation**: in headless mode every capability answers
//!   with an inert but schema-valid response, so UI code never branches on
//!   host presence.
//! - **Additive protocol**: event names and payload shapes evolve by adding
//!   variants, never by changing existing ones.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use spyglass_ui_core::{bootstrap, host_bridge, BootMode};
//!
//! bootstrap(BootMode::Headless)?;
//! let host = host_bridge();
//! if host.gatekeeper("timeline_v2") {
//!     // ...
//! }
//! ```

pub mod binding;
pub mod bridge;
pub mod error;
pub mod events;
pub mod headless;
pub mod shortcuts;

pub use binding::{bootstrap, host_bridge, set_host_bridge, try_host_bridge, BootMode};
pub use bridge::{
    FileExportOptions, FileFilter, FileImportOptions, HostBridge, HostEventCallback, ImportedFile,
    LegacyDialogs, OpenDialogOptions, SaveDialogOptions, ServerLink, ShortcutCallback,
};
pub use error::{BridgeError, Result};
pub use events::EventBus;
pub use headless::{HeadlessBridge, TEST_FAILING_GK, TEST_PASSING_GK};
pub use shortcuts::{ShortcutHandle, ShortcutRegistry};

pub use spyglass_host_protocol as protocol;
