//! Process-wide host binding slot.
//!
//! Bootstrap installs exactly one [`HostBridge`] before any UI code runs,
//! and the UI only ever reads it through [`host_bridge`]. A missing binding
//! is a bootstrap-ordering bug, not a runtime condition, so the accessor
//! fails fatally instead of degrading.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::info;

use crate::bridge::HostBridge;
use crate::error::{BridgeError, Result};
use crate::headless;

static HOST_BRIDGE: OnceCell<Arc<dyn HostBridge>> = OnceCell::new();

/// How the application composes its host at startup.
///
/// The mode is an explicit parameter threaded through the composition root,
/// not an ambient environment check: whoever boots the application decides,
/// visibly, which binding it runs on.
pub enum BootMode {
    /// A real host environment provides the binding.
    Host(Arc<dyn HostBridge>),
    /// No host present; install the deterministic headless binding.
    Headless,
}

/// Install the process-wide binding. First call wins; a second call is a
/// bootstrap defect and returns [`BridgeError::AlreadyBound`].
pub fn set_host_bridge(bridge: Arc<dyn HostBridge>) -> Result<()> {
    HOST_BRIDGE
        .set(bridge)
        .map_err(|_| BridgeError::AlreadyBound)?;
    info!("host bridge bound");
    Ok(())
}

/// The bound host bridge.
///
/// # Panics
///
/// Panics if no binding was installed. Bootstrap must run
/// [`set_host_bridge`] (or [`bootstrap`]) before any UI code executes;
/// reaching this panic means the startup ordering is broken.
pub fn host_bridge() -> &'static Arc<dyn HostBridge> {
    HOST_BRIDGE.get().expect(
        "host bridge was never bound; call set_host_bridge() or bootstrap() before starting the UI",
    )
}

/// Non-panicking probe, for composition code that needs to know whether
/// bootstrap already ran.
pub fn try_host_bridge() -> Option<&'static Arc<dyn HostBridge>> {
    HOST_BRIDGE.get()
}

/// Compose and install the binding for `mode`, returning it.
///
/// `BootMode::Headless` is idempotent so test harnesses can call it freely;
/// `BootMode::Host` insists on being first.
pub fn bootstrap(mode: BootMode) -> Result<&'static Arc<dyn HostBridge>> {
    match mode {
        BootMode::Host(bridge) => {
            set_host_bridge(bridge)?;
            Ok(host_bridge())
        }
        BootMode::Headless => Ok(headless::install()),
    }
}

pub(crate) fn get_or_init_with<F>(init: F) -> &'static Arc<dyn HostBridge>
where
    F: FnOnce() -> Arc<dyn HostBridge>,
{
    HOST_BRIDGE.get_or_init(init)
}
