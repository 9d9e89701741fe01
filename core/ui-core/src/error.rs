//! Error types for host bridge operations.

/// Failures a host bridge can surface to the UI.
///
/// This is a deliberately small taxonomy. Dialog cancellation is signalled
/// via `None`/`Ok(None)`, unknown feature gates resolve to `false`, and
/// best-effort event sends are silent; the variants here cover the remaining
/// genuinely fallible surface.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("host bridge is already bound for this process")]
    AlreadyBound,

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using BridgeError.
pub type Result<T> = std::result::Result<T, BridgeError>;
