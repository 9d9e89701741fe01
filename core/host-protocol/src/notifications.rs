//! Notification payload shapes shared by the host and UI processes.
//!
//! The notification dispatcher owns the semantics; these are only the wire
//! shapes the event channel needs on both sides of the boundary.

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a native notification, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationEventKind {
    Show,
    Click,
    Close,
    Action,
    Reply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A notification raised by a plugin, before the host decorates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    /// Epoch milliseconds, if the plugin stamped one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// The notification subject record: which plugin raised it, for which client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginNotification {
    pub notification: Notification,
    pub plugin_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

/// What the host hands to the OS notification facility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeNotificationOptions {
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub silent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_stay_off_the_wire() {
        let options = NativeNotificationOptions {
            title: "Crash".to_string(),
            body: "app exited".to_string(),
            subtitle: None,
            silent: false,
        };
        let wire = serde_json::to_string(&options).unwrap();
        assert!(!wire.contains("subtitle"));
    }

    #[test]
    fn severity_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
        let back: Severity = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(back, Severity::Warning);
    }

    #[test]
    fn missing_client_defaults_to_none() {
        let raw = r#"{
            "notification": {
                "id": "n-2",
                "title": "Slow query",
                "message": "took 4s",
                "severity": "info"
            },
            "plugin_id": "database"
        }"#;
        let subject: PluginNotification = serde_json::from_str(raw).unwrap();
        assert!(subject.client.is_none());
        assert_eq!(subject.notification.severity, Severity::Info);
    }
}
