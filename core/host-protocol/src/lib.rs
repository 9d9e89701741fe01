//! Typed host↔UI event protocol for Spyglass.
//!
//! This crate is shared by the host processes (native shell, browser bridge)
//! and the UI to prevent schema drift. Both directions of the channel are
//! closed enums: the set of event names is statically enumerable, payload
//! shapes are fixed per variant. Host and UI binaries are versioned
//! independently, so the protocol evolves by adding variants, never by
//! changing existing ones.

pub mod config;
pub mod notifications;

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use notifications::{
    NativeNotificationOptions, Notification, NotificationEventKind, PluginNotification, Severity,
};

pub const PROTOCOL_VERSION: u32 = 1;
pub const MAX_FRAME_BYTES: usize = 1024 * 1024; // 1MB

/// Theme preference, as requested by the UI or persisted in host settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Dark,
    Light,
    System,
}

/// Optional extra payload carried by notification lifecycle events.
///
/// Kept as a closed string-or-number variant so the one loosely-shaped slot
/// in the schema does not weaken the rest of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationExtra {
    Text(String),
    Number(i64),
}

/// Events emitted by the host process, host → UI.
///
/// On the wire these serialize as `{"event": <name>, "args": <payload>}`:
/// event names are string literals, arguments positional. Mismatched arity
/// or types is a sender defect and fails deserialization outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "args", rename_all = "kebab-case")]
pub enum HostEvent {
    /// A `spyglass://` deep-link query forwarded by the OS protocol handler.
    ProtocolHandler(String),
    /// Open an exported snapshot file, by URL or filesystem path.
    OpenSnapshot(String),
    /// Notification lifecycle: kind, the notification subject, and an
    /// optional extra payload (third slot may be null).
    NotificationEvent(
        NotificationEventKind,
        PluginNotification,
        Option<NotificationExtra>,
    ),
    /// Opaque usage-tracking payload. The shape is owned by the analytics
    /// collaborator and deliberately not modeled here.
    TrackUsage(Vec<Value>),
    /// Epoch milliseconds at which the host began launching.
    LaunchTime(u64),
}

impl HostEvent {
    pub fn kind(&self) -> HostEventKind {
        match self {
            HostEvent::ProtocolHandler(_) => HostEventKind::ProtocolHandler,
            HostEvent::OpenSnapshot(_) => HostEventKind::OpenSnapshot,
            HostEvent::NotificationEvent(..) => HostEventKind::NotificationEvent,
            HostEvent::TrackUsage(_) => HostEventKind::TrackUsage,
            HostEvent::LaunchTime(_) => HostEventKind::LaunchTime,
        }
    }
}

/// Fieldless companion of [`HostEvent`], used to key subscriber tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    ProtocolHandler,
    OpenSnapshot,
    NotificationEvent,
    TrackUsage,
    LaunchTime,
}

impl HostEventKind {
    /// The wire-level event name, matching the serde rename of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            HostEventKind::ProtocolHandler => "protocol-handler",
            HostEventKind::OpenSnapshot => "open-snapshot",
            HostEventKind::NotificationEvent => "notification-event",
            HostEventKind::TrackUsage => "track-usage",
            HostEventKind::LaunchTime => "launch-time",
        }
    }
}

impl std::fmt::Display for HostEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Payload of [`UiEvent::ShowNotification`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowNotificationRequest {
    /// What the host hands to the OS notification facility.
    pub options: NativeNotificationOptions,
    /// The notification subject this request originated from.
    pub notification: PluginNotification,
    /// Auto-close delay; `None` leaves the notification up until dismissed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_after_ms: Option<u64>,
}

/// Events emitted by the UI process, UI → host.
///
/// Delivery is fire-and-forget: no acknowledgment crosses back, and a send
/// to a torn-down host is silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "args", rename_all = "kebab-case")]
pub enum UiEvent {
    SetTheme(ThemePreference),
    ShowNotification(ShowNotificationRequest),
    RequestLaunchTime,
    /// Lifecycle signal: the UI finished mounting.
    UiMounted,
}

impl UiEvent {
    pub fn kind(&self) -> UiEventKind {
        match self {
            UiEvent::SetTheme(_) => UiEventKind::SetTheme,
            UiEvent::ShowNotification(_) => UiEventKind::ShowNotification,
            UiEvent::RequestLaunchTime => UiEventKind::RequestLaunchTime,
            UiEvent::UiMounted => UiEventKind::UiMounted,
        }
    }
}

/// Fieldless companion of [`UiEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEventKind {
    SetTheme,
    ShowNotification,
    RequestLaunchTime,
    UiMounted,
}

impl UiEventKind {
    pub fn name(&self) -> &'static str {
        match self {
            UiEventKind::SetTheme => "set-theme",
            UiEventKind::ShowNotification => "show-notification",
            UiEventKind::RequestLaunchTime => "request-launch-time",
            UiEventKind::UiMounted => "ui-mounted",
        }
    }
}

impl std::fmt::Display for UiEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// One event crossing the process boundary.
///
/// `seq` increases monotonically per direction; receivers apply frames in
/// `seq` order, which is what preserves first-emitted, first-delivered
/// ordering for occurrences of the same event name. Ordering between two
/// distinct event names is not guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventFrame<E> {
    pub seq: u64,
    pub recorded_at: String,
    pub payload: E,
}

impl<E> EventFrame<E> {
    pub fn validate(&self) -> Result<(), ErrorInfo> {
        if DateTime::parse_from_rfc3339(&self.recorded_at).is_err() {
            return Err(ErrorInfo::new(
                "invalid_timestamp",
                "recorded_at must be RFC3339",
            ));
        }
        Ok(())
    }
}

/// Parse and validate one host→UI frame off the wire.
pub fn parse_host_frame(raw: &str) -> Result<EventFrame<HostEvent>, ErrorInfo> {
    parse_frame(raw)
}

/// Parse and validate one UI→host frame off the wire.
pub fn parse_ui_frame(raw: &str) -> Result<EventFrame<UiEvent>, ErrorInfo> {
    parse_frame(raw)
}

fn parse_frame<E: serde::de::DeserializeOwned>(raw: &str) -> Result<EventFrame<E>, ErrorInfo> {
    if raw.len() > MAX_FRAME_BYTES {
        return Err(ErrorInfo::new(
            "frame_too_large",
            format!("event frame exceeds {} bytes", MAX_FRAME_BYTES),
        ));
    }
    let frame: EventFrame<E> = serde_json::from_str(raw).map_err(|err| {
        ErrorInfo::new(
            "invalid_frame",
            format!("event frame is invalid JSON: {}", err),
        )
    })?;
    frame.validate()?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn subject() -> PluginNotification {
        PluginNotification {
            notification: Notification {
                id: "n-1".to_string(),
                title: "Leak detected".to_string(),
                message: "3 retained objects".to_string(),
                severity: Severity::Warning,
                timestamp: None,
                category: None,
                action: None,
            },
            plugin_id: "memory".to_string(),
            client: None,
        }
    }

    #[test]
    fn host_event_names_match_kind_names() {
        let events = vec![
            HostEvent::ProtocolHandler("plugin=memory".to_string()),
            HostEvent::OpenSnapshot("/tmp/trace.spy".to_string()),
            HostEvent::NotificationEvent(NotificationEventKind::Click, subject(), None),
            HostEvent::TrackUsage(vec![json!("ui-ready"), json!({"ms": 12})]),
            HostEvent::LaunchTime(1_700_000_000_000),
        ];
        for event in events {
            let wire = serde_json::to_value(&event).unwrap();
            assert_eq!(wire["event"], event.kind().name());
        }
    }

    #[test]
    fn ui_event_names_match_kind_names() {
        let events = vec![
            UiEvent::SetTheme(ThemePreference::Dark),
            UiEvent::RequestLaunchTime,
            UiEvent::UiMounted,
        ];
        for event in events {
            let wire = serde_json::to_value(&event).unwrap();
            assert_eq!(wire["event"], event.kind().name());
        }
    }

    #[test]
    fn notification_event_args_are_positional() {
        let event =
            HostEvent::NotificationEvent(NotificationEventKind::Show, subject(), None);
        let wire = serde_json::to_value(&event).unwrap();
        let args = wire["args"].as_array().unwrap();
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], "show");
        assert_eq!(args[1]["plugin_id"], "memory");
        assert!(args[2].is_null());
    }

    #[test]
    fn unit_variant_carries_no_args() {
        let wire = serde_json::to_value(UiEvent::UiMounted).unwrap();
        assert_eq!(wire["event"], "ui-mounted");
        assert!(wire.get("args").is_none());
    }

    #[test]
    fn track_usage_payload_stays_opaque() {
        let event = HostEvent::TrackUsage(vec![json!("interaction"), json!({"nested": [1, 2]})]);
        let wire = serde_json::to_string(&event).unwrap();
        let back: HostEvent = serde_json::from_str(&wire).unwrap();
        match back {
            HostEvent::TrackUsage(args) => assert_eq!(args.len(), 2),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn notification_extra_is_string_or_number() {
        let text: NotificationExtra = serde_json::from_str("\"details\"").unwrap();
        assert_eq!(text, NotificationExtra::Text("details".to_string()));
        let number: NotificationExtra = serde_json::from_str("42").unwrap();
        assert_eq!(number, NotificationExtra::Number(42));
    }

    #[test]
    fn round_trips_theme_request() {
        let wire = serde_json::to_string(&UiEvent::SetTheme(ThemePreference::System)).unwrap();
        assert!(wire.contains("set-theme"));
        assert!(wire.contains("system"));
        let back: UiEvent = serde_json::from_str(&wire).unwrap();
        assert_eq!(back.kind(), UiEventKind::SetTheme);
    }

    #[test]
    fn rejects_unknown_event_name() {
        let raw = r#"{"event": "not-an-event", "args": "x"}"#;
        assert!(serde_json::from_str::<HostEvent>(raw).is_err());
    }

    #[test]
    fn rejects_wrong_arity() {
        let raw = r#"{"event": "notification-event", "args": ["show"]}"#;
        assert!(serde_json::from_str::<HostEvent>(raw).is_err());
    }

    #[test]
    fn frame_validates_timestamp() {
        let frame = EventFrame {
            seq: 1,
            recorded_at: "2026-08-07T12:00:00Z".to_string(),
            payload: UiEvent::UiMounted,
        };
        assert!(frame.validate().is_ok());

        let frame = EventFrame {
            seq: 2,
            recorded_at: "not-a-time".to_string(),
            payload: UiEvent::UiMounted,
        };
        assert_eq!(frame.validate().unwrap_err().code, "invalid_timestamp");
    }

    #[test]
    fn parses_host_frame_off_the_wire() {
        let raw = r#"{
            "seq": 7,
            "recorded_at": "2026-08-07T12:00:00Z",
            "payload": {"event": "launch-time", "args": 1700000000000}
        }"#;
        let frame = parse_host_frame(raw).unwrap();
        assert_eq!(frame.seq, 7);
        assert_eq!(frame.payload.kind(), HostEventKind::LaunchTime);
    }

    #[test]
    fn rejects_oversized_frame() {
        let raw = "x".repeat(MAX_FRAME_BYTES + 1);
        assert_eq!(parse_ui_frame(&raw).unwrap_err().code, "frame_too_large");
    }
}
