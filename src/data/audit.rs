//! Audit events reported by the AutoHeal engine.
//!
//! The dashboard never constructs, validates, or deduplicates events. It
//! reorders the fetched list newest-first and renders it.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::Deserialize;

/// Format used for timestamps in the timeline.
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// When an audit event happened.
///
/// The AutoHeal engine emits ISO-8601 strings without an offset, but epoch
/// milliseconds are accepted too. Any other JSON value is kept so that one
/// odd event cannot fail the whole fetch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    /// Fractional or out-of-range epoch milliseconds.
    FractionalMillis(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Timestamp {
    /// Resolve to a local date-time, if the value is understood.
    ///
    /// Strings without an offset are interpreted as local time.
    pub fn to_local(&self) -> Option<DateTime<Local>> {
        match self {
            Timestamp::Millis(ms) => Local.timestamp_millis_opt(*ms).single(),
            Timestamp::FractionalMillis(ms) => {
                let whole = ms.floor();
                if !whole.is_finite() || whole < i64::MIN as f64 || whole > i64::MAX as f64 {
                    return None;
                }
                Local.timestamp_millis_opt(whole as i64).single()
            }
            Timestamp::Text(text) => {
                let text = text.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                    return Some(dt.with_timezone(&Local));
                }
                NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .and_then(|naive| Local.from_local_datetime(&naive).earliest())
            }
            Timestamp::Other(_) => None,
        }
    }

    /// Format for display; unparseable values are shown verbatim.
    pub fn display(&self) -> String {
        match self.to_local() {
            Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
            None => match self {
                Timestamp::Millis(ms) => ms.to_string(),
                Timestamp::FractionalMillis(ms) => ms.to_string(),
                Timestamp::Text(text) => text.clone(),
                Timestamp::Other(value) => value.to_string(),
            },
        }
    }
}

/// One entry of the remote audit timeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditEvent {
    pub timestamp: Timestamp,
    /// Status label, e.g. "In Progress", "Resolved", "Failed".
    pub status: String,
    pub details: String,
    /// Remediation step, e.g. "Remediation Started".
    #[serde(default)]
    pub action: Option<String>,
}

impl AuditEvent {
    /// Status label normalised for styling: lowercase, spaces as dashes.
    pub fn status_key(&self) -> String {
        self.status.trim().to_lowercase().replace(' ', "-")
    }
}

/// The audit timeline, newest event first.
///
/// Replaced wholesale on every successful fetch; never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditLog {
    events: Vec<AuditEvent>,
}

impl AuditLog {
    /// Build the log from events in the order the API returned them (oldest first).
    pub fn from_fetched(mut events: Vec<AuditEvent>) -> Self {
        events.reverse();
        Self { events }
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AuditEvent> {
        self.events.iter()
    }
}
