//! Push payload normalization.
//!
//! The real-time channel delivers loosely shaped JSON: ids arrive as strings
//! or numbers, the severity sits under one of several keys, and some
//! producers wrap everything in a `notification` object. Everything funnels
//! through [`normalize_push_payload`] into a [`Notification`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Timestamp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Lenient parse; anything unrecognized is `Info`.
    pub fn parse_lenient(raw: &str) -> Severity {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "warning" | "warn" => Severity::Warning,
            "error" | "danger" => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical notification shape held in every cached view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub is_read: bool,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// Normalize a raw push payload.
///
/// Returns `None` when the payload is not an object or carries no usable
/// id. A payload wrapped as `{"notification": {...}}` is unwrapped first.
pub fn normalize_push_payload(payload: &Value) -> Option<Notification> {
    let obj = payload.as_object()?;
    let obj = match obj.get("notification").and_then(Value::as_object) {
        Some(inner) => inner,
        None => obj,
    };

    let id = match obj.get("id")? {
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

    let severity = ["severity", "type", "level"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(Severity::parse_lenient)
        .unwrap_or_default();

    let is_read = ["isRead", "is_read", "read"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_bool))
        .unwrap_or(false);

    let created_at = ["createdAt", "created_at"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&chrono::Utc))
        .unwrap_or_else(chrono::Utc::now);

    Some(Notification {
        id,
        title: text("title").unwrap_or_default(),
        message: text("message").or_else(|| text("body")).unwrap_or_default(),
        severity,
        is_read,
        created_at,
        link: text("link").filter(|l| !l.is_empty()),
    })
}
