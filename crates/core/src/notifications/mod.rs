//! Notification push handling: payload normalization and cached-view
//! patches.

pub mod cache;
pub mod payload;

pub use cache::{
    patch_page, patch_summary, patch_unread_count, ListQuery, NotificationCache, NotificationPage,
    NotificationSummary, PatchOutcome, PushPatchReport, ReadFilter, MAX_CACHED_PAGES,
};
pub use payload::{normalize_push_payload, Notification, Severity};

/// Bus event type announcing a new notification.
pub const EVENT_NOTIFICATION_CREATED: &str = "notification.created";

/// WebSocket message type carrying a new notification to clients.
pub const WS_NOTIFICATION_NEW: &str = "notification:new";
