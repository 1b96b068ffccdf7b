//! Per-user notification caches kept current by push events.
//!
//! [`NotificationCacheSync`] holds each user's cached unread count, summary,
//! and list pages. Reads seed an empty view on first access (list pages
//! only at offset zero, up to a per-user cap); refetches go through the
//! `replace_*` methods; `notification.created` events from the
//! [`EventBus`](crate::EventBus) patch whatever views are cached. Whichever
//! write lands last wins for the view it touches.

use std::collections::HashMap;

use academia_core::notifications::{
    normalize_push_payload, ListQuery, Notification, NotificationCache, NotificationPage,
    NotificationSummary, PushPatchReport,
};
use academia_core::types::DbId;
use tokio::sync::{broadcast, RwLock};

use crate::bus::PlatformEvent;

/// `(tenant_id, user_id)`.
pub type CacheOwner = (DbId, DbId);

#[derive(Default)]
pub struct NotificationCacheSync {
    caches: RwLock<HashMap<CacheOwner, NotificationCache>>,
}

impl NotificationCacheSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume bus events until the channel closes.
    pub async fn run(&self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    self.handle_event(&event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    // Missed pushes are repaired by the next client refetch.
                    tracing::warn!(skipped = n, "Notification cache sync lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification cache sync shutting down");
                    break;
                }
            }
        }
    }

    /// Apply one bus event. Returns the patch report when the event was a
    /// well-formed `notification.created` push.
    pub async fn handle_event(&self, event: &PlatformEvent) -> Option<PushPatchReport> {
        if !event.is_notification_created() {
            return None;
        }
        let Some(owner) = event.recipient() else {
            tracing::debug!(event_type = %event.event_type, "Push event without recipient dropped");
            return None;
        };
        let Some(notification) = normalize_push_payload(&event.payload) else {
            tracing::debug!(
                tenant_id = owner.0,
                user_id = owner.1,
                "Push payload without a usable id dropped"
            );
            return None;
        };
        Some(self.apply_push(owner, &notification).await)
    }

    /// Patch every cached view of `owner`. Users with nothing cached are
    /// left without a cache entry.
    pub async fn apply_push(&self, owner: CacheOwner, notification: &Notification) -> PushPatchReport {
        let mut caches = self.caches.write().await;
        let mut scratch = NotificationCache::default();
        let cache = caches.get_mut(&owner).unwrap_or(&mut scratch);
        let report = cache.apply_push(notification);

        tracing::debug!(
            tenant_id = owner.0,
            user_id = owner.1,
            notification_id = %notification.id,
            unread_count = ?report.unread_count,
            summary = ?report.summary,
            pages_applied = report.pages_applied(),
            "Applied notification push"
        );
        report
    }

    // -- Cached views -------------------------------------------------------

    pub async fn unread_count(&self, owner: CacheOwner) -> u64 {
        let mut caches = self.caches.write().await;
        *caches
            .entry(owner)
            .or_default()
            .unread_count
            .get_or_insert(0)
    }

    pub async fn summary(&self, owner: CacheOwner) -> NotificationSummary {
        let mut caches = self.caches.write().await;
        caches
            .entry(owner)
            .or_default()
            .summary
            .get_or_insert_with(NotificationSummary::default)
            .clone()
    }

    pub async fn page(&self, owner: CacheOwner, query: ListQuery) -> NotificationPage {
        let mut caches = self.caches.write().await;
        caches.entry(owner).or_default().read_page(query)
    }

    // -- Refetch replacements ----------------------------------------------

    pub async fn replace_unread_count(&self, owner: CacheOwner, count: u64) {
        self.caches
            .write()
            .await
            .entry(owner)
            .or_default()
            .replace_unread_count(count);
    }

    pub async fn replace_summary(&self, owner: CacheOwner, summary: NotificationSummary) {
        self.caches
            .write()
            .await
            .entry(owner)
            .or_default()
            .replace_summary(summary);
    }

    pub async fn replace_page(&self, owner: CacheOwner, page: NotificationPage) {
        self.caches
            .write()
            .await
            .entry(owner)
            .or_default()
            .replace_page(page);
    }

    /// Drop every cached view of `owner`. Called when the user's last
    /// WebSocket connection closes.
    pub async fn evict(&self, owner: CacheOwner) -> bool {
        let evicted = self.caches.write().await.remove(&owner).is_some();
        if evicted {
            tracing::debug!(
                tenant_id = owner.0,
                user_id = owner.1,
                "Evicted notification caches"
            );
        }
        evicted
    }

    /// Number of users with at least one cached view.
    pub async fn cached_user_count(&self) -> usize {
        self.caches.read().await.len()
    }
}
