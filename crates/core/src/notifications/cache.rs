//! Cached notification views and their push patches.
//!
//! Three views are fetched independently by clients: the unread count, a
//! summary with the most recent items, and paginated list pages. When a
//! new notification is pushed each view is patched on its own; a view
//! that cannot be patched is left for the next full refetch.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::payload::{Notification, Severity};

/// Minimum number of recent items a patched summary keeps.
pub const SUMMARY_RECENT_MIN: usize = 5;

/// Default page size for list views.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Upper bound on a list view's page size.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Upper bound on list pages cached for one user.
pub const MAX_CACHED_PAGES: usize = 8;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationSummary {
    pub unread: u64,
    pub total: u64,
    #[serde(default)]
    pub by_severity: BTreeMap<Severity, u64>,
    #[serde(default)]
    pub recent: Vec<Notification>,
}

/// Read-state filter of a list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFilter {
    #[default]
    All,
    Unread,
    Read,
}

impl ReadFilter {
    pub fn admits(self, notification: &Notification) -> bool {
        match self {
            ReadFilter::All => true,
            ReadFilter::Unread => !notification.is_read,
            ReadFilter::Read => notification.is_read,
        }
    }
}

/// Identity of a cached list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListQuery {
    pub offset: u32,
    pub limit: u32,
    pub filter: ReadFilter,
}

impl ListQuery {
    /// Build a query, bounding `limit` to `1..=MAX_PAGE_LIMIT`.
    pub fn new(offset: u32, limit: u32, filter: ReadFilter) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
            filter,
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_LIMIT, ReadFilter::All)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPage {
    pub query: ListQuery,
    pub items: Vec<Notification>,
    pub total: u64,
}

impl NotificationPage {
    pub fn empty(query: ListQuery) -> Self {
        Self {
            query,
            items: Vec::new(),
            total: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Patches
// ---------------------------------------------------------------------------

/// Result of one patch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchOutcome {
    Applied,
    /// The view already held the item.
    Duplicate,
    /// The view is not the first page, or its filter excludes the item.
    NotApplicable,
    /// Nothing is cached for this view.
    NotCached,
}

impl PatchOutcome {
    pub fn is_applied(self) -> bool {
        self == PatchOutcome::Applied
    }
}

/// Add one to the unread count when the item is unread.
pub fn patch_unread_count(count: &mut u64, notification: &Notification) -> PatchOutcome {
    if notification.is_unread() {
        *count += 1;
        PatchOutcome::Applied
    } else {
        PatchOutcome::NotApplicable
    }
}

/// Prepend the item to the summary and bump its counters.
///
/// An item already present by id leaves the summary untouched. The recent
/// list is capped at the larger of its previous length and
/// [`SUMMARY_RECENT_MIN`].
pub fn patch_summary(summary: &mut NotificationSummary, notification: &Notification) -> PatchOutcome {
    if summary.recent.iter().any(|n| n.id == notification.id) {
        return PatchOutcome::Duplicate;
    }

    let cap = summary.recent.len().max(SUMMARY_RECENT_MIN);
    summary.recent.insert(0, notification.clone());
    summary.recent.truncate(cap);

    summary.total += 1;
    if notification.is_unread() {
        summary.unread += 1;
    }
    *summary.by_severity.entry(notification.severity).or_insert(0) += 1;
    PatchOutcome::Applied
}

/// Prepend the item to a cached list page.
///
/// Only the first page is patched; later pages stay as fetched until the
/// next refetch. A page whose filter excludes the item is left alone.
pub fn patch_page(page: &mut NotificationPage, notification: &Notification) -> PatchOutcome {
    if page.query.offset != 0 || !page.query.filter.admits(notification) {
        return PatchOutcome::NotApplicable;
    }
    if page.items.iter().any(|n| n.id == notification.id) {
        return PatchOutcome::Duplicate;
    }

    page.items.insert(0, notification.clone());
    page.items.truncate(page.query.limit as usize);
    page.total += 1;
    PatchOutcome::Applied
}

// ---------------------------------------------------------------------------
// Per-user cache
// ---------------------------------------------------------------------------

/// What one push did to a user's cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushPatchReport {
    pub unread_count: PatchOutcome,
    pub summary: PatchOutcome,
    pub pages: Vec<(ListQuery, PatchOutcome)>,
}

impl PushPatchReport {
    pub fn pages_applied(&self) -> usize {
        self.pages.iter().filter(|(_, o)| o.is_applied()).count()
    }
}

/// All cached notification views of one user.
///
/// Each view is `None` until first fetched; pushes never create a view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationCache {
    pub unread_count: Option<u64>,
    pub summary: Option<NotificationSummary>,
    pub pages: HashMap<ListQuery, NotificationPage>,
}

impl NotificationCache {
    /// Apply all three patches independently.
    pub fn apply_push(&mut self, notification: &Notification) -> PushPatchReport {
        let unread_count = match self.unread_count.as_mut() {
            Some(count) => patch_unread_count(count, notification),
            None => PatchOutcome::NotCached,
        };
        let summary = match self.summary.as_mut() {
            Some(summary) => patch_summary(summary, notification),
            None => PatchOutcome::NotCached,
        };

        let mut pages: Vec<(ListQuery, PatchOutcome)> = self
            .pages
            .iter_mut()
            .map(|(query, page)| (*query, patch_page(page, notification)))
            .collect();
        pages.sort_by_key(|(q, _)| (q.offset, q.limit, q.filter as u8));

        PushPatchReport {
            unread_count,
            summary,
            pages,
        }
    }

    /// Replace the unread count with a fresh fetch.
    pub fn replace_unread_count(&mut self, count: u64) {
        self.unread_count = Some(count);
    }

    /// Replace the summary with a fresh fetch.
    pub fn replace_summary(&mut self, summary: NotificationSummary) {
        self.summary = Some(summary);
    }

    /// Replace one list page with a fresh fetch.
    ///
    /// When [`MAX_CACHED_PAGES`] pages are already cached under other
    /// queries, the page furthest down the list is dropped first.
    pub fn replace_page(&mut self, page: NotificationPage) {
        if !self.pages.contains_key(&page.query) && self.pages.len() >= MAX_CACHED_PAGES {
            let furthest = self
                .pages
                .keys()
                .max_by_key(|q| (q.offset, q.limit, q.filter as u8))
                .copied();
            if let Some(query) = furthest {
                self.pages.remove(&query);
            }
        }
        self.pages.insert(page.query, page);
    }

    /// The cached page for `query`, seeding an empty one on first read.
    ///
    /// Only first pages are seeded, and only while fewer than
    /// [`MAX_CACHED_PAGES`] are cached; otherwise an empty page is returned
    /// without being kept.
    pub fn read_page(&mut self, query: ListQuery) -> NotificationPage {
        if let Some(page) = self.pages.get(&query) {
            return page.clone();
        }
        let page = NotificationPage::empty(query);
        if query.offset == 0 && self.pages.len() < MAX_CACHED_PAGES {
            self.pages.insert(query, page.clone());
        }
        page
    }

    pub fn page(&self, query: &ListQuery) -> Option<&NotificationPage> {
        self.pages.get(query)
    }
}
