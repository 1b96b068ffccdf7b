//! Customizable dashboard layouts.
//!
//! - [`DashboardLayoutState`] -- the persisted per-(tenant, user, role) layout.
//! - [`defaults`] -- deterministic role default layouts.
//! - [`sanitize`] -- commit-path validation against the widget registry.
//! - [`store`] -- [`LayoutStore`] and the [`LayoutStorage`] adapter trait.
//! - [`storage`] -- in-memory and JSON-file adapters.
//! - [`editor`] -- the draft/commit edit session.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::types::{DbId, Timestamp};

pub mod defaults;
pub mod editor;
pub mod sanitize;
pub mod storage;
pub mod store;

pub use defaults::default_dashboard_layout;
pub use editor::LayoutEditSession;
pub use sanitize::{retain_registered, sanitize_layout};
pub use storage::{FileLayoutStorage, MemoryLayoutStorage};
pub use store::{LayoutStorage, LayoutStore};

/// Schema version written into every stored layout. Stored layouts with a
/// different version are replaced by the role default on access.
pub const CURRENT_LAYOUT_VERSION: u32 = 1;

/// Last grid row a placement may start on.
pub const MAX_GRID_ROW: u32 = 1_000;

/// Tallest placement, in rows.
pub const MAX_PLACEMENT_HEIGHT: u32 = 100;

// ---------------------------------------------------------------------------
// Breakpoints
// ---------------------------------------------------------------------------

/// Responsive grid tiers, widest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Lg,
    Md,
    Sm,
    Xs,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 4] = [Breakpoint::Lg, Breakpoint::Md, Breakpoint::Sm, Breakpoint::Xs];

    /// Grid column count for this tier.
    pub fn columns(self) -> u32 {
        match self {
            Breakpoint::Lg => 12,
            Breakpoint::Md => 10,
            Breakpoint::Sm => 6,
            Breakpoint::Xs => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Lg => "lg",
            Breakpoint::Md => "md",
            Breakpoint::Sm => "sm",
            Breakpoint::Xs => "xs",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Placements
// ---------------------------------------------------------------------------

/// One widget's rectangle on a breakpoint grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPlacement {
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridPlacement {
    /// First row below this placement.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// First column right of this placement.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Returns `true` if the two rectangles share any cell.
    pub fn overlaps(&self, other: &GridPlacement) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Placements for every breakpoint. A missing key in stored JSON
/// deserializes as an empty list, never as an absent breakpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointLayouts {
    #[serde(default)]
    pub lg: Vec<GridPlacement>,
    #[serde(default)]
    pub md: Vec<GridPlacement>,
    #[serde(default)]
    pub sm: Vec<GridPlacement>,
    #[serde(default)]
    pub xs: Vec<GridPlacement>,
}

impl BreakpointLayouts {
    pub fn get(&self, breakpoint: Breakpoint) -> &[GridPlacement] {
        match breakpoint {
            Breakpoint::Lg => &self.lg,
            Breakpoint::Md => &self.md,
            Breakpoint::Sm => &self.sm,
            Breakpoint::Xs => &self.xs,
        }
    }

    pub fn get_mut(&mut self, breakpoint: Breakpoint) -> &mut Vec<GridPlacement> {
        match breakpoint {
            Breakpoint::Lg => &mut self.lg,
            Breakpoint::Md => &mut self.md,
            Breakpoint::Sm => &mut self.sm,
            Breakpoint::Xs => &mut self.xs,
        }
    }

    /// Iterate `(breakpoint, placements)` widest first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &[GridPlacement])> + '_ {
        Breakpoint::ALL.into_iter().map(move |bp| (bp, self.get(bp)))
    }

    /// Drop every placement whose id fails `keep`.
    pub fn retain_ids(&mut self, mut keep: impl FnMut(&str) -> bool) {
        for bp in Breakpoint::ALL {
            self.get_mut(bp).retain(|p| keep(&p.id));
        }
    }
}

// ---------------------------------------------------------------------------
// Layout state
// ---------------------------------------------------------------------------

/// A user's dashboard layout for one role in one tenant.
///
/// Serialized with camelCase keys; this is the persisted storage schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLayoutState {
    pub version: u32,
    pub role: Role,
    /// Enabled widgets. Order carries no meaning but is preserved.
    pub enabled_widget_ids: Vec<String>,
    #[serde(default)]
    pub layouts: BreakpointLayouts,
    /// Per-widget settings, opaque to everything but the widget.
    #[serde(default)]
    pub widget_settings: BTreeMap<String, serde_json::Value>,
    pub updated_at: Timestamp,
}

impl DashboardLayoutState {
    pub fn is_enabled(&self, widget_id: &str) -> bool {
        self.enabled_widget_ids.iter().any(|id| id == widget_id)
    }

    /// Structural equality ignoring `updated_at`.
    pub fn same_content(&self, other: &DashboardLayoutState) -> bool {
        self.version == other.version
            && self.role == other.role
            && self.enabled_widget_ids == other.enabled_widget_ids
            && self.layouts == other.layouts
            && self.widget_settings == other.widget_settings
    }
}

// ---------------------------------------------------------------------------
// Store key
// ---------------------------------------------------------------------------

/// Composite key of a stored layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutKey {
    pub tenant_id: DbId,
    pub user_id: DbId,
    pub role: Role,
}

impl LayoutKey {
    pub fn new(tenant_id: DbId, user_id: DbId, role: Role) -> Self {
        Self {
            tenant_id,
            user_id,
            role,
        }
    }

    /// `tenant:user:role`, the key used by string-keyed storage.
    pub fn storage_key(&self) -> String {
        format!("{}:{}:{}", self.tenant_id, self.user_id, self.role.as_str())
    }
}

impl fmt::Display for LayoutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}
