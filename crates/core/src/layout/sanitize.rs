//! Layout validation against the widget registry.
//!
//! [`sanitize_layout`] runs on the commit path of an edit session (and on
//! layouts submitted over HTTP) before the state reaches the store.
//! [`retain_registered`] runs when a stored layout is loaded, so ids of
//! retired widgets are skipped without touching anything else.

use std::collections::HashSet;

use crate::roles::Role;
use crate::widgets::is_widget_allowed;

use super::{Breakpoint, DashboardLayoutState, GridPlacement, MAX_GRID_ROW, MAX_PLACEMENT_HEIGHT};

/// Drop enabled ids, placements, and settings that the registry no longer
/// knows or no longer allows for the state's role.
///
/// A state that already satisfies the invariants is returned unchanged.
pub fn retain_registered(mut state: DashboardLayoutState) -> DashboardLayoutState {
    let role = state.role;
    state.enabled_widget_ids.retain(|id| is_widget_allowed(role, id));

    let enabled: HashSet<String> = state.enabled_widget_ids.iter().cloned().collect();
    state.layouts.retain_ids(|id| enabled.contains(id));
    state.widget_settings.retain(|id, _| is_widget_allowed(role, id));
    state
}

/// Bring a submitted layout into a consistent state for `role`.
///
/// - forces `role`
/// - keeps only registered, role-allowed, de-duplicated enabled ids
/// - keeps only placements of enabled ids, one per id per breakpoint
/// - clamps each placement into the breakpoint's columns (`w >= 1`, `h >= 1`)
///   and its rows into [`MAX_GRID_ROW`] and [`MAX_PLACEMENT_HEIGHT`]
/// - drops settings of ids the role cannot use
///
/// Missing placements are left missing; the renderer auto-places them.
/// Idempotent.
pub fn sanitize_layout(role: Role, mut state: DashboardLayoutState) -> DashboardLayoutState {
    state.role = role;

    let mut seen = HashSet::new();
    state
        .enabled_widget_ids
        .retain(|id| is_widget_allowed(role, id) && seen.insert(id.clone()));

    for bp in Breakpoint::ALL {
        let mut placed = HashSet::new();
        let placements = state.layouts.get_mut(bp);
        placements.retain(|p| seen.contains(&p.id) && placed.insert(p.id.clone()));
        for placement in placements.iter_mut() {
            clamp_placement(placement, bp.columns());
        }
    }

    state.widget_settings.retain(|id, _| is_widget_allowed(role, id));
    state
}

fn clamp_placement(placement: &mut GridPlacement, cols: u32) {
    placement.w = placement.w.clamp(1, cols);
    placement.x = placement.x.min(cols - placement.w);
    placement.h = placement.h.clamp(1, MAX_PLACEMENT_HEIGHT);
    placement.y = placement.y.min(MAX_GRID_ROW);
}
