//! Role default layouts.
//!
//! Defaults are synthesized, not stored as data: every breakpoint is packed
//! row by row from the role's default widgets in registration order.

use std::collections::BTreeMap;

use crate::roles::Role;
use crate::widgets::{default_widgets_for_role, WidgetDefinition};

use super::{
    Breakpoint, BreakpointLayouts, DashboardLayoutState, GridPlacement, CURRENT_LAYOUT_VERSION,
    MAX_GRID_ROW,
};

/// Width and height of `widget` on `breakpoint`'s grid.
///
/// Widths are scaled from the 12-column basis (rounding up) and clamped
/// between the widget's minimum width and the column count. Heights do
/// not scale.
pub fn widget_size(widget: &WidgetDefinition, breakpoint: Breakpoint) -> (u32, u32) {
    let cols = breakpoint.columns();
    let scaled = (widget.default_size.w * cols).div_ceil(12);
    let min_w = widget.min_size.w.min(cols).max(1);
    let w = scaled.clamp(min_w, cols);
    let h = widget.default_size.h.max(widget.min_size.h).max(1);
    (w, h)
}

/// Row-packing cursor for one breakpoint grid.
///
/// Widgets are placed left to right; a widget wider than the space left in
/// the current row starts a new row beneath the tallest widget of the
/// current row. Produces non-overlapping placements.
struct RowPacker {
    cols: u32,
    x: u32,
    row_y: u32,
    row_height: u32,
}

impl RowPacker {
    fn new(cols: u32) -> Self {
        Self {
            cols,
            x: 0,
            row_y: 0,
            row_height: 0,
        }
    }

    fn place(&mut self, id: &str, w: u32, h: u32) -> GridPlacement {
        let w = w.min(self.cols);
        if self.x + w > self.cols {
            self.row_y += self.row_height;
            self.x = 0;
            self.row_height = 0;
        }
        let placement = GridPlacement {
            id: id.to_string(),
            x: self.x,
            y: self.row_y,
            w,
            h,
        };
        self.x += w;
        self.row_height = self.row_height.max(h);
        placement
    }
}

/// Pack `widgets` onto every breakpoint.
pub fn pack_widgets(widgets: &[&WidgetDefinition]) -> BreakpointLayouts {
    let mut layouts = BreakpointLayouts::default();
    for bp in Breakpoint::ALL {
        let mut packer = RowPacker::new(bp.columns());
        let placements = layouts.get_mut(bp);
        for widget in widgets {
            let (w, h) = widget_size(widget, bp);
            placements.push(packer.place(widget.id, w, h));
        }
    }
    layouts
}

/// Placement for a widget appended below everything already on the grid.
pub fn append_placement(
    existing: &[GridPlacement],
    widget: &WidgetDefinition,
    breakpoint: Breakpoint,
) -> GridPlacement {
    let (w, h) = widget_size(widget, breakpoint);
    let y = existing
        .iter()
        .map(GridPlacement::bottom)
        .max()
        .unwrap_or(0)
        .min(MAX_GRID_ROW);
    GridPlacement {
        id: widget.id.to_string(),
        x: 0,
        y,
        w,
        h,
    }
}

/// The complete default layout for `role`.
///
/// Deterministic: two calls differ only in `updated_at`.
pub fn default_dashboard_layout(role: Role) -> DashboardLayoutState {
    let widgets = default_widgets_for_role(role);
    DashboardLayoutState {
        version: CURRENT_LAYOUT_VERSION,
        role,
        enabled_widget_ids: widgets.iter().map(|w| w.id.to_string()).collect(),
        layouts: pack_widgets(&widgets),
        widget_settings: BTreeMap::new(),
        updated_at: chrono::Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{find_widget, is_widget_allowed};

    #[test]
    fn defaults_populate_all_four_breakpoints() {
        for role in Role::ALL {
            let state = default_dashboard_layout(role);
            for (bp, placements) in state.layouts.iter() {
                assert_eq!(
                    placements.len(),
                    state.enabled_widget_ids.len(),
                    "{role} {bp}"
                );
            }
        }
    }

    #[test]
    fn every_placement_id_is_enabled_and_allowed() {
        for role in Role::ALL {
            let state = default_dashboard_layout(role);
            for id in &state.enabled_widget_ids {
                assert!(is_widget_allowed(role, id), "{role} {id}");
            }
            for (bp, placements) in state.layouts.iter() {
                for p in placements {
                    assert!(state.is_enabled(&p.id), "{role} {bp} {}", p.id);
                }
            }
        }
    }

    #[test]
    fn placements_do_not_overlap_and_fit_columns() {
        for role in Role::ALL {
            let state = default_dashboard_layout(role);
            for (bp, placements) in state.layouts.iter() {
                for (i, a) in placements.iter().enumerate() {
                    assert!(a.x + a.w <= bp.columns(), "{role} {bp} {}", a.id);
                    for b in &placements[i + 1..] {
                        assert!(!a.overlaps(b), "{role} {bp}: {} overlaps {}", a.id, b.id);
                    }
                }
            }
        }
    }

    #[test]
    fn defaults_are_deterministic() {
        for role in Role::ALL {
            let a = default_dashboard_layout(role);
            let b = default_dashboard_layout(role);
            assert!(a.same_content(&b), "{role}");
        }
    }

    #[test]
    fn department_head_lg_rows_share_width() {
        let state = default_dashboard_layout(Role::DepartmentHead);
        let lg = &state.layouts.lg;
        let at = |id: &str| lg.iter().find(|p| p.id == id).unwrap().clone();

        assert_eq!((at("welcome-banner").x, at("welcome-banner").y), (0, 0));
        assert_eq!((at("kpi-summary").x, at("kpi-summary").y), (0, 2));
        // Two half-width widgets share a row.
        assert_eq!((at("project-status").x, at("project-status").y), (0, 5));
        assert_eq!((at("recent-activity").x, at("recent-activity").y), (6, 5));
        // The next widget does not fit and starts a new row.
        assert_eq!((at("notifications").x, at("notifications").y), (0, 9));
        assert_eq!((at("faculty-load").x, at("faculty-load").y), (4, 9));
    }

    #[test]
    fn xs_widths_respect_minimums() {
        let kpi = find_widget("kpi-summary").unwrap();
        assert_eq!(widget_size(kpi, Breakpoint::Xs), (4, 3));
        let notifications = find_widget("notifications").unwrap();
        // 4 * 4 / 12 rounds up to 2, raised to the minimum width of 3.
        assert_eq!(widget_size(notifications, Breakpoint::Xs), (3, 4));
        assert_eq!(widget_size(notifications, Breakpoint::Lg), (4, 4));
    }

    #[test]
    fn append_placement_goes_below_existing_content() {
        let existing = vec![
            GridPlacement { id: "a".into(), x: 0, y: 0, w: 6, h: 4 },
            GridPlacement { id: "b".into(), x: 6, y: 0, w: 6, h: 7 },
        ];
        let widget = find_widget("calendar").unwrap();
        let p = append_placement(&existing, widget, Breakpoint::Lg);
        assert_eq!((p.x, p.y, p.w, p.h), (0, 7, 4, 4));
        assert_eq!(append_placement(&[], widget, Breakpoint::Lg).y, 0);
    }

    #[test]
    fn append_placement_below_an_off_grid_placement_stays_on_the_grid() {
        let existing = vec![GridPlacement { id: "a".into(), x: 0, y: u32::MAX, w: 6, h: 4 }];
        let widget = find_widget("calendar").unwrap();
        let p = append_placement(&existing, widget, Breakpoint::Lg);
        assert_eq!(p.y, MAX_GRID_ROW);
    }
}
