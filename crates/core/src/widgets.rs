//! Static dashboard widget registry.
//!
//! The registry is configuration, not user data: it is compiled in and
//! read-only at runtime. Stored layouts may reference ids that have since
//! been removed, so lookups return `Option` and callers skip unknown ids.

use serde::Serialize;

use crate::roles::Role;

/// Width/height in grid units (12-column basis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSize {
    pub w: u32,
    pub h: u32,
}

/// A registered widget.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Roles that may enable this widget.
    pub roles: &'static [Role],
    /// Roles for which the widget is part of the default layout.
    pub default_for: &'static [Role],
    pub default_size: GridSize,
    pub min_size: GridSize,
}

impl WidgetDefinition {
    pub fn is_allowed_for(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_default_for(&self, role: Role) -> bool {
        self.default_for.contains(&role)
    }
}

use Role::{Advisor, Coordinator, DepartmentCommittee, DepartmentHead, Student};

const ALL_ROLES: &[Role] = &Role::ALL;

const fn size(w: u32, h: u32) -> GridSize {
    GridSize { w, h }
}

/// Registration order is the order widgets are offered and default-placed.
static WIDGETS: &[WidgetDefinition] = &[
    WidgetDefinition {
        id: "welcome-banner",
        title: "Welcome",
        description: "Greeting with the current term and quick links.",
        roles: ALL_ROLES,
        default_for: ALL_ROLES,
        default_size: size(12, 2),
        min_size: size(4, 2),
    },
    WidgetDefinition {
        id: "kpi-summary",
        title: "Key Metrics",
        description: "Project, defense, and evaluation counters for the department.",
        roles: &[DepartmentHead, Coordinator, DepartmentCommittee],
        default_for: &[DepartmentHead, Coordinator, DepartmentCommittee],
        default_size: size(12, 3),
        min_size: size(6, 3),
    },
    WidgetDefinition {
        id: "project-status",
        title: "Project Status",
        description: "Projects grouped by lifecycle stage.",
        roles: &[DepartmentHead, Coordinator, Advisor, DepartmentCommittee],
        default_for: &[DepartmentHead, Coordinator, DepartmentCommittee],
        default_size: size(6, 4),
        min_size: size(4, 3),
    },
    WidgetDefinition {
        id: "recent-activity",
        title: "Recent Activity",
        description: "Latest submissions, reviews, and status changes.",
        roles: ALL_ROLES,
        default_for: &[DepartmentHead, Coordinator, Advisor],
        default_size: size(6, 4),
        min_size: size(3, 3),
    },
    WidgetDefinition {
        id: "upcoming-defenses",
        title: "Upcoming Defenses",
        description: "Scheduled defenses with rooms and panel members.",
        roles: &[Coordinator, Advisor, Student, DepartmentCommittee],
        default_for: &[Coordinator, Student, DepartmentCommittee],
        default_size: size(6, 4),
        min_size: size(4, 3),
    },
    WidgetDefinition {
        id: "notifications",
        title: "Notifications",
        description: "Unread notifications with severity badges.",
        roles: ALL_ROLES,
        default_for: ALL_ROLES,
        default_size: size(4, 4),
        min_size: size(3, 3),
    },
    WidgetDefinition {
        id: "calendar",
        title: "Calendar",
        description: "Meetings, deadlines, and defense dates.",
        roles: ALL_ROLES,
        default_for: &[Advisor, Student],
        default_size: size(4, 4),
        min_size: size(3, 4),
    },
    WidgetDefinition {
        id: "faculty-load",
        title: "Faculty Load",
        description: "Supervision load per faculty member.",
        roles: &[DepartmentHead],
        default_for: &[DepartmentHead],
        default_size: size(6, 4),
        min_size: size(4, 3),
    },
    WidgetDefinition {
        id: "advisor-workload",
        title: "Advisor Workload",
        description: "Active projects per advisor against capacity.",
        roles: &[DepartmentHead, Coordinator],
        default_for: &[Coordinator],
        default_size: size(6, 4),
        min_size: size(4, 3),
    },
    WidgetDefinition {
        id: "evaluation-queue",
        title: "Evaluation Queue",
        description: "Submissions and defenses awaiting evaluation.",
        roles: &[Coordinator, Advisor, DepartmentCommittee],
        default_for: &[Advisor, DepartmentCommittee],
        default_size: size(6, 4),
        min_size: size(4, 3),
    },
    WidgetDefinition {
        id: "my-projects",
        title: "My Projects",
        description: "Projects under the advisor's supervision.",
        roles: &[Advisor],
        default_for: &[Advisor],
        default_size: size(8, 4),
        min_size: size(4, 3),
    },
    WidgetDefinition {
        id: "advisee-progress",
        title: "Advisee Progress",
        description: "Milestone completion per advisee.",
        roles: &[Advisor],
        default_for: &[],
        default_size: size(4, 4),
        min_size: size(3, 3),
    },
    WidgetDefinition {
        id: "project-milestones",
        title: "Project Milestones",
        description: "Milestone timeline for the student's project.",
        roles: &[Student],
        default_for: &[Student],
        default_size: size(8, 4),
        min_size: size(4, 3),
    },
    WidgetDefinition {
        id: "submission-status",
        title: "Submission Status",
        description: "Latest submission and review outcome.",
        roles: &[Student],
        default_for: &[Student],
        default_size: size(4, 4),
        min_size: size(3, 3),
    },
    WidgetDefinition {
        id: "advisor-contact",
        title: "Advisor",
        description: "Advisor contact details and office hours.",
        roles: &[Student],
        default_for: &[],
        default_size: size(4, 3),
        min_size: size(3, 2),
    },
    WidgetDefinition {
        id: "announcements",
        title: "Announcements",
        description: "Department and coordinator announcements.",
        roles: ALL_ROLES,
        default_for: &[Coordinator, Student],
        default_size: size(4, 3),
        min_size: size(3, 2),
    },
    WidgetDefinition {
        id: "quick-actions",
        title: "Quick Actions",
        description: "Shortcuts to the role's most common tasks.",
        roles: ALL_ROLES,
        default_for: &[],
        default_size: size(4, 2),
        min_size: size(2, 2),
    },
];

/// Every registered widget in registration order.
pub fn all_widgets() -> &'static [WidgetDefinition] {
    WIDGETS
}

/// Look up a widget by id.
pub fn find_widget(id: &str) -> Option<&'static WidgetDefinition> {
    WIDGETS.iter().find(|w| w.id == id)
}

/// Widgets a role may enable, in registration order.
pub fn widgets_for_role(role: Role) -> Vec<&'static WidgetDefinition> {
    WIDGETS.iter().filter(|w| w.is_allowed_for(role)).collect()
}

/// Widgets enabled in a role's default layout, in registration order.
pub fn default_widgets_for_role(role: Role) -> Vec<&'static WidgetDefinition> {
    WIDGETS
        .iter()
        .filter(|w| w.is_allowed_for(role) && w.is_default_for(role))
        .collect()
}

/// Returns the widget if it exists and `role` may use it.
pub fn allowed_widget(role: Role, id: &str) -> Option<&'static WidgetDefinition> {
    find_widget(id).filter(|w| w.is_allowed_for(role))
}

/// Returns `true` if `id` is registered and allowed for `role`.
pub fn is_widget_allowed(role: Role, id: &str) -> bool {
    allowed_widget(role, id).is_some()
}
