//! Dashboard sections: per-role allow-lists, slug canonicalization, and the
//! `(role, section)` page table.

use serde::Serialize;

use crate::roles::Role;

// ---------------------------------------------------------------------------
// Allow-lists
// ---------------------------------------------------------------------------

const DEPARTMENT_HEAD_SECTIONS: &[&str] = &[
    "overview",
    "projects",
    "faculty",
    "coordinators",
    "advisors",
    "students",
    "committee",
    "reports",
    "notifications",
    "settings",
];

const COORDINATOR_SECTIONS: &[&str] = &[
    "overview",
    "projects",
    "groups",
    "coordinators",
    "advisors",
    "students",
    "defenses",
    "evaluations",
    "announcements",
    "notifications",
    "settings",
];

const ADVISOR_SECTIONS: &[&str] = &[
    "overview",
    "my-projects",
    "students",
    "meetings",
    "defenses",
    "evaluations",
    "notifications",
    "settings",
];

const STUDENT_SECTIONS: &[&str] = &[
    "overview",
    "my-project",
    "milestones",
    "submissions",
    "defense",
    "advisor",
    "notifications",
    "settings",
];

const COMMITTEE_SECTIONS: &[&str] = &[
    "overview",
    "projects",
    "defenses",
    "evaluations",
    "reports",
    "notifications",
    "settings",
];

/// Canonical section slugs a role may visit, in navigation order.
pub fn allowed_sections(role: Role) -> &'static [&'static str] {
    match role {
        Role::DepartmentHead => DEPARTMENT_HEAD_SECTIONS,
        Role::Coordinator => COORDINATOR_SECTIONS,
        Role::Advisor => ADVISOR_SECTIONS,
        Role::Student => STUDENT_SECTIONS,
        Role::DepartmentCommittee => COMMITTEE_SECTIONS,
    }
}

/// Returns `true` if `section` is a canonical slug allowed for `role`.
pub fn is_section_allowed(role: Role, section: &str) -> bool {
    allowed_sections(role).contains(&section)
}

// ---------------------------------------------------------------------------
// Canonicalization
// ---------------------------------------------------------------------------

/// Cross-role aliases. Every target is a canonical slug for at least one
/// role and never appears as an alias key, so lookups cannot chain.
const SECTION_ALIASES: &[(&str, &str)] = &[
    ("home", "overview"),
    ("dashboard", "overview"),
    ("project", "projects"),
    ("coordinator", "coordinators"),
    ("advisor", "advisors"),
    ("student", "students"),
    ("group", "groups"),
    ("meeting", "meetings"),
    ("evaluation", "evaluations"),
    ("report", "reports"),
    ("announcement", "announcements"),
    ("milestone", "milestones"),
    ("submission", "submissions"),
    ("notification", "notifications"),
    ("setting", "settings"),
    ("myprojects", "my-projects"),
    ("my_projects", "my-projects"),
    ("myproject", "my-project"),
    ("my_project", "my-project"),
];

/// Role-specific swaps applied before the generic table. Students have a
/// single defense and a single advisor; every other role sees lists.
fn role_specific_alias(role: Role, section: &str) -> Option<&'static str> {
    match (role, section) {
        (Role::Student, "defenses") => Some("defense"),
        (Role::Student, "advisors") => Some("advisor"),
        (_, "defense") if role != Role::Student => Some("defenses"),
        _ => None,
    }
}

/// Normalize a raw section slug for `role`.
///
/// Lowercases and trims, keeps slugs that are already canonical for the
/// role, then applies the role-specific rules and finally the generic alias
/// table. Unknown slugs come back normalized but otherwise untouched.
/// Idempotent: `canonicalize_section(r, &canonicalize_section(r, x))`
/// equals `canonicalize_section(r, x)`.
pub fn canonicalize_section(role: Role, raw: &str) -> String {
    let normalized = raw.trim().to_lowercase();

    if is_section_allowed(role, &normalized) {
        return normalized;
    }

    if let Some(target) = role_specific_alias(role, &normalized) {
        return target.to_string();
    }

    SECTION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|&(_, target)| target.to_string())
        .unwrap_or(normalized)
}

// ---------------------------------------------------------------------------
// Page table
// ---------------------------------------------------------------------------

/// The page component rendered for a `(role, section)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionPage {
    DepartmentOverview,
    CoordinatorOverview,
    AdvisorOverview,
    StudentOverview,
    CommitteeOverview,
    ProjectDirectory,
    FacultyDirectory,
    CoordinatorDirectory,
    AdvisorDirectory,
    StudentDirectory,
    CommitteeRoster,
    Reports,
    ProjectGroups,
    DefenseSchedule,
    EvaluationQueue,
    Announcements,
    AdvisedProjects,
    Meetings,
    StudentProject,
    Milestones,
    Submissions,
    StudentDefense,
    StudentAdvisor,
    Notifications,
    Settings,
}

impl SectionPage {
    /// Page title shown in the dashboard header.
    pub fn title(self) -> &'static str {
        match self {
            SectionPage::DepartmentOverview
            | SectionPage::CoordinatorOverview
            | SectionPage::AdvisorOverview
            | SectionPage::StudentOverview
            | SectionPage::CommitteeOverview => "Overview",
            SectionPage::ProjectDirectory => "Projects",
            SectionPage::FacultyDirectory => "Faculty",
            SectionPage::CoordinatorDirectory => "Coordinators",
            SectionPage::AdvisorDirectory => "Advisors",
            SectionPage::StudentDirectory => "Students",
            SectionPage::CommitteeRoster => "Department Committee",
            SectionPage::Reports => "Reports",
            SectionPage::ProjectGroups => "Project Groups",
            SectionPage::DefenseSchedule => "Defenses",
            SectionPage::EvaluationQueue => "Evaluations",
            SectionPage::Announcements => "Announcements",
            SectionPage::AdvisedProjects => "My Projects",
            SectionPage::Meetings => "Meetings",
            SectionPage::StudentProject => "My Project",
            SectionPage::Milestones => "Milestones",
            SectionPage::Submissions => "Submissions",
            SectionPage::StudentDefense => "Defense",
            SectionPage::StudentAdvisor => "My Advisor",
            SectionPage::Notifications => "Notifications",
            SectionPage::Settings => "Settings",
        }
    }
}

use Role::{Advisor, Coordinator, DepartmentCommittee, DepartmentHead, Student};

const SECTION_PAGES: &[(Role, &str, SectionPage)] = &[
    (DepartmentHead, "overview", SectionPage::DepartmentOverview),
    (DepartmentHead, "projects", SectionPage::ProjectDirectory),
    (DepartmentHead, "faculty", SectionPage::FacultyDirectory),
    (DepartmentHead, "coordinators", SectionPage::CoordinatorDirectory),
    (DepartmentHead, "advisors", SectionPage::AdvisorDirectory),
    (DepartmentHead, "students", SectionPage::StudentDirectory),
    (DepartmentHead, "committee", SectionPage::CommitteeRoster),
    (DepartmentHead, "reports", SectionPage::Reports),
    (DepartmentHead, "notifications", SectionPage::Notifications),
    (DepartmentHead, "settings", SectionPage::Settings),
    (Coordinator, "overview", SectionPage::CoordinatorOverview),
    (Coordinator, "projects", SectionPage::ProjectDirectory),
    (Coordinator, "groups", SectionPage::ProjectGroups),
    (Coordinator, "coordinators", SectionPage::CoordinatorDirectory),
    (Coordinator, "advisors", SectionPage::AdvisorDirectory),
    (Coordinator, "students", SectionPage::StudentDirectory),
    (Coordinator, "defenses", SectionPage::DefenseSchedule),
    (Coordinator, "evaluations", SectionPage::EvaluationQueue),
    (Coordinator, "announcements", SectionPage::Announcements),
    (Coordinator, "notifications", SectionPage::Notifications),
    (Coordinator, "settings", SectionPage::Settings),
    (Advisor, "overview", SectionPage::AdvisorOverview),
    (Advisor, "my-projects", SectionPage::AdvisedProjects),
    (Advisor, "students", SectionPage::StudentDirectory),
    (Advisor, "meetings", SectionPage::Meetings),
    (Advisor, "defenses", SectionPage::DefenseSchedule),
    (Advisor, "evaluations", SectionPage::EvaluationQueue),
    (Advisor, "notifications", SectionPage::Notifications),
    (Advisor, "settings", SectionPage::Settings),
    (Student, "overview", SectionPage::StudentOverview),
    (Student, "my-project", SectionPage::StudentProject),
    (Student, "milestones", SectionPage::Milestones),
    (Student, "submissions", SectionPage::Submissions),
    (Student, "defense", SectionPage::StudentDefense),
    (Student, "advisor", SectionPage::StudentAdvisor),
    (Student, "notifications", SectionPage::Notifications),
    (Student, "settings", SectionPage::Settings),
    (DepartmentCommittee, "overview", SectionPage::CommitteeOverview),
    (DepartmentCommittee, "projects", SectionPage::ProjectDirectory),
    (DepartmentCommittee, "defenses", SectionPage::DefenseSchedule),
    (DepartmentCommittee, "evaluations", SectionPage::EvaluationQueue),
    (DepartmentCommittee, "reports", SectionPage::Reports),
    (DepartmentCommittee, "notifications", SectionPage::Notifications),
    (DepartmentCommittee, "settings", SectionPage::Settings),
];

/// Look up the page for a canonical `(role, section)` pair.
pub fn section_page(role: Role, section: &str) -> Option<SectionPage> {
    SECTION_PAGES
        .iter()
        .find(|(r, s, _)| *r == role && *s == section)
        .map(|&(_, _, page)| page)
}
