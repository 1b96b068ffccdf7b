//! Dashboard roles and their URL slugs.
//!
//! A [`Role`] is fixed for the lifetime of a session and decides which
//! dashboard sections and widgets a user can see. Roles serialize in
//! snake_case (storage keys, JWT claims) and appear in URLs under a
//! separate canonical slug.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    DepartmentHead,
    Coordinator,
    Advisor,
    Student,
    DepartmentCommittee,
}

impl Role {
    /// Every role, in a stable order.
    pub const ALL: [Role; 5] = [
        Role::DepartmentHead,
        Role::Coordinator,
        Role::Advisor,
        Role::Student,
        Role::DepartmentCommittee,
    ];

    /// Storage / claim representation (`department_head`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Role::DepartmentHead => "department_head",
            Role::Coordinator => "coordinator",
            Role::Advisor => "advisor",
            Role::Student => "student",
            Role::DepartmentCommittee => "department_committee",
        }
    }

    /// Canonical URL slug used under `/dashboard/{slug}/...`.
    pub fn slug(self) -> &'static str {
        match self {
            Role::DepartmentHead => "department-head",
            Role::Coordinator => "coordinator",
            Role::Advisor => "advisor",
            Role::Student => "student",
            Role::DepartmentCommittee => "committee",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Role::DepartmentHead => "Department Head",
            Role::Coordinator => "Coordinator",
            Role::Advisor => "Advisor",
            Role::Student => "Student",
            Role::DepartmentCommittee => "Department Committee",
        }
    }

    /// Map a URL role slug to a role, ignoring case and surrounding
    /// whitespace. Accepts the canonical slug and the known aliases.
    pub fn from_slug(slug: &str) -> Option<Role> {
        let normalized = slug.trim().to_ascii_lowercase();
        ROLE_SLUGS
            .iter()
            .find(|(candidate, _)| *candidate == normalized)
            .map(|&(_, role)| role)
    }
}

/// Accepted role slugs. The first entry for each role is not required to be
/// canonical; [`Role::slug`] is the single source of the canonical form.
const ROLE_SLUGS: &[(&str, Role)] = &[
    ("department-head", Role::DepartmentHead),
    ("department_head", Role::DepartmentHead),
    ("departmenthead", Role::DepartmentHead),
    ("head", Role::DepartmentHead),
    ("coordinator", Role::Coordinator),
    ("advisor", Role::Advisor),
    ("adviser", Role::Advisor),
    ("student", Role::Student),
    ("committee", Role::DepartmentCommittee),
    ("department-committee", Role::DepartmentCommittee),
    ("department_committee", Role::DepartmentCommittee),
];

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    /// Parse the storage / claim form. URL slugs go through
    /// [`Role::from_slug`] instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown role '{s}'")))
    }
}
