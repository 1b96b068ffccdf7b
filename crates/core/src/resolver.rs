//! Role/section resolution for `/dashboard/{role}/{section}` URLs.
//!
//! [`resolve`] is a total function of its two inputs. Every outcome is a
//! [`Resolution`] value; unknown roles and sections are not errors.

use serde::Serialize;

use crate::roles::Role;
use crate::sections::{canonicalize_section, is_section_allowed, section_page, SectionPage};

/// Prefix shared by every dashboard page URL.
pub const DASHBOARD_PATH_PREFIX: &str = "/dashboard";

/// Outcome of resolving a dashboard URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// The URL is canonical and maps to a page.
    Render {
        role: Role,
        section: String,
        page: SectionPage,
    },
    /// The URL is valid but not canonical; redirect to `location`.
    Redirect { location: String },
    /// Unknown role or section.
    NotFound,
}

/// Build the canonical dashboard path for a role and canonical section.
pub fn dashboard_path(role: Role, section: &str) -> String {
    format!("{DASHBOARD_PATH_PREFIX}/{}/{section}", role.slug())
}

/// Resolve a `(role slug, section slug)` pair taken verbatim from the URL.
///
/// 1. Map the role slug to a [`Role`]; unknown slugs are `NotFound`.
/// 2. Canonicalize the section for that role; a canonical slug with
///    characters outside `[a-z0-9_-]` is `NotFound`.
/// 3. Redirect if either slug differs from its canonical form (case and
///    whitespace differences included).
/// 4. `NotFound` if the canonical section is not allowed for the role.
/// 5. Dispatch to the page table.
pub fn resolve(role_slug: &str, section_slug: &str) -> Resolution {
    let Some(role) = Role::from_slug(role_slug) else {
        return Resolution::NotFound;
    };

    let section = canonicalize_section(role, section_slug);
    if !is_well_formed_slug(&section) {
        return Resolution::NotFound;
    }

    if role_slug != role.slug() || section_slug != section {
        return Resolution::Redirect {
            location: dashboard_path(role, &section),
        };
    }

    if !is_section_allowed(role, &section) {
        return Resolution::NotFound;
    }

    match section_page(role, &section) {
        Some(page) => Resolution::Render {
            role,
            section,
            page,
        },
        None => Resolution::NotFound,
    }
}

/// Non-empty and made only of `[a-z0-9_-]`, so it is safe to place in a
/// redirect `Location` as a single path segment.
fn is_well_formed_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-'))
}
