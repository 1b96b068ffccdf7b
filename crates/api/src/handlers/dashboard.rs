//! Canonical dashboard URL resolution.
//!
//! `GET /dashboard/{role}/{section}` is public: it only decides whether a
//! URL renders, redirects, or does not exist. Which user may see which
//! dashboard is the auth backend's concern.

use academia_core::resolver::{dashboard_path, resolve, Resolution};
use academia_core::sections::{allowed_sections, section_page, SectionPage};
use axum::extract::Path;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    /// Canonical role slug.
    pub role: &'static str,
    pub section: String,
    pub page: SectionPage,
    pub title: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SectionLink {
    pub section: &'static str,
    pub title: &'static str,
    pub path: String,
}

/// GET /dashboard/{role}/{section}
///
/// 308 to the canonical URL, 404 for unknown pairs, 200 with the page
/// descriptor otherwise.
pub async fn resolve_dashboard(
    Path((role, section)): Path<(String, String)>,
) -> AppResult<Response> {
    match resolve(&role, &section) {
        Resolution::Render {
            role,
            section,
            page,
        } => Ok(Json(DataResponse {
            data: DashboardPage {
                role: role.slug(),
                section,
                page,
                title: page.title(),
            },
        })
        .into_response()),
        Resolution::Redirect { location } => {
            tracing::debug!(from_role = %role, from_section = %section, to = %location, "Dashboard redirect");
            Ok(Redirect::permanent(&location).into_response())
        }
        Resolution::NotFound => Err(AppError::NotFound(format!(
            "No dashboard page at /dashboard/{role}/{section}"
        ))),
    }
}

/// GET /api/v1/dashboard/sections -- navigation entries for the caller's role.
pub async fn list_sections(user: AuthUser) -> Json<DataResponse<Vec<SectionLink>>> {
    let links = allowed_sections(user.role)
        .iter()
        .filter_map(|&section| {
            section_page(user.role, section).map(|page| SectionLink {
                section,
                title: page.title(),
                path: dashboard_path(user.role, section),
            })
        })
        .collect();
    Json(DataResponse { data: links })
}
