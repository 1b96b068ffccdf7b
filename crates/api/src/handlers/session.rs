//! The caller's session as seen by the dashboard.

use academia_core::resolver::dashboard_path;
use academia_core::roles::Role;
use academia_core::tenant::TenantVerification;
use academia_core::types::DbId;
use axum::Json;
use serde::Serialize;

use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user_id: DbId,
    pub tenant_id: DbId,
    pub role: Role,
    pub role_slug: &'static str,
    pub role_label: &'static str,
    pub tenant_verification: TenantVerification,
    /// Whether the tenant may use verified-only features.
    pub tenant_verified: bool,
    /// Landing page for the role.
    pub home_path: String,
}

/// GET /api/v1/session
pub async fn get_session(user: AuthUser) -> Json<DataResponse<SessionInfo>> {
    Json(DataResponse {
        data: SessionInfo {
            user_id: user.user_id,
            tenant_id: user.tenant_id,
            role: user.role,
            role_slug: user.role.slug(),
            role_label: user.role.label(),
            tenant_verification: user.tenant_verification,
            tenant_verified: user.tenant_verification.is_approved(),
            home_path: dashboard_path(user.role, "overview"),
        },
    })
}
