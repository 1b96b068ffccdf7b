//! JWT-based authentication extractor.

use academia_core::error::CoreError;
use academia_core::layout::LayoutKey;
use academia_core::roles::Role;
use academia_core::tenant::TenantVerification;
use academia_core::types::DbId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in user, taken from `Authorization: Bearer <token>`.
///
/// ```ignore
/// async fn handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub tenant_id: DbId,
    pub role: Role,
    pub tenant_verification: TenantVerification,
}

impl AuthUser {
    /// Validate a raw token string.
    pub fn from_token(token: &str, config: &JwtConfig) -> Result<Self, AppError> {
        let claims = validate_token(token, config).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            tenant_id: claims.tenant_id,
            role: claims.role,
            tenant_verification: TenantVerification::from_claim(
                claims.tenant_verification.as_deref(),
            ),
        })
    }

    /// Key of this user's layout for their current role.
    pub fn layout_key(&self) -> LayoutKey {
        LayoutKey::new(self.tenant_id, self.user_id, self.role)
    }

    /// Key of this user's notification caches.
    pub fn cache_owner(&self) -> (DbId, DbId) {
        (self.tenant_id, self.user_id)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        AuthUser::from_token(token, &state.config.jwt)
    }
}
