//! Shared-secret extractor for service-to-service notification ingest.

use academia_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the ingest secret.
pub const INGEST_TOKEN_HEADER: &str = "x-ingest-token";

/// Requires `x-ingest-token` to match the configured `INGEST_TOKEN`.
///
/// Rejects with 401 when the header is missing and 403 when it does not
/// match or ingest is disabled.
pub struct RequireIngestToken;

impl FromRequestParts<AppState> for RequireIngestToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.ingest_token.as_deref() else {
            return Err(AppError::Core(CoreError::Forbidden(
                "Notification ingest is disabled".into(),
            )));
        };

        let provided = parts
            .headers
            .get(INGEST_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {INGEST_TOKEN_HEADER} header"
                )))
            })?;

        if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Invalid ingest token".into(),
            )));
        }
        Ok(RequireIngestToken)
    }
}

/// Compare secrets without exiting at the first differing byte. Only the
/// length is revealed by timing.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
