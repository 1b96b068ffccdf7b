//! [`LayoutStorage`] adapter backed by the `dashboard_layouts` table.

use academia_core::error::CoreError;
use academia_core::layout::{DashboardLayoutState, LayoutKey, LayoutStorage};
use async_trait::async_trait;

use crate::models::layout::UpsertDashboardLayout;
use crate::repositories::DashboardLayoutRepo;
use crate::DbPool;

pub struct PgLayoutStorage {
    pool: DbPool,
}

impl PgLayoutStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn internal(context: &str, err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "{context}");
    CoreError::Internal(format!("{context}: {err}"))
}

#[async_trait]
impl LayoutStorage for PgLayoutStorage {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn load(&self, key: &LayoutKey) -> Result<Option<DashboardLayoutState>, CoreError> {
        let row = DashboardLayoutRepo::find_by_key(&self.pool, &key.storage_key())
            .await
            .map_err(|e| internal("Failed to load dashboard layout", e))?;

        // A document that no longer deserializes is treated as absent and
        // gets replaced by the role default.
        Ok(row.and_then(|row| match serde_json::from_value(row.state_json) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding unreadable dashboard layout");
                None
            }
        }))
    }

    async fn store(&self, key: &LayoutKey, state: &DashboardLayoutState) -> Result<(), CoreError> {
        let state_json = serde_json::to_value(state)
            .map_err(|e| CoreError::Internal(format!("Failed to encode layout: {e}")))?;
        let input = UpsertDashboardLayout {
            storage_key: key.storage_key(),
            tenant_id: key.tenant_id,
            user_id: key.user_id,
            role: key.role.as_str().to_string(),
            state_json,
            updated_at: state.updated_at,
        };
        DashboardLayoutRepo::upsert(&self.pool, &input)
            .await
            .map_err(|e| internal("Failed to store dashboard layout", e))?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| internal("Database health check failed", e))
    }
}
