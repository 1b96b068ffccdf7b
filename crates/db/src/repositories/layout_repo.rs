//! Repository for the `dashboard_layouts` table.

use academia_core::types::DbId;
use sqlx::PgPool;

use crate::models::layout::{DashboardLayoutRow, UpsertDashboardLayout};

/// Column list for `dashboard_layouts` queries.
const COLUMNS: &str =
    "storage_key, tenant_id, user_id, role, state_json, created_at, updated_at";

pub struct DashboardLayoutRepo;

impl DashboardLayoutRepo {
    /// Find a stored layout by composite key. Returns `None` if the user
    /// never opened this dashboard.
    pub async fn find_by_key(
        pool: &PgPool,
        storage_key: &str,
    ) -> Result<Option<DashboardLayoutRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dashboard_layouts WHERE storage_key = $1");
        sqlx::query_as::<_, DashboardLayoutRow>(&query)
            .bind(storage_key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the layout for a key.
    ///
    /// Uses `ON CONFLICT (storage_key) DO UPDATE` so there is exactly one row
    /// per key; the whole document is replaced.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertDashboardLayout,
    ) -> Result<DashboardLayoutRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO dashboard_layouts \
                (storage_key, tenant_id, user_id, role, state_json, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (storage_key) DO UPDATE \
             SET state_json = EXCLUDED.state_json, \
                 updated_at = EXCLUDED.updated_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DashboardLayoutRow>(&query)
            .bind(&input.storage_key)
            .bind(input.tenant_id)
            .bind(input.user_id)
            .bind(&input.role)
            .bind(&input.state_json)
            .bind(input.updated_at)
            .fetch_one(pool)
            .await
    }

    /// Count stored layouts for a user across roles.
    pub async fn count_for_user(
        pool: &PgPool,
        tenant_id: DbId,
        user_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM dashboard_layouts WHERE tenant_id = $1 AND user_id = $2",
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
