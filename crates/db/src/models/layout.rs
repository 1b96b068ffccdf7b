//! Dashboard layout row model.

use academia_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `dashboard_layouts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardLayoutRow {
    pub storage_key: String,
    pub tenant_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub state_json: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values written by an upsert.
#[derive(Debug, Clone)]
pub struct UpsertDashboardLayout {
    pub storage_key: String,
    pub tenant_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub state_json: serde_json::Value,
    pub updated_at: Timestamp,
}
