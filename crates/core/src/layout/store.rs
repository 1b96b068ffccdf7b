//! The dashboard layout store.
//!
//! [`LayoutStore`] owns the lifecycle of a layout
//! (absent -> default -> customized -> default on reset) and delegates
//! persistence to an injected [`LayoutStorage`] adapter. The store does
//! not validate saved states; callers run [`sanitize_layout`] first.
//!
//! [`sanitize_layout`]: super::sanitize_layout

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreError;

use super::{
    default_dashboard_layout, retain_registered, DashboardLayoutState, LayoutKey,
    CURRENT_LAYOUT_VERSION,
};

/// Persistence adapter for layout states.
///
/// Implementations must be safe to share across tasks. Writes replace the
/// whole state for a key; there is no partial update and no delete.
#[async_trait]
pub trait LayoutStorage: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Load the stored state for `key`, if any.
    async fn load(&self, key: &LayoutKey) -> Result<Option<DashboardLayoutState>, CoreError>;

    /// Replace the stored state for `key`.
    async fn store(&self, key: &LayoutKey, state: &DashboardLayoutState) -> Result<(), CoreError>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

/// Stateful manager of layouts keyed by `(tenant, user, role)`.
#[derive(Clone)]
pub struct LayoutStore {
    storage: Arc<dyn LayoutStorage>,
}

impl LayoutStore {
    pub fn new(storage: Arc<dyn LayoutStorage>) -> Self {
        Self { storage }
    }

    pub fn backend_name(&self) -> &'static str {
        self.storage.backend_name()
    }

    pub async fn health_check(&self) -> Result<(), CoreError> {
        self.storage.health_check().await
    }

    /// Return the stored layout for `key`, creating the role default on
    /// first access.
    ///
    /// A stored state from another schema version (or recorded under a
    /// different role) is replaced by the default. Ids of widgets that
    /// were retired from the registry are skipped on the way out.
    pub async fn get_or_create_layout(
        &self,
        key: &LayoutKey,
    ) -> Result<DashboardLayoutState, CoreError> {
        match self.storage.load(key).await? {
            Some(state) if state.version == CURRENT_LAYOUT_VERSION && state.role == key.role => {
                Ok(retain_registered(state))
            }
            _ => {
                let state = default_dashboard_layout(key.role);
                self.storage.store(key, &state).await?;
                Ok(state)
            }
        }
    }

    /// Atomically replace the layout for `key`, stamping `updated_at`.
    pub async fn save_layout(
        &self,
        key: &LayoutKey,
        mut next: DashboardLayoutState,
    ) -> Result<DashboardLayoutState, CoreError> {
        next.updated_at = chrono::Utc::now();
        self.storage.store(key, &next).await?;
        Ok(next)
    }

    /// Discard any customization and store a fresh role default.
    pub async fn reset_layout(&self, key: &LayoutKey) -> Result<DashboardLayoutState, CoreError> {
        let state = default_dashboard_layout(key.role);
        self.storage.store(key, &state).await?;
        Ok(state)
    }
}
