//! Draft/commit editing of a dashboard layout.
//!
//! A [`LayoutEditSession`] holds the committed `base` layout and, while in
//! edit mode, a `draft` copy. Every mutation targets the draft; nothing
//! reaches the store until [`LayoutEditSession::save`]. The session knows
//! nothing about how the grid is rendered: a grid widget reports moves and
//! resizes through [`LayoutEditSession::apply_grid_change`].

use std::collections::HashSet;

use crate::error::CoreError;
use crate::roles::Role;
use crate::widgets::{find_widget, WidgetDefinition};

use super::defaults::append_placement;
use super::{
    sanitize_layout, Breakpoint, DashboardLayoutState, GridPlacement, LayoutKey, LayoutStore,
};

#[derive(Debug, Clone)]
pub struct LayoutEditSession {
    key: LayoutKey,
    base: DashboardLayoutState,
    draft: Option<DashboardLayoutState>,
}

impl LayoutEditSession {
    /// Open a session on the stored layout for `key`, creating the role
    /// default on first access.
    pub async fn open(store: &LayoutStore, key: LayoutKey) -> Result<Self, CoreError> {
        let base = store.get_or_create_layout(&key).await?;
        Ok(Self::from_state(key, base))
    }

    /// Open a session on an already loaded layout.
    pub fn from_state(key: LayoutKey, base: DashboardLayoutState) -> Self {
        Self {
            key,
            base,
            draft: None,
        }
    }

    pub fn key(&self) -> &LayoutKey {
        &self.key
    }

    /// The last committed layout.
    pub fn base(&self) -> &DashboardLayoutState {
        &self.base
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// The draft while editing, the base otherwise.
    pub fn view(&self) -> &DashboardLayoutState {
        self.draft.as_ref().unwrap_or(&self.base)
    }

    /// Enter edit mode with a copy of the base. A no-op when already
    /// editing, so an open draft is never overwritten.
    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.base.clone());
        }
    }

    /// Discard the draft and leave edit mode.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    fn draft_mut(&mut self) -> Result<&mut DashboardLayoutState, CoreError> {
        self.draft
            .as_mut()
            .ok_or_else(|| CoreError::Conflict("Layout is not in edit mode".into()))
    }

    /// Enable or disable a widget in the draft. Returns whether the widget
    /// is enabled afterwards.
    ///
    /// Enabling appends a placement below the existing content of every
    /// breakpoint. Disabling removes the id and all of its placements; the
    /// widget's settings are kept so re-enabling restores them.
    pub fn toggle_widget(&mut self, widget_id: &str) -> Result<bool, CoreError> {
        let role = self.key.role;
        let draft = self.draft_mut()?;
        let widget = role_widget(role, widget_id)?;

        if draft.is_enabled(widget.id) {
            draft.enabled_widget_ids.retain(|id| id != widget.id);
            draft.layouts.retain_ids(|id| id != widget.id);
            return Ok(false);
        }

        draft.enabled_widget_ids.push(widget.id.to_string());
        for bp in Breakpoint::ALL {
            let placements = draft.layouts.get_mut(bp);
            placements.retain(|p| p.id != widget.id);
            let placement = append_placement(placements, widget, bp);
            placements.push(placement);
        }
        Ok(true)
    }

    /// Replace one breakpoint's placements with what the grid reported.
    ///
    /// Placements for ids that are not enabled are dropped, as are repeated
    /// ids after the first.
    pub fn apply_grid_change(
        &mut self,
        breakpoint: Breakpoint,
        placements: Vec<GridPlacement>,
    ) -> Result<(), CoreError> {
        let draft = self.draft_mut()?;
        let kept: Vec<GridPlacement> = {
            let enabled: HashSet<&str> =
                draft.enabled_widget_ids.iter().map(String::as_str).collect();
            let mut seen = HashSet::new();
            placements
                .into_iter()
                .filter(|p| enabled.contains(p.id.as_str()) && seen.insert(p.id.clone()))
                .collect()
        };
        *draft.layouts.get_mut(breakpoint) = kept;
        Ok(())
    }

    /// Replace the opaque settings of one widget in the draft.
    pub fn update_widget_settings(
        &mut self,
        widget_id: &str,
        settings: serde_json::Value,
    ) -> Result<(), CoreError> {
        let role = self.key.role;
        let draft = self.draft_mut()?;
        let widget = role_widget(role, widget_id)?;
        draft.widget_settings.insert(widget.id.to_string(), settings);
        Ok(())
    }

    /// Commit the draft.
    ///
    /// The draft is sanitized, saved, and becomes the new base. On a storage
    /// error the session stays in edit mode with the draft untouched.
    pub async fn save(&mut self, store: &LayoutStore) -> Result<&DashboardLayoutState, CoreError> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| CoreError::Conflict("Layout is not in edit mode".into()))?;
        let next = sanitize_layout(self.key.role, draft.clone());
        let saved = store.save_layout(&self.key, next).await?;
        self.base = saved;
        self.draft = None;
        Ok(&self.base)
    }

    /// Replace the stored layout with the role default and leave edit mode.
    pub async fn reset(&mut self, store: &LayoutStore) -> Result<&DashboardLayoutState, CoreError> {
        let fresh = store.reset_layout(&self.key).await?;
        self.base = fresh;
        self.draft = None;
        Ok(&self.base)
    }
}

/// Registry entry for `widget_id`, if `role` may use it.
fn role_widget(role: Role, widget_id: &str) -> Result<&'static WidgetDefinition, CoreError> {
    let widget =
        find_widget(widget_id).ok_or_else(|| CoreError::UnknownWidget(widget_id.to_string()))?;
    if !widget.is_allowed_for(role) {
        return Err(CoreError::Validation(format!(
            "Widget '{widget_id}' is not available for role '{role}'"
        )));
    }
    Ok(widget)
}
