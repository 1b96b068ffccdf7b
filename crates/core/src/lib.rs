//! Academia dashboard core.
//!
//! Pure domain logic shared by the API server and background services:
//! role and section resolution, the widget registry, default layouts, the
//! layout store and its storage adapters, and notification cache patching.
//! This crate has no database dependency; adapters are injected.

pub mod error;
pub mod layout;
pub mod notifications;
pub mod resolver;
pub mod roles;
pub mod sections;
pub mod tenant;
pub mod types;
pub mod widgets;
