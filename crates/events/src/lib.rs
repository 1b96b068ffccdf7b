//! Academia event bus and notification cache services.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] -- the domain event envelope.
//! - [`NotificationCacheSync`] -- per-user notification views kept current
//!   by `notification.created` events.

pub mod bus;
pub mod cache_sync;

pub use bus::{EventBus, PlatformEvent};
pub use cache_sync::{CacheOwner, NotificationCacheSync};
