//! Real-time notification delivery to WebSocket clients.

pub mod router;

pub use router::NotificationRouter;
