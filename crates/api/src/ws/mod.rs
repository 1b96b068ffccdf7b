//! WebSocket push channel.
//!
//! Connection tracking, heartbeat pings, and the authenticated upgrade
//! handler.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::{release_connection, ws_handler};
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
