//! Academia dashboard API server library.
//!
//! Exposes config, state, error handling, routes, and the WebSocket
//! infrastructure so integration tests and the binary entrypoint share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notifications;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
