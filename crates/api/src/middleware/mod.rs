//! Request extractors for identity and service access.
//!
//! - [`auth::AuthUser`] -- the signed-in user from a JWT Bearer token.
//! - [`ingest::RequireIngestToken`] -- service-to-service notification ingest.

pub mod auth;
pub mod ingest;
