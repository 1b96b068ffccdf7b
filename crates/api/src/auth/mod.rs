//! Access-token primitives.
//!
//! Tokens are issued by the external auth backend; this server only
//! validates them. [`jwt::generate_access_token`] exists for tests and
//! tooling.

pub mod jwt;
