//! Error type shared by the domain, storage adapters, and the HTTP layer.

/// Domain failure. The api crate maps each variant to an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A widget id the registry does not know.
    #[error("Unknown widget: {0}")]
    UnknownWidget(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation does not fit the current state, e.g. editing a layout
    /// that is not in edit mode.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Storage or encoding failure. Never shown to clients.
    #[error("Internal error: {0}")]
    Internal(String),
}
