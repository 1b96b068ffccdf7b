//! Shared response envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope used by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
