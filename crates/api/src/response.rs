//! Shared response envelope types for API handlers.
//!
//! The outfit listing uses a `{ "data": ... }` envelope. Suggestion
//! responses are returned bare, since they carry their own metadata.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
