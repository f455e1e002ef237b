//! DTOs for the health check endpoint.

use serde::Serialize;

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,

    /// Backend the console talks to, credentials masked.
    pub backend: String,
}
