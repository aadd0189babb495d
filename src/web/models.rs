// Wire models for the API server

use serde::Serialize;

/// Response body for `POST /process`.
///
/// The `fallback`, `reason` and `strategy` fields are part of the published
/// schema but existing clients expect these exact literal values regardless
/// of which enhancement path ran; the truthful metadata lives on the internal
/// `EnhancementResult` only.
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub enhanced_image_base64: String,
    pub mime_type: &'static str,
    pub fallback: bool,
    pub reason: Option<String>,
    pub strategy: &'static str,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
