// API handlers for the web server

use axum::{
    Json,
    extract::{Request, State},
};
use base64::prelude::{BASE64_STANDARD, Engine as _};
use tracing::{error, info};

use super::{
    SharedEnhancer,
    error::ApiError,
    extract::extract_upload,
    models::{HealthResponse, ProcessResponse},
};

// --- POST /process ---
// Accepts a multipart upload and returns the enhanced image as base64 PNG
pub async fn process_image(
    State(enhancer): State<SharedEnhancer>,
    request: Request,
) -> Result<Json<ProcessResponse>, ApiError> {
    let file_data = extract_upload(request).await?;
    info!("Processing uploaded image ({} bytes)", file_data.len());

    let result = enhancer.enhance(file_data).await.map_err(|err| {
        error!("Enhancement error: {}", err);
        ApiError::Enhancement(err.to_string())
    })?;

    info!(
        "Enhancement complete: strategy {:?}, {} bytes of PNG output",
        result.strategy,
        result.png.len()
    );

    Ok(Json(ProcessResponse {
        enhanced_image_base64: BASE64_STANDARD.encode(&result.png),
        mime_type: "image/png",
        fallback: false,
        reason: None,
        strategy: "realesrgan",
    }))
}

// --- GET /health ---
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
