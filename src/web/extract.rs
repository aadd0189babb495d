use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use tracing::{debug, warn};

use super::error::ApiError;

/// Pulls the uploaded image bytes out of a `multipart/form-data` request.
///
/// Only the `file` field is consumed; other fields are ignored. A request
/// without a multipart body or without a `file` field maps to the literal
/// "No file provided" response. An empty field is passed through so it fails
/// at image decode time, like any other undecodable payload.
pub async fn extract_upload(request: Request) -> Result<Vec<u8>, ApiError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !content_type.starts_with("multipart/form-data") {
        return Err(ApiError::MissingFile);
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to process multipart request: {}", e)))?;

    let mut file_data_opt: Option<Vec<u8>> = None;

    // Loop through all fields to find "file" and ignore others
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to process multipart field: {}", e)))?
    {
        if field.name() == Some("file") {
            if file_data_opt.is_some() {
                warn!("Multiple 'file' fields found in multipart request, using the last one");
            }

            debug!(
                "Received file with content type: {:?}",
                field.content_type()
            );

            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file data: {}", e)))?
                .to_vec();

            file_data_opt = Some(data);
        } else {
            debug!(
                "Ignoring multipart field: {}",
                field.name().unwrap_or("unnamed")
            );
        }
    }

    file_data_opt.ok_or(ApiError::MissingFile)
}
