// End-to-end tests for the HTTP surface, driving the router directly.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::prelude::{BASE64_STANDARD, Engine as _};
use enhance_server::{
    enhancer::{Enhancer, EnhancerConfig},
    web,
};
use http_body_util::BodyExt;
use std::{io::Cursor, path::PathBuf, sync::Arc, time::Duration};
use tower::ServiceExt;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Builds the app with the external tool pointed at a path that does not
/// exist, forcing the fallback strategy.
fn test_app() -> Router {
    let enhancer = Arc::new(Enhancer::new(EnhancerConfig {
        binary: PathBuf::from("/nonexistent/realesrgan-ncnn-vulkan"),
        model_dir: PathBuf::from("models"),
        model_name: "RealESRGAN_General_x4_v3".to_string(),
        tool_timeout: Duration::from_secs(10),
    }));
    web::create_app(enhancer)
}

fn multipart_body(field_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field_name}\"; filename=\"input.png\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(field_name: &str, data: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/process")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field_name, data)))
        .unwrap()
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([10, 180, 90]),
    ));
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "status": "ok" })
    );
}

#[tokio::test]
async fn process_without_file_field_returns_400() {
    let response = test_app()
        .oneshot(multipart_request("other", b"some bytes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": "No file provided" })
    );
}

#[tokio::test]
async fn process_with_non_multipart_body_returns_400() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "error": "No file provided" })
    );
}

#[tokio::test]
async fn process_upscales_via_fallback_when_tool_unavailable() {
    let response = test_app()
        .oneshot(multipart_request("file", &png_bytes(10, 10)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["mime_type"], "image/png");
    // Published schema: these literals are fixed regardless of the path taken
    assert_eq!(body["fallback"], false);
    assert_eq!(body["reason"], serde_json::Value::Null);
    assert_eq!(body["strategy"], "realesrgan");

    let png = BASE64_STANDARD
        .decode(body["enhanced_image_base64"].as_str().unwrap())
        .unwrap();
    let output = image::load_from_memory(&png).unwrap();
    assert_eq!(output.width(), 40);
    assert_eq!(output.height(), 40);
}

#[tokio::test]
async fn process_with_corrupt_image_returns_500() {
    let response = test_app()
        .oneshot(multipart_request("file", b"not an image at all"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body["error"], "Enhancement failed");
    assert_eq!(body["detail"], "cannot decode input image");
}

#[tokio::test]
async fn process_with_empty_file_field_returns_500() {
    let response = test_app()
        .oneshot(multipart_request("file", b""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body["error"], "Enhancement failed");
    assert_eq!(body["detail"], "cannot decode input image");
}
