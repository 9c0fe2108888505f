use super::mocks::MockEngine;
use aeye_server::{
    config::{Config, ServeMode},
    server::{handlers::AppState, router},
};
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use image::{Rgb, RgbImage};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a test configuration with sensible defaults
pub fn create_test_config(mode: ServeMode) -> Config {
    let mut config = Config::default();
    config.server.mode = mode;
    config.server.logs.level = "debug".to_string();
    config.engine.model = "test-model".to_string();
    config.engine.verify_model = false;
    config
}

/// Build the full router around a mock engine
pub fn create_test_app(engine: MockEngine, mode: ServeMode) -> Router {
    let config = create_test_config(mode);
    let state = AppState::new(engine, &config);
    router(state, &config.server)
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write a small PNG and return its path
pub fn write_test_png(dir: &TempDir, width: u32, height: u32) -> PathBuf {
    let path = dir.path().join("testpic.png");
    RgbImage::from_pixel(width, height, Rgb([200, 30, 30]))
        .save(&path)
        .expect("Failed to write test image");
    path
}

/// `/analyze` URI with a properly encoded query string
pub fn analyze_uri(image_path: &str, prompt: Option<&str>) -> String {
    let mut url = reqwest::Url::parse("http://localhost/analyze").unwrap();
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("image_path", image_path);
        if let Some(prompt) = prompt {
            query.append_pair("prompt", prompt);
        }
    }
    format!("{}?{}", url.path(), url.query().unwrap_or_default())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
