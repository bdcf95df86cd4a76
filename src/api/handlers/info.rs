use axum::response::{IntoResponse, Json};
use serde_json::json;
use crate::model::vectorizer::VectorizerConfig;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "Vectorizer Tool",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "convert": "POST /convert",
            "convert_legacy": "POST /vectorizer/v1/convert",
            "files": "GET /files/{filename}",
            "health": "GET /health",
            "config": "GET /config/default"
        },
        "input_formats": [
            "HTTP/HTTPS URL",
            "Local file path",
            "Base64 encoded string"
        ]
    }))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

pub async fn default_config() -> impl IntoResponse {
    Json(json!({
        "config": VectorizerConfig::default(),
        "description": "Default configuration optimized for high quality output"
    }))
}
