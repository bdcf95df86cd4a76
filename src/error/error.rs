use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Failed to download image from URL: {0}")]
    Fetch(String),

    #[error("Failed to read local file: {0}")]
    Read(String),

    #[error("Invalid image input, must be an HTTP/HTTPS URL, local file path, or base64 string: {0}")]
    Decode(String),

    #[error("Invalid config: {0}")]
    Validation(String),

    #[error("Conversion failed: {0}")]
    Conversion(String),

    #[error("Access denied")]
    AccessDenied,

    #[error("File not found")]
    NotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Fetch(_) | AppError::Read(_) | AppError::Decode(_) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Conversion(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// 所有阶段的错误统一在 handler 边界转换为结构化响应
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
