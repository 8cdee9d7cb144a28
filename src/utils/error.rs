use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("No file part")]
    NoFilePart,

    #[error("No selected file")]
    EmptyFilename,

    #[error("File too large, max allowed: {0} bytes")]
    FileTooLarge(usize),

    #[error("GET method not allowed. Use POST method instead.")]
    MethodNotAllowed,

    #[error("{0} method not allowed. Use POST method instead.")]
    UnsupportedMethod(String),

    #[error("{0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("{0}")]
    Shape(String),

    #[error("{0}")]
    Inference(String),

    #[error("{0}")]
    Ort(#[from] ort::Error),

    #[error("Model not loaded: {0}")]
    ModelUnavailable(String),

    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// 错误分层：请求校验 / 处理过程 / 启动阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Processing,
    Startup,
}

impl From<ndarray::ShapeError> for ClassifierError {
    fn from(err: ndarray::ShapeError) -> Self {
        ClassifierError::Shape(err.to_string())
    }
}

impl ClassifierError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClassifierError::NoFilePart
            | ClassifierError::EmptyFilename
            | ClassifierError::FileTooLarge(_)
            | ClassifierError::MethodNotAllowed
            | ClassifierError::UnsupportedMethod(_) => ErrorKind::Validation,
            ClassifierError::ModelLoad(_) | ClassifierError::Config(_) => ErrorKind::Startup,
            _ => ErrorKind::Processing,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ClassifierError::MethodNotAllowed | ClassifierError::UnsupportedMethod(_) => {
                StatusCode::METHOD_NOT_ALLOWED
            }
            ClassifierError::NoFilePart | ClassifierError::EmptyFilename => StatusCode::BAD_REQUEST,
            ClassifierError::FileTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ClassifierError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match self.kind() {
            ErrorKind::Validation => tracing::warn!("Request rejected: {} ({})", message, status),
            _ => tracing::error!("Request failed: {} ({})", message, status),
        }

        (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
    }
}
