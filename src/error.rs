use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Document too large: {0}")]
    PayloadTooLarge(String),

    #[error("Failed to extract text from file: {0}")]
    ExtractionFailed(String),

    #[error("Document contains no readable text")]
    EmptyDocument,

    #[error("No speech synthesis voices available")]
    NoVoicesAvailable,

    #[error("Failed to generate audio: synthesis failed for all {0} lines")]
    AllLinesFailedSynthesis(usize),

    #[error("Failed to export audio: {0}")]
    StorageExportFailed(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure: machine readable kind + human readable message
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_kind: String,
    pub message: String,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ExtractionFailed(_) | Self::EmptyDocument => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NoVoicesAvailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::AllLinesFailedSynthesis(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::StorageExportFailed(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable name of the error kind, as reported to clients
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "InvalidInput",
            Self::PayloadTooLarge(_) => "PayloadTooLarge",
            Self::ExtractionFailed(_) => "ExtractionFailed",
            Self::EmptyDocument => "EmptyDocument",
            Self::NoVoicesAvailable => "NoVoicesAvailable",
            Self::AllLinesFailedSynthesis(_) => "AllLinesFailedSynthesis",
            Self::StorageExportFailed(_) => "StorageExportFailed",
            Self::NotFound(_) => "NotFound",
            Self::Internal(_) => "Internal",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error_kind: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                error_kind = self.kind(),
                status = %status.as_u16(),
                "Request failed"
            );
        } else {
            tracing::warn!(
                error = %self,
                error_kind = self.kind(),
                status = %status.as_u16(),
                "Request rejected"
            );
        }

        (status, Json(self.to_response())).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
