use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;
use tracing::error;

use super::models::ErrorResponse;
use crate::downloader::DownloadError;

const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid URL")]
    InvalidUrl,
    #[error(transparent)]
    Download(#[from] DownloadError),
    #[error("File not found")]
    NotFound,
    #[error("File serving is disabled")]
    FileServingDisabled,
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidUrl => StatusCode::BAD_REQUEST,
            ApiError::Download(DownloadError::UnsupportedSource) => StatusCode::BAD_REQUEST,
            ApiError::Download(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound | ApiError::FileServingDisabled => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the caller; internal details stay in the logs
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Download(DownloadError::Internal(_)) | ApiError::Internal(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::Download(DownloadError::Internal(detail)) | ApiError::Internal(detail) =
            &self
        {
            error!(error = %detail, "An unexpected error occurred");
        }

        let status = self.status_code();
        let body = ErrorResponse {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}
