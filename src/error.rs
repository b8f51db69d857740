// src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::youtube_client::YouTubeApiError;

/// Error taxonomy surfaced by the request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("YouTube API quota exceeded")]
    QuotaExceeded,
    #[error("YouTube API error: {0}")]
    Upstream(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<YouTubeApiError> for ApiError {
    fn from(err: YouTubeApiError) -> Self {
        if err.is_quota() {
            return ApiError::QuotaExceeded;
        }
        match err {
            YouTubeApiError::Api { status: 404, message, .. } => ApiError::NotFound(message),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Upstream(details) => {
                tracing::error!("YouTube API error: {}", details);
                json!({ "error": "YouTube API error", "details": details })
            }
            ApiError::Internal(details) => {
                // Internal details stay in the logs
                tracing::error!("Internal error: {}", details);
                json!({ "error": "Internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
