//! HTTP error responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use metalprices_lib::validation::ValidationError;
use metalprices_lib::{PriceError, StatusError};
use serde_json::json;

/// An error returned to the client as `{"detail": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> &str {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}

impl From<PriceError> for ApiError {
    fn from(e: PriceError) -> Self {
        match e {
            PriceError::MetalNotFound(_) => Self::NotFound(e.to_string()),
            PriceError::UnsupportedMetal(_) => Self::BadRequest(e.to_string()),
            PriceError::AllSourcesFailed => Self::Internal(e.to_string()),
            PriceError::SourceUnavailable { .. } => {
                tracing::error!("source failure escaped the aggregator: {}", e);
                Self::Internal("Price source unavailable".to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

impl From<StatusError> for ApiError {
    fn from(e: StatusError) -> Self {
        tracing::error!("status store error: {}", e);
        Self::Internal("Status store error".to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        tracing::error!("blocking task failed: {}", e);
        Self::Internal("Internal server error".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_errors_map_to_status_codes() {
        let not_found: ApiError = PriceError::MetalNotFound("tin".into()).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.detail(), "Metal tin not found");

        let all_failed: ApiError = PriceError::AllSourcesFailed.into();
        assert_eq!(all_failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(all_failed.detail(), "Could not fetch any metal prices");

        let unsupported: ApiError = PriceError::UnsupportedMetal("tin".into()).into();
        assert_eq!(unsupported.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_details_are_not_exposed() {
        let err: ApiError = PriceError::SourceUnavailable {
            metal: "gold".into(),
            reason: "HTTP 403: secret-key rejected".into(),
        }
        .into();
        assert!(!err.detail().contains("secret"));
    }

    #[test]
    fn validation_error_is_bad_request() {
        let err: ApiError = ValidationError("metal name must not be empty".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.detail().contains("must not be empty"));
    }
}
