//! Mapping of core errors onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gitfolio_core::Error;
use serde::Serialize;
use tracing::error;

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

/// Handler error wrapper
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            e if e.is_upstream() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", self.0);
        }

        let field = match &self.0 {
            Error::InvalidFilter { field, .. } => Some(*field),
            _ => None,
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
            status: status.as_u16(),
            field,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let bad_filter = ApiError(Error::InvalidFilter {
            field: "language",
            value: "x".to_string(),
        });
        assert_eq!(bad_filter.status(), StatusCode::BAD_REQUEST);

        let unauthorized = ApiError(Error::GitHub {
            status: 401,
            message: "Bad credentials".to_string(),
        });
        assert_eq!(unauthorized.status(), StatusCode::BAD_GATEWAY);

        let shared = ApiError(Error::Refresh(std::sync::Arc::new(Error::GitHub {
            status: 503,
            message: "Service Unavailable".to_string(),
        })));
        assert_eq!(shared.status(), StatusCode::BAD_GATEWAY);

        let local = ApiError(Error::Config("broken".to_string()));
        assert_eq!(local.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
