use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Failure categories the API can report. Each maps to exactly one
/// HTTP status and one envelope category string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    MethodNotAllowed,
    Configuration,
    /// Non-2xx from the Gemini API; carries the upstream status code,
    /// which is forwarded to the caller as-is.
    Upstream(u16),
    Internal,
}

impl ErrorKind {
    pub fn category(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::MethodNotAllowed => "Method Not Allowed",
            ErrorKind::Configuration => "Server Configuration Error",
            ErrorKind::Upstream(_) => "Gemini API Error",
            ErrorKind::Internal => "Internal Server Error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Upstream(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::BadRequest,
            message: message.into(),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            kind: ErrorKind::MethodNotAllowed,
            message: "Only POST requests are accepted.".to_string(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Configuration,
            message: message.into(),
        }
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Upstream(status),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Internal,
            message: message.into(),
        }
    }
}

/// The `{error, message}` body returned on every failure path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = ErrorEnvelope {
            error: self.kind.category().to_string(),
            message: self.message,
        };
        (self.kind.status(), Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_distinct_statuses() {
        assert_eq!(ErrorKind::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorKind::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ErrorKind::Configuration.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorKind::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_status_is_forwarded() {
        assert_eq!(
            ErrorKind::Upstream(429).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(ErrorKind::Upstream(503).status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn unrepresentable_upstream_status_degrades_to_bad_gateway() {
        assert_eq!(ErrorKind::Upstream(99).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(ErrorKind::Upstream(1000).status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn categories_match_wire_contract() {
        assert_eq!(ErrorKind::BadRequest.category(), "Bad Request");
        assert_eq!(ErrorKind::MethodNotAllowed.category(), "Method Not Allowed");
        assert_eq!(
            ErrorKind::Configuration.category(),
            "Server Configuration Error"
        );
        assert_eq!(ErrorKind::Upstream(429).category(), "Gemini API Error");
        assert_eq!(ErrorKind::Internal.category(), "Internal Server Error");
    }
}
