use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("The interview has not been started or has already finished")]
    SessionNotActive,

    #[error("Interview state is inconsistent: {0}")]
    InconsistentState(String),

    /// The AI collaborator failed, was blocked, or timed out.
    #[error("AI service unavailable: {0}")]
    Upstream(String),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::SessionNotActive => (StatusCode::BAD_REQUEST, "SESSION_NOT_ACTIVE"),
            AppError::InconsistentState(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INCONSISTENT_STATE")
            }
            AppError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_UNAVAILABLE"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::SessionNotActive => self.to_string(),
            AppError::InconsistentState(msg) => {
                tracing::error!("Inconsistent interview state: {msg}");
                "Interview state is inconsistent. Please start a new interview.".to_string()
            }
            AppError::Upstream(msg) => {
                tracing::error!("AI collaborator error: {msg}");
                self.to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let (status, code) = AppError::Validation("topic is required".into()).status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_session_not_active_maps_to_bad_request() {
        let (status, code) = AppError::SessionNotActive.status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "SESSION_NOT_ACTIVE");
    }

    #[test]
    fn test_inconsistent_state_maps_to_server_error() {
        let (status, _) = AppError::InconsistentState("index 3 of 1".into()).status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_llm_error_becomes_upstream_with_message() {
        let err: AppError = LlmError::Blocked {
            reason: "SAFETY".to_string(),
        }
        .into();
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "UPSTREAM_UNAVAILABLE");
        assert!(err.to_string().contains("SAFETY"));
    }
}
