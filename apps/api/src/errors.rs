use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::document::{DocumentError, FetchError};
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// The submission cannot be processed as given (e.g. every field empty).
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Template fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Machine-readable error payload, shared by JSON error responses and
/// partial-success bodies (e.g. a generated release whose export failed).
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Llm(_) | AppError::Fetch(_) => StatusCode::BAD_GATEWAY,
            AppError::Document(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs server-side failures and returns the user-facing code and message.
    pub fn to_body(&self) -> ErrorBody {
        let (code, message) = match self {
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    "SERVICE_ERROR",
                    "보도자료 생성 서비스 호출에 실패했습니다. 잠시 후 다시 시도해주세요.".to_string(),
                )
            }
            AppError::Fetch(e) => {
                tracing::error!("Template fetch error: {e}");
                ("FETCH_ERROR", format!("템플릿 파일을 가져올 수 없습니다: {e}"))
            }
            AppError::Document(e) => {
                tracing::error!("Document error: {e}");
                ("DOCUMENT_ERROR", format!("문서를 생성할 수 없습니다: {e}"))
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };
        ErrorBody { code, message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_body() }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = AppError::Validation("최소한 하나의 필드는 입력해주세요.".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let body = err.to_body();
        assert_eq!(body.code, "VALIDATION_ERROR");
        assert!(body.message.contains("필드"));
    }

    #[test]
    fn test_fetch_error_keeps_status_in_message() {
        let err = AppError::from(FetchError::NotFound {
            url: "https://example.test/t.docx".to_string(),
            status: 404,
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        let body = err.to_body();
        assert_eq!(body.code, "FETCH_ERROR");
        assert!(body.message.contains("404"));
    }

    #[test]
    fn test_llm_error_hides_provider_detail() {
        let err = AppError::from(LlmError::Api {
            status: 401,
            message: "Incorrect API key provided: sk-****".to_string(),
        });
        let body = err.to_body();
        assert_eq!(body.code, "SERVICE_ERROR");
        assert!(!body.message.contains("sk-"));
    }
}
