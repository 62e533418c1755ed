use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::extractor::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Remote model failures have no variant: they are rendered as a
/// diagnostic result, not surfaced as an error response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Error reading PDF file: {0}")]
    PdfParse(#[from] ExtractError),

    #[error("Upload error: {0}")]
    Upload(#[from] MultipartError),

    #[error("Resume exceeds the {limit}-byte upload limit")]
    UploadTooLarge { limit: usize },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wraps a multipart failure, naming the configured limit when the body was too large.
    pub fn from_upload(e: MultipartError, limit: usize) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::UploadTooLarge { limit }
        } else {
            AppError::Upload(e)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PdfParse(e) => {
                tracing::warn!("PDF extraction failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "PDF_PARSE_ERROR",
                    self.to_string(),
                )
            }
            AppError::Upload(e) => (e.status(), "INVALID_UPLOAD", e.body_text()),
            AppError::UploadTooLarge { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "INVALID_UPLOAD",
                self.to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
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
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_bad_request() {
        let response = AppError::Validation("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "missing");
    }

    #[tokio::test]
    async fn test_pdf_parse_maps_to_unprocessable_with_reason() {
        let response = AppError::PdfParse(ExtractError::NotPdf).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PDF_PARSE_ERROR");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("Error reading PDF file:"));
    }

    #[tokio::test]
    async fn test_upload_too_large_names_the_limit() {
        let response = AppError::UploadTooLarge { limit: 1024 }.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_UPLOAD");
        assert_eq!(
            body["error"]["message"],
            "Resume exceeds the 1024-byte upload limit"
        );
    }

    #[tokio::test]
    async fn test_internal_hides_details() {
        let response = AppError::Internal(anyhow::anyhow!("disk on fire")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(!body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("disk on fire"));
    }
}
