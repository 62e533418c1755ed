//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::debug;

use crate::analysis::pipeline::{run_analysis, AnalysisReport, AnalysisRequest, AnalysisSettings};
use crate::errors::AppError;
use crate::state::AppState;

pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const RESUME_FIELD: &str = "resume";

const ACCEPTED_RESUME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/x-pdf",
    "application/octet-stream",
];

/// POST /api/v1/analyze
///
/// Multipart form with a `job_description` text field and a `resume` PDF file.
/// Unknown fields are ignored. Missing fields are reported by the pipeline's
/// input validation, so the client sees one consistent message.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut job_description = String::new();
    let mut resume_pdf = Bytes::new();
    let mut file_name = None;
    let limit = state.config.max_upload_bytes;
    let upload_error = |e| AppError::from_upload(e, limit);

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(JOB_DESCRIPTION_FIELD) => {
                job_description = field.text().await.map_err(upload_error)?;
            }
            Some(RESUME_FIELD) => {
                if let Some(content_type) = field.content_type() {
                    if !ACCEPTED_RESUME_TYPES.contains(&content_type) {
                        return Err(AppError::Validation(format!(
                            "Resume must be a PDF file (got {content_type})"
                        )));
                    }
                }
                file_name = field.file_name().map(String::from);
                resume_pdf = field.bytes().await.map_err(upload_error)?;
            }
            other => {
                debug!("Ignoring unexpected multipart field {other:?}");
            }
        }
    }

    let request = AnalysisRequest {
        job_description,
        resume_pdf,
        file_name,
    };
    let settings = AnalysisSettings {
        max_resume_chars: state.config.max_resume_chars,
    };

    let report = run_analysis(request, state.generator.as_ref(), settings).await?;
    Ok(Json(report))
}
