//! Analysis pipeline: orchestrates a single résumé evaluation.
//!
//! Flow: validate → extract (blocking pool) → compose prompt → one remote call → render.
//!
//! A PDF that cannot be parsed halts the pipeline before any remote call. A PDF
//! that parses but yields no text proceeds with an empty résumé section. Remote
//! failures never become errors: the diagnostic text is rendered in place of
//! the analysis.

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::extractor::extract_resume_text;
use crate::analysis::prompts::compose_prompt;
use crate::analysis::verdict::{format_for_display, parse_verdict, Verdict};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;

pub const INPUT_MISSING_MESSAGE: &str = "Please provide both a Job Description and a Resume.";

/// Prefix of the text shown when the remote call fails.
pub const REMOTE_FAILURE_PREFIX: &str = "⚠ API call failed:";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One user submission. Lives for a single request.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub job_description: String,
    pub resume_pdf: Bytes,
    pub file_name: Option<String>,
}

impl AnalysisRequest {
    /// Both inputs must be present; a whitespace-only job description counts as empty.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.job_description.trim().is_empty() || self.resume_pdf.is_empty() {
            return Err(AppError::Validation(INPUT_MISSING_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Unstructured model output, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub raw_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Completed,
    RemoteFailure,
}

/// Lifecycle of one submission. Only logged; nothing persists between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Idle,
    Submitted,
    Extracting,
    Composing,
    AwaitingRemoteResponse,
    Rendered,
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisStage::Idle => "idle",
            AnalysisStage::Submitted => "submitted",
            AnalysisStage::Extracting => "extracting",
            AnalysisStage::Composing => "composing",
            AnalysisStage::AwaitingRemoteResponse => "awaiting_remote_response",
            AnalysisStage::Rendered => "rendered",
        };
        f.write_str(name)
    }
}

/// Everything the caller needs to render the outcome.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub request_id: Uuid,
    pub status: AnalysisStatus,
    pub result: AnalysisResult,
    pub display_markdown: String,
    pub verdict: Option<Verdict>,
    /// Characters of résumé text sent to the model, after truncation.
    pub resume_chars: usize,
    pub model: String,
    pub analyzed_at: DateTime<Utc>,
}

/// Per-deployment knobs for the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisSettings {
    pub max_resume_chars: usize,
}

/// Outcome of the single remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome {
    Text(String),
    Diagnostic(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full pipeline for one submission.
///
/// Errors only for invalid input or an unparseable PDF; everything after
/// extraction ends in a report.
pub async fn run_analysis(
    request: AnalysisRequest,
    generator: &dyn TextGenerator,
    settings: AnalysisSettings,
) -> Result<AnalysisReport, AppError> {
    let request_id = Uuid::new_v4();
    let mut stage = AnalysisStage::Idle;
    advance(request_id, &mut stage, AnalysisStage::Submitted);

    request.validate()?;
    info!(
        "Analysis {request_id}: job description {} chars, resume {} bytes ({})",
        request.job_description.chars().count(),
        request.resume_pdf.len(),
        request.file_name.as_deref().unwrap_or("unnamed")
    );

    advance(request_id, &mut stage, AnalysisStage::Extracting);
    let pdf = request.resume_pdf.clone();
    let max_chars = settings.max_resume_chars;
    let resume_text = tokio::task::spawn_blocking(move || extract_resume_text(&pdf, max_chars))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;

    let resume_chars = resume_text.chars().count();
    if resume_chars == 0 {
        warn!("Analysis {request_id}: PDF contained no extractable text");
    }

    advance(request_id, &mut stage, AnalysisStage::Composing);
    let prompt = compose_prompt(&resume_text, &request.job_description);

    advance(request_id, &mut stage, AnalysisStage::AwaitingRemoteResponse);
    let outcome = evaluate_or_diagnose(generator, &prompt).await;

    advance(request_id, &mut stage, AnalysisStage::Rendered);
    let report = match outcome {
        RemoteOutcome::Text(raw_text) => AnalysisReport {
            request_id,
            status: AnalysisStatus::Completed,
            display_markdown: format_for_display(&raw_text),
            verdict: parse_verdict(&raw_text),
            result: AnalysisResult { raw_text },
            resume_chars,
            model: generator.model().to_string(),
            analyzed_at: Utc::now(),
        },
        RemoteOutcome::Diagnostic(raw_text) => AnalysisReport {
            request_id,
            status: AnalysisStatus::RemoteFailure,
            display_markdown: raw_text.clone(),
            verdict: None,
            result: AnalysisResult { raw_text },
            resume_chars,
            model: generator.model().to_string(),
            analyzed_at: Utc::now(),
        },
    };

    info!(
        "Analysis {request_id} finished: status={:?}, match={:?}",
        report.status,
        report.verdict.as_ref().and_then(|v| v.match_percentage)
    );
    Ok(report)
}

/// Makes the one remote call, converting any failure into a diagnostic string.
pub async fn evaluate_or_diagnose(generator: &dyn TextGenerator, prompt: &str) -> RemoteOutcome {
    match generator.generate(prompt).await {
        Ok(text) => RemoteOutcome::Text(text),
        Err(e) => {
            warn!("Remote evaluation failed: {e}");
            RemoteOutcome::Diagnostic(format!("{REMOTE_FAILURE_PREFIX} {e}"))
        }
    }
}

fn advance(request_id: Uuid, stage: &mut AnalysisStage, next: AnalysisStage) {
    debug!("Analysis {request_id}: {stage} -> {next}");
    *stage = next;
}
