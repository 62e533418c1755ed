//! Resume Text Extractor: turns an uploaded PDF into a bounded plain-text excerpt.
//!
//! Pages are concatenated in order with no separator. Pages that yield no text
//! (or only whitespace) contribute nothing, so an image-only scan extracts to "".
//! The PDF parser can panic on hostile input; panics are caught here and
//! reported as `ExtractError::Panicked`.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

/// Character budget used when none is configured.
pub const DEFAULT_MAX_RESUME_CHARS: usize = 2000;

/// How far into the buffer the `%PDF-` header may appear.
const HEADER_SEARCH_WINDOW: usize = 1024;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("uploaded file is not a PDF document")]
    NotPdf,

    #[error("{0}")]
    Parse(String),

    #[error("PDF parser aborted: {0}")]
    Panicked(String),
}

/// Extracts text from `pdf` and truncates it to `max_chars` characters.
pub fn extract_resume_text(pdf: &[u8], max_chars: usize) -> Result<String, ExtractError> {
    let pages = extract_pages(pdf)?;
    // Whitespace-only pages are dropped too, unlike a plain emptiness check,
    // so a scan whose pages extract to bare newlines still yields "".
    let text: String = pages
        .iter()
        .filter(|page| !page.trim().is_empty())
        .map(String::as_str)
        .collect();
    Ok(truncate_chars(&text, max_chars))
}

/// Per-page text, in document order.
pub fn extract_pages(pdf: &[u8]) -> Result<Vec<String>, ExtractError> {
    if !looks_like_pdf(pdf) {
        return Err(ExtractError::NotPdf);
    }

    guarded(|| pdf_extract::extract_text_from_mem_by_pages(pdf))
}

/// Runs a parser call, turning both its error and any panic into `ExtractError`.
fn guarded<F, E>(parse: F) -> Result<Vec<String>, ExtractError>
where
    F: FnOnce() -> Result<Vec<String>, E>,
    E: std::fmt::Display,
{
    match panic::catch_unwind(AssertUnwindSafe(parse)) {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(ExtractError::Parse(e.to_string())),
        Err(payload) => Err(ExtractError::Panicked(panic_message(payload.as_ref()))),
    }
}

/// Returns at most `max_chars` Unicode scalar values from the front of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

fn looks_like_pdf(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
