//! Verdict rendering: display formatting and a lenient parse of the model reply.
//!
//! The raw reply is always what gets shown; `parse_verdict` is best-effort and
//! leaves fields empty when the model ignored the requested layout.

use serde::{Deserialize, Serialize};

use crate::analysis::prompts::{
    MATCH_PERCENTAGE_HEADER, MISSING_KEYWORDS_HEADER, PROFILE_SUMMARY_HEADER,
};

/// Structured view of a reply that followed the requested section layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// 0 – 100
    pub match_percentage: Option<u8>,
    pub missing_keywords: Vec<String>,
    pub profile_summary: Option<String>,
}

impl Verdict {
    pub fn is_empty(&self) -> bool {
        self.match_percentage.is_none()
            && self.missing_keywords.is_empty()
            && self.profile_summary.is_none()
    }
}

/// Replaces the three section tokens with emphasized markdown headings.
pub fn format_for_display(raw: &str) -> String {
    raw.replace(MATCH_PERCENTAGE_HEADER, "**MATCH PERCENTAGE:**")
        .replace(MISSING_KEYWORDS_HEADER, "\n**MISSING KEYWORDS:**")
        .replace(PROFILE_SUMMARY_HEADER, "\n**PROFILE SUMMARY:**")
}

/// Returns `None` when none of the sections could be recovered.
pub fn parse_verdict(raw: &str) -> Option<Verdict> {
    let verdict = Verdict {
        match_percentage: section_body(raw, MATCH_PERCENTAGE_HEADER).and_then(parse_percentage),
        missing_keywords: section_body(raw, MISSING_KEYWORDS_HEADER)
            .map(split_keywords)
            .unwrap_or_default(),
        profile_summary: section_body(raw, PROFILE_SUMMARY_HEADER)
            .map(str::to_string)
            .filter(|s| !s.is_empty()),
    };
    (!verdict.is_empty()).then_some(verdict)
}

/// Text between `header` and the next known header (or end of input), trimmed.
fn section_body<'a>(raw: &'a str, header: &str) -> Option<&'a str> {
    let start = raw.find(header)? + header.len();
    let rest = &raw[start..];
    let end = [
        MATCH_PERCENTAGE_HEADER,
        MISSING_KEYWORDS_HEADER,
        PROFILE_SUMMARY_HEADER,
    ]
    .iter()
    .filter_map(|h| rest.find(h))
    .min()
    .unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// First run of digits, clamped to 100. Accepts "85%", "85 %", "Match: 85".
fn parse_percentage(body: &str) -> Option<u8> {
    let digits: String = body
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let value: u32 = digits.parse().ok()?;
    Some(value.min(100) as u8)
}

fn split_keywords(body: &str) -> Vec<String> {
    body.split([',', '\n'])
        .map(|k| k.trim().trim_start_matches(['-', '*', '•']).trim())
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}
