use anyhow::{Context, Result};

use crate::analysis::extractor::DEFAULT_MAX_RESUME_CHARS;
use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

/// Application configuration loaded from environment variables.
///
/// Built once at startup and threaded through `AppState`. A missing
/// `GOOGLE_API_KEY` is not fatal: the evaluator reports it per request.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub max_resume_chars: usize,
    pub max_upload_bytes: usize,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let max_resume_chars = parse_or(&get, "MAX_RESUME_CHARS", DEFAULT_MAX_RESUME_CHARS)?;
        if max_resume_chars == 0 {
            anyhow::bail!("MAX_RESUME_CHARS must be greater than zero");
        }

        Ok(Config {
            google_api_key: get("GOOGLE_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: get("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            max_resume_chars,
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            llm_timeout_secs: parse_or(&get, "LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?,
            port: parse_or(&get, "PORT", 8080u16)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert!(config.google_api_key.is_none());
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
        assert_eq!(config.gemini_api_base, DEFAULT_API_BASE);
        assert_eq!(config.max_resume_chars, 2000);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.llm_timeout_secs, 120);
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("GOOGLE_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-1.5-flash"),
            ("MAX_RESUME_CHARS", "1500"),
            ("PORT", "9000"),
        ])
        .unwrap();
        assert_eq!(config.google_api_key.as_deref(), Some("secret"));
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.max_resume_chars, 1500);
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = config_from(&[("GOOGLE_API_KEY", "   ")]).unwrap();
        assert!(config.google_api_key.is_none());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_zero_resume_budget_is_rejected() {
        assert!(config_from(&[("MAX_RESUME_CHARS", "0")]).is_err());
    }
}
