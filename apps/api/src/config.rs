use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::generation::client::{Backoff, RetryPolicy};

/// Which `TextGenerator` the service is wired to at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    Gemini,
    /// Canned offline responses; no network, no credential.
    Mock,
}

/// Application configuration loaded from environment variables.
/// Startup fails if the Gemini backend is selected without `GEMINI_API_KEY`.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_backend: LlmBackend,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    /// Replaces the default "429"/"quota" rate-limit check when set.
    pub rate_limit_markers: Option<Vec<String>>,
    pub llm_timeout: Duration,
    pub retry: RetryPolicy,
    pub document_call_delay: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so parsing can be
    /// exercised without mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let llm_backend = match lookup("LLM_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("gemini") => LlmBackend::Gemini,
            Some("mock") => LlmBackend::Mock,
            Some(other) => bail!("LLM_BACKEND must be 'gemini' or 'mock', got '{other}'"),
        };

        let gemini_api_key = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty());
        if llm_backend == LlmBackend::Gemini && gemini_api_key.is_none() {
            bail!("Required environment variable 'GEMINI_API_KEY' is not set");
        }

        let backoff = match lookup("GENERATION_BACKOFF").as_deref().map(str::trim) {
            None | Some("") | Some("fixed") => Backoff::Fixed,
            Some("exponential") => Backoff::Exponential,
            Some(other) => {
                bail!("GENERATION_BACKOFF must be 'fixed' or 'exponential', got '{other}'")
            }
        };

        Ok(Config {
            llm_backend,
            gemini_api_key,
            gemini_model: lookup("GEMINI_MODEL")
                .unwrap_or_else(|| crate::llm_client::DEFAULT_MODEL.to_string()),
            gemini_api_base: lookup("GEMINI_API_BASE")
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| crate::llm_client::DEFAULT_API_BASE.to_string()),
            rate_limit_markers: lookup("RATE_LIMIT_MARKERS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|m| !m.is_empty())
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                })
                .filter(|markers| !markers.is_empty()),
            llm_timeout: Duration::from_secs(parse_or(&lookup, "LLM_TIMEOUT_SECS", 120)?),
            retry: RetryPolicy {
                max_attempts: parse_or(&lookup, "GENERATION_MAX_ATTEMPTS", 3)?,
                delay: Duration::from_secs(parse_or(&lookup, "GENERATION_RETRY_DELAY_SECS", 7)?),
                backoff,
            },
            document_call_delay: Duration::from_secs(parse_or(
                &lookup,
                "DOCUMENT_CALL_DELAY_SECS",
                7,
            )?),
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
