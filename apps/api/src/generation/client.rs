//! Generation Client — bounded retry loop around a single `TextGenerator`.
//!
//! Every outcome degrades to display text: the caller never sees an error
//! type, only the generated text or a user-facing message.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::llm_client::TextGenerator;

pub const RATE_LIMIT_EXCEEDED_MESSAGE: &str = "Rate limit exceeded. Please wait a minute and try \
again. Free tier allows 5 requests per minute.";

pub const RETRIES_EXHAUSTED_MESSAGE: &str = "Failed to generate content after multiple retries.";

/// Decides whether a failed call hit the provider's request quota.
pub trait RateLimitClassifier: Send + Sync {
    fn is_rate_limited(&self, error_text: &str) -> bool;
}

/// Matches "429" anywhere, or "quota" in any case.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotaKeywordClassifier;

impl RateLimitClassifier for QuotaKeywordClassifier {
    fn is_rate_limited(&self, error_text: &str) -> bool {
        error_text.contains("429") || error_text.to_lowercase().contains("quota")
    }
}

/// Case-insensitive match on any of a configured list of markers
/// (`RATE_LIMIT_MARKERS`), for providers whose quota errors read differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerClassifier {
    markers: Vec<String>,
}

impl MarkerClassifier {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }
}

impl RateLimitClassifier for MarkerClassifier {
    fn is_rate_limited(&self, error_text: &str) -> bool {
        let error_text = error_text.to_lowercase();
        self.markers.iter().any(|m| error_text.contains(m.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay before every retry.
    Fixed,
    /// Delay doubles with each retry: d, 2d, 4d, ...
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(7),
            backoff: Backoff::Fixed,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential => {
                let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
                self.delay.saturating_mul(factor)
            }
        }
    }
}

/// Text of one generation call plus the transient notices raised while
/// producing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub warnings: Vec<String>,
}

#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn TextGenerator>,
    classifier: Arc<dyn RateLimitClassifier>,
    policy: RetryPolicy,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn TextGenerator>, policy: RetryPolicy) -> Self {
        Self {
            backend,
            classifier: Arc::new(QuotaKeywordClassifier),
            policy,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn RateLimitClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Sends `prompt` to the backend, retrying rate-limited failures until the
    /// attempt bound. Other failures are returned immediately as text.
    pub async fn generate(&self, prompt: &str) -> Generation {
        let mut warnings = Vec::new();

        for attempt in 1..=self.policy.max_attempts {
            let error_text = match self.backend.generate_text(prompt).await {
                Ok(text) => {
                    debug!("Generation succeeded on attempt {attempt}");
                    return Generation { text, warnings };
                }
                Err(e) => e.to_string(),
            };

            if !self.classifier.is_rate_limited(&error_text) {
                error!("Generation failed: {error_text}");
                return Generation {
                    text: format!("Error generating content: {error_text}"),
                    warnings,
                };
            }

            if attempt >= self.policy.max_attempts {
                warn!(
                    "Rate limited on final attempt {attempt}/{}: {error_text}",
                    self.policy.max_attempts
                );
                return Generation {
                    text: RATE_LIMIT_EXCEEDED_MESSAGE.to_string(),
                    warnings,
                };
            }

            let delay = self.policy.delay_after(attempt);
            let notice = format!(
                "Rate limit reached. Waiting {} seconds before retry...",
                delay.as_secs()
            );
            warn!(
                "Attempt {attempt}/{} rate limited: {error_text}",
                self.policy.max_attempts
            );
            warnings.push(notice);
            tokio::time::sleep(delay).await;
        }

        Generation {
            text: RETRIES_EXHAUSTED_MESSAGE.to_string(),
            warnings,
        }
    }
}
