//! Retry and completeness classification tables.
//!
//! Both classifications are plain data — an ordered marker table and a small
//! set of truncation patterns — so the policy can be tested without any
//! network traffic.  The truncation heuristic is pattern-based and can
//! misfire on text that legitimately ends in an ellipsis; that ambiguity is
//! inherited from the behaviour this tool reproduces.

use std::time::Duration;

use crate::config::RetryConfig;

/// Error-message substrings that mark a failure as worth retrying.
///
/// Matched case-insensitively against the full error message, in order.
pub const RETRYABLE_MARKERS: &[&str] = &[
    "timeout",
    "timed out",
    "deadline",
    "network",
    "connection",
    "fetch",
    "429",
    "503",
    "504",
    "rate limit",
    "quota",
    "resource_exhausted",
    "temporarily unavailable",
    "unavailable",
    "overloaded",
];

/// Trailing markers that indicate the model stopped mid-document.
const CONTINUATION_MARKERS: &[&str] = &["続く", "（続く）", "(続く)", "to be continued"];

/// Characters accepted as a sentence-final stop.
const TERMINAL_PUNCTUATION: &[char] = &['。', '．', '.', '！', '!', '？', '?', '」', '』', '”'];

// ---------------------------------------------------------------------------
// IncompleteReason
// ---------------------------------------------------------------------------

/// Why a successful response was classified as suspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncompleteReason {
    /// The response is shorter than the configured minimum.
    TooShort { chars: usize, min: usize },
    /// The response ends with a continuation marker such as `続く`.
    ContinuationMarker,
    /// The response trails off with `…` or `...`.
    EndsWithEllipsis,
    /// The response does not end with sentence-final punctuation.
    MissingTerminalPunctuation,
}

impl std::fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncompleteReason::TooShort { chars, min } => {
                write!(f, "response is only {chars} characters (minimum {min})")
            }
            IncompleteReason::ContinuationMarker => {
                write!(f, "response ends with a continuation marker")
            }
            IncompleteReason::EndsWithEllipsis => write!(f, "response ends with an ellipsis"),
            IncompleteReason::MissingTerminalPunctuation => {
                write!(f, "response does not end with terminal punctuation")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// RetryPolicy
// ---------------------------------------------------------------------------

/// The configured retry/backoff policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of calls per generation (first attempt included).
    pub max_attempts: u32,
    /// Base backoff delay; doubled after every attempt.
    pub base_delay: Duration,
    /// Minimum character count below which a success is suspect.
    pub min_response_chars: usize,
}

impl RetryPolicy {
    /// Build the policy from persisted settings.
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            min_response_chars: config.min_response_chars,
        }
    }

    /// `true` when the error message matches one of the retryable markers.
    pub fn is_retryable(&self, message: &str) -> bool {
        let message = message.to_lowercase();
        RETRYABLE_MARKERS
            .iter()
            .any(|marker| message.contains(marker))
    }

    /// Classify a successful response; `None` means it looks complete.
    pub fn incomplete_reason(&self, text: &str) -> Option<IncompleteReason> {
        let trimmed = text.trim();

        let chars = trimmed.chars().count();
        if chars < self.min_response_chars {
            return Some(IncompleteReason::TooShort {
                chars,
                min: self.min_response_chars,
            });
        }

        let lowered = trimmed.to_lowercase();
        if CONTINUATION_MARKERS
            .iter()
            .any(|marker| lowered.ends_with(marker))
        {
            return Some(IncompleteReason::ContinuationMarker);
        }

        if trimmed.ends_with('…') || trimmed.ends_with("...") {
            return Some(IncompleteReason::EndsWithEllipsis);
        }

        if !trimmed
            .chars()
            .last()
            .is_some_and(|c| TERMINAL_PUNCTUATION.contains(&c))
        {
            return Some(IncompleteReason::MissingTerminalPunctuation);
        }

        None
    }

    /// Backoff delay after attempt `n` (1-based): `base_delay × 2^(n-1)`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
