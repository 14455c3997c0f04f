//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared freely.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// GeminiConfig
// ---------------------------------------------------------------------------

/// Settings for the Gemini `generateContent` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL of the Generative Language API.
    pub endpoint: String,
    /// Model identifier sent in the request path (e.g. `"gemini-2.5-flash"`).
    pub model: String,
    /// Sampling temperature (0.0 – 2.0).  Lower = more deterministic.
    pub temperature: f32,
    /// Top-k sampling parameter.
    pub top_k: u32,
    /// Nucleus sampling parameter.
    pub top_p: f32,
    /// Upper bound on the generated token count.
    pub max_output_tokens: u32,
    /// Maximum seconds to wait for one API response before timing out.
    ///
    /// Audio uploads are large and minutes are long; this is per attempt,
    /// not per generation.
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            model: "gemini-2.5-flash".into(),
            temperature: 0.3,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
            timeout_secs: 300,
        }
    }
}

// ---------------------------------------------------------------------------
// RetryConfig
// ---------------------------------------------------------------------------

/// Settings for the retry/backoff wrapper around the Gemini call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of calls per generation (first attempt included).
    pub max_attempts: u32,
    /// Base backoff delay in milliseconds; the delay before attempt *n+1*
    /// is `base_delay_ms * 2^(n-1)`.
    pub base_delay_ms: u64,
    /// Successful responses shorter than this (in characters) are treated
    /// as suspect and retried while attempts remain.
    pub min_response_chars: usize,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 2_000,
            min_response_chars: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use minutes_gen::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let mut config = AppConfig::load().unwrap();
/// config.gemini.model = "gemini-2.5-pro".into();
/// config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API call settings.
    pub gemini: GeminiConfig,
    /// Retry/backoff policy settings.
    pub retry: RetryConfig,
    /// Template id used when `--template` is not given.
    pub default_template: Option<String>,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        // GeminiConfig
        assert_eq!(original.gemini.endpoint, loaded.gemini.endpoint);
        assert_eq!(original.gemini.model, loaded.gemini.model);
        assert_eq!(original.gemini.temperature, loaded.gemini.temperature);
        assert_eq!(original.gemini.top_k, loaded.gemini.top_k);
        assert_eq!(original.gemini.top_p, loaded.gemini.top_p);
        assert_eq!(
            original.gemini.max_output_tokens,
            loaded.gemini.max_output_tokens
        );
        assert_eq!(original.gemini.timeout_secs, loaded.gemini.timeout_secs);

        // RetryConfig
        assert_eq!(original.retry.max_attempts, loaded.retry.max_attempts);
        assert_eq!(original.retry.base_delay_ms, loaded.retry.base_delay_ms);
        assert_eq!(
            original.retry.min_response_chars,
            loaded.retry.min_response_chars
        );

        assert_eq!(original.default_template, loaded.default_template);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.gemini.model, default.gemini.model);
        assert_eq!(config.retry.max_attempts, default.retry.max_attempts);
        assert_eq!(config.retry.base_delay_ms, default.retry.base_delay_ms);
        assert!(config.default_template.is_none());
    }

    /// A partially-written settings file with an unknown model still loads
    /// the retry section correctly.
    #[test]
    fn custom_values_survive_round_trip() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let mut config = AppConfig::default();
        config.gemini.model = "gemini-2.5-pro".into();
        config.retry.max_attempts = 5;
        config.retry.base_delay_ms = 500;
        config.default_template = Some("summary".into());
        config.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(loaded.gemini.model, "gemini-2.5-pro");
        assert_eq!(loaded.retry.max_attempts, 5);
        assert_eq!(loaded.retry.base_delay_ms, 500);
        assert_eq!(loaded.default_template.as_deref(), Some("summary"));
    }
}
