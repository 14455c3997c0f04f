//! Configuration module for minutes-gen.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the Gemini
//! client and the retry policy, `AppPaths` for cross-platform config
//! directories, `ApiKeyStore` for credential persistence, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.

pub mod credential;
pub mod paths;
pub mod settings;

pub use credential::ApiKeyStore;
pub use paths::AppPaths;
pub use settings::{AppConfig, GeminiConfig, RetryConfig};
