//! minutes-gen — meeting-minutes generation from audio recordings.
//!
//! Sends an audio file together with a prompt template to the Gemini
//! `generateContent` API and prints the generated minutes. The interesting
//! part is the bounded retry/backoff wrapper around the single external call:
//! transient transport errors are retried, and successful responses that look
//! truncated are treated as suspect and retried as well.
//!
//! # Module map
//!
//! * [`cli`] — clap argument surface and progress-line formatting.
//! * [`config`] — settings (`settings.toml`), platform paths, API key store.
//! * [`template`] — static prompt-template catalog with `{fileName}`
//!   substitution.
//! * [`media`] — audio payload loading and MIME handling.
//! * [`gemini`] — the [`ContentGenerator`](gemini::ContentGenerator) trait
//!   and the reqwest-based [`GeminiClient`](gemini::GeminiClient).
//! * [`generate`] — retry policy tables, the retry loop, and progress events.

pub mod cli;
pub mod config;
pub mod generate;
pub mod gemini;
pub mod media;
pub mod template;
