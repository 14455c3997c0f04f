//! Gemini API collaborator.
//!
//! * [`ContentGenerator`] — async trait implemented by the real client and
//!   by test doubles; the retry wrapper only depends on this seam.
//! * [`GeminiClient`] — reqwest-based implementation of the
//!   `models/<id>:generateContent` REST call with an inline audio part.
//! * [`GeminiError`] — error variants for the external call.

pub mod client;
pub mod models;

pub use client::{ContentGenerator, GeminiClient, GeminiError};
