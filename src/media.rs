//! Audio payload loading and MIME handling.
//!
//! [`AudioPayload`] carries the raw file bytes plus the MIME type sent to the
//! Gemini API as `inlineData`.  MIME detection uses `mime_guess` on the file
//! extension, with one correction: `.m4a` files are commonly reported as
//! `audio/m4a` or `audio/x-m4a`, but the API expects the container type
//! `audio/mp4`, so those are rewritten before upload.
//!
//! Supported inputs are anything with an `audio/*` MIME type plus `video/mp4`
//! (voice memos and screen recordings are often MP4 containers).  Everything
//! else is rejected before any network call is made.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Fallback when the extension is unknown to `mime_guess`.
const DEFAULT_AUDIO_MIME: &str = "audio/mpeg";

/// Errors from loading an audio file.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The file's MIME type is neither `audio/*` nor `video/mp4`.
    #[error("unsupported file type {mime_type} for {file_name}; expected an audio file (MP3, WAV, M4A, MP4, …)")]
    UnsupportedFileType {
        file_name: String,
        mime_type: String,
    },

    /// Reading the file from disk failed.
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// An audio file ready to be attached to a generation request.
#[derive(Debug, Clone)]
pub struct AudioPayload {
    /// File name (no directory components) — substituted into prompts.
    pub file_name: String,
    /// MIME type sent with the inline data, after correction.
    pub mime_type: String,
    /// Raw file bytes; base64-encoded at request-build time.
    pub data: Vec<u8>,
}

impl AudioPayload {
    /// Load an audio file from `path`, detecting and correcting its MIME
    /// type and rejecting unsupported formats.
    pub fn from_path(path: &Path) -> Result<Self, MediaError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mime_type = corrected_mime_type(path);

        if !is_supported(&mime_type) {
            return Err(MediaError::UnsupportedFileType {
                file_name,
                mime_type,
            });
        }

        let data = fs::read(path).map_err(|source| MediaError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self {
            file_name,
            mime_type,
            data,
        })
    }
}

/// Detect the MIME type from the file extension and apply the m4a
/// container correction.
fn corrected_mime_type(path: &Path) -> String {
    let guessed = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_AUDIO_MIME);

    match guessed {
        // The MP4 audio container goes out as audio/mp4 regardless of how
        // the extension maps locally.
        "audio/m4a" | "audio/x-m4a" => "audio/mp4".to_string(),
        other => other.to_string(),
    }
}

fn is_supported(mime_type: &str) -> bool {
    mime_type.starts_with("audio/") || mime_type == "video/mp4"
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
