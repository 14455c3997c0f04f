//! Command-line argument surface and progress-line formatting.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::generate::GenerationEvent;

/// Generate meeting minutes from audio recordings with the Gemini API.
#[derive(Parser, Debug)]
#[command(name = "minutes-gen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging (equivalent to RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate minutes from an audio file
    Generate {
        /// Path to the audio file (MP3, WAV, M4A, MP4, …)
        file: PathBuf,

        /// Template id (see `minutes-gen templates`)
        #[arg(short, long)]
        template: Option<String>,

        /// Write the generated text to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Model identifier, overriding the configured default
        #[arg(long)]
        model: Option<String>,

        /// API key for this run (takes precedence over GEMINI_API_KEY and
        /// the stored key)
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,
    },

    /// List the available prompt templates
    Templates,

    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeyAction {
    /// Save an API key for future runs
    Set {
        /// The Gemini API key (from Google AI Studio)
        key: String,
    },
    /// Remove the stored API key
    Clear,
    /// Show whether an API key is stored
    Status,
}

/// Render a progress event as a one-line status message.
///
/// Progress goes to stderr so stdout stays clean for the generated text.
pub fn progress_line(event: &GenerationEvent) -> String {
    match event {
        GenerationEvent::AttemptStarted {
            attempt,
            max_attempts,
        } => format!("Generating (attempt {attempt}/{max_attempts})..."),
        GenerationEvent::AttemptFailed {
            attempt,
            error,
            retryable,
        } => {
            if *retryable {
                format!("Attempt {attempt} failed: {error}")
            } else {
                format!("Attempt {attempt} failed (not retryable): {error}")
            }
        }
        GenerationEvent::ResponseSuspect { attempt, reason } => {
            format!("Attempt {attempt}: response looks incomplete ({reason})")
        }
        GenerationEvent::BackingOff { delay, .. } => {
            format!("Retrying in {:.1}s...", delay.as_secs_f64())
        }
        GenerationEvent::Completed { attempts } => {
            if *attempts == 1 {
                "Done.".to_string()
            } else {
                format!("Done after {attempts} attempts.")
            }
        }
        GenerationEvent::Exhausted { attempts } => {
            format!("Giving up after {attempts} attempts.")
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
