//! The bounded retry loop around one generation call.
//!
//! [`run_generation`] drives a single [`ContentGenerator`] through up to
//! `max_attempts` calls, sleeping out an exponential backoff between
//! attempts and emitting [`GenerationEvent`]s for the CLI to display.
//!
//! Two details are easy to miss:
//!
//! * the first failure is always retried, whatever the message; the
//!   retryable-marker classification only stops the loop from attempt 2 on;
//! * a suspect (truncated-looking) success is kept — if every remaining
//!   attempt also comes back suspect, or a later attempt errors terminally,
//!   the last suspect text is returned rather than nothing.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::gemini::{ContentGenerator, GeminiError};
use crate::generate::policy::{IncompleteReason, RetryPolicy};
use crate::generate::state::GenerationPhase;
use crate::media::AudioPayload;

// ---------------------------------------------------------------------------
// GenerateError
// ---------------------------------------------------------------------------

/// Terminal failure of a generation request.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Every allowed attempt failed; carries the attempt count and the last
    /// underlying error.
    #[error("generation failed after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: GeminiError,
    },
}

// ---------------------------------------------------------------------------
// GenerationEvent
// ---------------------------------------------------------------------------

/// Progress events emitted while a generation runs.
///
/// Delivery is best-effort: a closed or full channel never stalls the loop
/// beyond the configured backoff.
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    /// A call to the API is starting.
    AttemptStarted { attempt: u32, max_attempts: u32 },
    /// The call failed; `retryable` reflects the marker classification.
    AttemptFailed {
        attempt: u32,
        error: String,
        retryable: bool,
    },
    /// The call succeeded but the response looks truncated.
    ResponseSuspect {
        attempt: u32,
        reason: IncompleteReason,
    },
    /// Waiting out the backoff delay before the next attempt.
    BackingOff { attempt: u32, delay: Duration },
    /// Generated text was accepted after `attempts` calls.
    Completed { attempts: u32 },
    /// The loop gave up after `attempts` calls.
    Exhausted { attempts: u32 },
}

impl GenerationEvent {
    /// The state-machine phase this event corresponds to.
    pub fn phase(&self) -> GenerationPhase {
        match self {
            GenerationEvent::AttemptStarted { .. } => GenerationPhase::Attempting,
            GenerationEvent::AttemptFailed { .. } => GenerationPhase::Attempting,
            GenerationEvent::ResponseSuspect { .. } => GenerationPhase::Attempting,
            GenerationEvent::BackingOff { .. } => GenerationPhase::BackingOff,
            GenerationEvent::Completed { .. } => GenerationPhase::Succeeded,
            GenerationEvent::Exhausted { .. } => GenerationPhase::Exhausted,
        }
    }
}

// ---------------------------------------------------------------------------
// run_generation
// ---------------------------------------------------------------------------

/// Run one generation request through the retry/backoff policy.
///
/// * `client`  – the external-call collaborator (real client or test double).
/// * `prompt`  – rendered template text.
/// * `payload` – audio bytes + MIME type.
/// * `policy`  – marker tables, attempt bound, backoff base.
/// * `events`  – progress channel; send failures are ignored.
pub async fn run_generation(
    client: &dyn ContentGenerator,
    prompt: &str,
    payload: &AudioPayload,
    policy: &RetryPolicy,
    events: &mpsc::Sender<GenerationEvent>,
) -> Result<String, GenerateError> {
    let mut attempt: u32 = 0;
    let mut last_suspect: Option<String> = None;

    loop {
        attempt += 1;
        let _ = events
            .send(GenerationEvent::AttemptStarted {
                attempt,
                max_attempts: policy.max_attempts,
            })
            .await;

        match client.generate(prompt, payload).await {
            Ok(text) => match policy.incomplete_reason(&text) {
                None => {
                    let _ = events
                        .send(GenerationEvent::Completed { attempts: attempt })
                        .await;
                    return Ok(text);
                }
                Some(reason) => {
                    log::warn!("attempt {attempt}: response looks incomplete ({reason})");
                    let _ = events
                        .send(GenerationEvent::ResponseSuspect {
                            attempt,
                            reason: reason.clone(),
                        })
                        .await;

                    if attempt >= policy.max_attempts {
                        // Out of attempts: hand back the suspect text as-is.
                        let _ = events
                            .send(GenerationEvent::Completed { attempts: attempt })
                            .await;
                        return Ok(text);
                    }
                    last_suspect = Some(text);
                }
            },
            Err(error) => {
                let message = error.to_string();
                let retryable = policy.is_retryable(&message);
                log::warn!("attempt {attempt} failed (retryable={retryable}): {message}");
                let _ = events
                    .send(GenerationEvent::AttemptFailed {
                        attempt,
                        error: message,
                        retryable,
                    })
                    .await;

                // The first failure is always retried; from the second
                // attempt on, a non-retryable error stops the loop.
                let give_up =
                    attempt >= policy.max_attempts || (attempt > 1 && !retryable);
                if give_up {
                    if let Some(text) = last_suspect {
                        log::warn!(
                            "returning earlier suspect response after terminal error on attempt {attempt}"
                        );
                        let _ = events
                            .send(GenerationEvent::Completed { attempts: attempt })
                            .await;
                        return Ok(text);
                    }
                    let _ = events
                        .send(GenerationEvent::Exhausted { attempts: attempt })
                        .await;
                    return Err(GenerateError::Exhausted {
                        attempts: attempt,
                        source: error,
                    });
                }
            }
        }

        let delay = policy.backoff_delay(attempt);
        let _ = events
            .send(GenerationEvent::BackingOff { attempt, delay })
            .await;
        tokio::time::sleep(delay).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
