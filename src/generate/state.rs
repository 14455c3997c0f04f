//! Generation phase state machine.
//!
//! [`GenerationPhase`] tracks where a generation currently is.  The
//! transitions are:
//!
//! ```text
//! Attempting ──success (looks complete)──▶ Succeeded
//!            ──suspect / retryable error─▶ BackingOff ──delay elapsed──▶ Attempting
//!            ──attempts used up──────────▶ Exhausted
//! ```
//!
//! The CLI derives a status line from the phase; only the backoff delay
//! suspends, so the process stays responsive throughout.

/// States of a single generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    /// A call to the API is in flight.
    Attempting,

    /// The previous attempt failed or looked truncated; waiting out the
    /// exponential backoff delay before the next call.
    BackingOff,

    /// The generated text was accepted.
    Succeeded,

    /// All attempts are used up (or a non-retryable error stopped the loop).
    Exhausted,
}

impl GenerationPhase {
    /// `true` while the generation is still running.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            GenerationPhase::Attempting | GenerationPhase::BackingOff
        )
    }

    /// A short human-readable label for status display.
    pub fn label(&self) -> &'static str {
        match self {
            GenerationPhase::Attempting => "Generating",
            GenerationPhase::BackingOff => "Retrying",
            GenerationPhase::Succeeded => "Done",
            GenerationPhase::Exhausted => "Failed",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempting_and_backing_off_are_in_flight() {
        assert!(GenerationPhase::Attempting.is_in_flight());
        assert!(GenerationPhase::BackingOff.is_in_flight());
    }

    #[test]
    fn terminal_phases_are_not_in_flight() {
        assert!(!GenerationPhase::Succeeded.is_in_flight());
        assert!(!GenerationPhase::Exhausted.is_in_flight());
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(GenerationPhase::Attempting.label(), "Generating");
        assert_eq!(GenerationPhase::BackingOff.label(), "Retrying");
        assert_eq!(GenerationPhase::Succeeded.label(), "Done");
        assert_eq!(GenerationPhase::Exhausted.label(), "Failed");
    }
}
