//! Retry/backoff wrapper around the Gemini call.
//!
//! This is the one piece of real logic in the crate: a bounded retry state
//! machine (attempting → backing-off → succeeded / exhausted) driven by two
//! independent classifications:
//!
//! * transport/quota errors whose message matches a retryable marker are
//!   retried; anything else aborts once more than one attempt has been made;
//! * successful responses that look truncated (too short, trailing ellipsis,
//!   continuation marker, no terminal punctuation) are treated as suspect
//!   and retried while attempts remain.
//!
//! Backoff between attempts grows exponentially from a configured base delay
//! and is awaited with `tokio::time::sleep`, so nothing blocks while the
//! wrapper waits.  Progress is reported over an mpsc channel of
//! [`GenerationEvent`]s.

pub mod policy;
pub mod runner;
pub mod state;

pub use policy::{IncompleteReason, RetryPolicy};
pub use runner::{run_generation, GenerateError, GenerationEvent};
pub use state::GenerationPhase;
