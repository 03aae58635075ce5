//! Resilience layer for tagging API calls.
//!
//! Tagging endpoints throttle aggressively when many resources are updated
//! at once; calls are retried with exponential backoff.

mod retry;

pub use retry::{RetryConfig, RetryPolicy};
