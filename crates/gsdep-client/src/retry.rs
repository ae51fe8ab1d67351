use std::time::Duration;

/// Retry policy for the handshake loop.
///
/// The default reproduces the protocol's historical behavior: one attempt
/// every 100 ms with no attempt limit. Callers that need a bounded wait
/// set `max_attempts`, or close the transport out-of-band from another
/// thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed backoff between handshake attempts.
    pub interval: Duration,
    /// Give up after this many attempts. `None` retries indefinitely.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// A policy that gives up after `max_attempts` attempts.
    pub fn bounded(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: Some(max_attempts),
        }
    }
}
