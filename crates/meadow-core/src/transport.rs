//! Simulated message delivery for the contact form.
//!
//! There is no backend: a send waits a fixed delay, logs the message and then
//! fails at a configurable rate. The random sample is passed in so callers
//! (and tests) decide the outcome.

use std::time::Duration;
use thiserror::Error;

/// Why a message could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// Injected failure
    #[error("simulated network error")]
    Simulated,
    /// The host could not run the send (timer or promise failure)
    #[error("network failure: {0}")]
    Network(String),
}

/// Delay-then-maybe-fail transport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedTransport {
    delay: Duration,
    failure_probability: f64,
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500), 0.1)
    }
}

impl SimulatedTransport {
    /// Transport with the given delay and failure rate (clamped to [0, 1]).
    #[must_use]
    pub fn new(delay: Duration, failure_probability: f64) -> Self {
        Self {
            delay,
            failure_probability: failure_probability.clamp(0.0, 1.0),
        }
    }

    /// Transport that always delivers.
    #[must_use]
    pub fn reliable(delay: Duration) -> Self {
        Self::new(delay, 0.0)
    }

    /// Transport that always fails.
    #[must_use]
    pub fn failing(delay: Duration) -> Self {
        Self::new(delay, 1.0)
    }

    /// How long a send takes.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Failure rate in [0, 1].
    #[must_use]
    pub const fn failure_probability(&self) -> f64 {
        self.failure_probability
    }

    /// Outcome of a send once the delay has elapsed. `sample` is uniform in
    /// [0, 1); the send fails when it falls below the failure rate.
    pub fn settle(&self, message: &str, sample: f64) -> Result<(), SendError> {
        log::info!("message to send: {message}");
        if sample < self.failure_probability {
            Err(SendError::Simulated)
        } else {
            Ok(())
        }
    }
}

/// Map four random bytes to a uniform sample in [0, 1).
#[must_use]
pub fn unit_sample(bytes: [u8; 4]) -> f64 {
    f64::from(u32::from_le_bytes(bytes)) / (f64::from(u32::MAX) + 1.0)
}
