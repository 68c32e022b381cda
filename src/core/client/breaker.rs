//! Circuit breaker guarding the upstream provider.
//!
//! Closed counts consecutive failures; at the threshold the circuit opens and
//! every call fails fast until the cool-down elapses. The first call after
//! the cool-down runs as a half-open trial: success closes the circuit,
//! failure re-opens it and restarts the cool-down. Calls arriving while a
//! trial is in flight fail fast.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::core::FxError;

/// Configuration for the circuit breaker.
#[derive(Clone, Debug)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the circuit.
    pub failure_threshold: u32,
    /// How long the circuit stays open before admitting a trial call.
    pub cooldown: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            cooldown: Duration::from_secs(30),
        }
    }
}

/// Observable breaker state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CircuitState {
    /// Calls flow normally.
    Closed,
    /// Calls fail fast until the cool-down elapses.
    Open,
    /// One trial call is in flight.
    HalfOpen,
}

#[derive(Debug)]
enum State {
    Closed,
    Open { until: Instant },
    HalfOpen,
}

#[derive(Debug)]
struct Inner {
    state: State,
    consecutive_failures: u32,
}

/// An explicit Closed → Open → HalfOpen state machine. No I/O of its own;
/// callers report outcomes via [`record_success`](Self::record_success) and
/// [`record_failure`](Self::record_failure).
#[derive(Debug)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    /// Create a breaker in the closed state.
    #[must_use]
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(Inner {
                state: State::Closed,
                consecutive_failures: 0,
            }),
        }
    }

    /// Decide whether a call may proceed.
    ///
    /// Open circuits reject with [`FxError::CircuitOpen`] until the cool-down
    /// elapses; the first call after that is admitted as the half-open trial.
    pub fn admit(&self) -> Result<(), FxError> {
        let mut guard = self.lock();
        match guard.state {
            State::Closed => Ok(()),
            State::Open { until } => {
                let now = Instant::now();
                if now >= until {
                    guard.state = State::HalfOpen;
                    Ok(())
                } else {
                    Err(FxError::CircuitOpen {
                        retry_after: until - now,
                    })
                }
            }
            State::HalfOpen => Err(FxError::CircuitOpen {
                retry_after: Duration::ZERO,
            }),
        }
    }

    /// Report a successful call: resets the failure count and closes the circuit.
    pub fn record_success(&self) {
        let mut guard = self.lock();
        guard.consecutive_failures = 0;
        guard.state = State::Closed;
    }

    /// Report a failed call. A failed half-open trial re-opens immediately;
    /// in the closed state the circuit opens once the threshold is reached.
    pub fn record_failure(&self) {
        let mut guard = self.lock();
        guard.consecutive_failures = guard.consecutive_failures.saturating_add(1);
        let reopen = matches!(guard.state, State::HalfOpen)
            || guard.consecutive_failures >= self.config.failure_threshold;
        if reopen {
            guard.state = State::Open {
                until: Instant::now() + self.config.cooldown,
            };
        }
    }

    /// The current state, for observability.
    pub fn state(&self) -> CircuitState {
        match self.lock().state {
            State::Closed => CircuitState::Closed,
            State::Open { .. } => CircuitState::Open,
            State::HalfOpen => CircuitState::HalfOpen,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // The state is a plain value; a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
