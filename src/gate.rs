//! Condition gate: bounded polling wait
//!
//! The reusable synchronization primitive between mechanical actions and the
//! motion sequence: poll a predicate over live sensor/mechanism state at a
//! fixed cadence until it holds or a time bound elapses, then let the caller
//! proceed either way. Replaces the ad hoc elapsed-time loops that otherwise
//! accumulate at every wait site.

use crate::error::{Error, Result};
use std::thread;
use std::time::{Duration, Instant};

/// Terminal state of a gate invocation
///
/// Both outcomes are ordinary values; in a routine the sequencer proceeds to
/// the next entry identically in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Predicate became true within the bound
    Satisfied,
    /// Bound elapsed with the predicate still false
    TimedOut,
}

impl GateOutcome {
    /// Check for the satisfied case
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied)
    }
}

/// Block until `predicate` returns true or `max_wait` elapses.
///
/// The predicate is evaluated before the first sleep, so an already-true
/// condition returns `Satisfied` without sleeping. Between evaluations the
/// calling thread sleeps `poll` (cooperative yield, never a busy spin — the
/// pose-tracking task shares the cores). Worst-case overshoot past the bound
/// is one poll interval.
///
/// The gate only reads; predicate panics propagate to the caller.
pub fn wait(mut predicate: impl FnMut() -> bool, poll: Duration, max_wait: Duration) -> GateOutcome {
    let start = Instant::now();
    loop {
        if predicate() {
            return GateOutcome::Satisfied;
        }
        if start.elapsed() >= max_wait {
            return GateOutcome::TimedOut;
        }
        thread::sleep(poll);
    }
}

/// Validated poll-cadence/time-bound pair
///
/// The data half of a gate; `GateSpec` entries in a routine carry the same
/// fields plus the condition to poll.
#[derive(Debug, Clone, Copy)]
pub struct ConditionGate {
    poll: Duration,
    max_wait: Duration,
}

impl ConditionGate {
    /// Create a gate, rejecting invalid bounds
    ///
    /// Requires `poll > 0` and `poll <= max_wait`.
    pub fn new(poll: Duration, max_wait: Duration) -> Result<Self> {
        if poll.is_zero() {
            return Err(Error::InvalidParameter("gate poll interval must be > 0".into()));
        }
        if poll > max_wait {
            return Err(Error::InvalidParameter(format!(
                "gate poll interval {:?} exceeds max wait {:?}",
                poll, max_wait
            )));
        }
        Ok(Self { poll, max_wait })
    }

    /// Poll cadence
    pub fn poll(&self) -> Duration {
        self.poll
    }

    /// Upper time bound
    pub fn max_wait(&self) -> Duration {
        self.max_wait
    }

    /// Block on `predicate` with this gate's bounds
    pub fn wait(&self, predicate: impl FnMut() -> bool) -> GateOutcome {
        wait(predicate, self.poll, self.max_wait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_true_returns_without_sleeping() {
        let start = Instant::now();
        let outcome = wait(|| true, Duration::from_millis(50), Duration::from_millis(500));
        assert_eq!(outcome, GateOutcome::Satisfied);
        // Never slept a poll interval
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_timeout_bounded_overshoot() {
        let poll = Duration::from_millis(10);
        let max_wait = Duration::from_millis(60);

        let start = Instant::now();
        let outcome = wait(|| false, poll, max_wait);
        let elapsed = start.elapsed();

        assert_eq!(outcome, GateOutcome::TimedOut);
        assert!(elapsed >= max_wait);
        // Overshoot is at most one poll interval (plus scheduler slack)
        assert!(elapsed < max_wait + poll + Duration::from_millis(30));
    }

    #[test]
    fn test_satisfied_mid_wait() {
        let start = Instant::now();
        let outcome = wait(
            || start.elapsed() >= Duration::from_millis(40),
            Duration::from_millis(5),
            Duration::from_millis(500),
        );
        let elapsed = start.elapsed();

        assert_eq!(outcome, GateOutcome::Satisfied);
        assert!(elapsed >= Duration::from_millis(40));
        // Returned near the trigger time, not the full bound
        assert!(elapsed < Duration::from_millis(200));
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        assert!(ConditionGate::new(Duration::ZERO, Duration::from_millis(100)).is_err());
        assert!(ConditionGate::new(Duration::from_millis(200), Duration::from_millis(100)).is_err());
        assert!(ConditionGate::new(Duration::from_millis(10), Duration::from_millis(10)).is_ok());
    }

    #[test]
    fn test_predicate_observes_external_state() {
        let mut calls = 0u32;
        let outcome = wait(
            || {
                calls += 1;
                calls >= 3
            },
            Duration::from_millis(1),
            Duration::from_millis(500),
        );
        assert_eq!(outcome, GateOutcome::Satisfied);
        assert_eq!(calls, 3);
    }
}
