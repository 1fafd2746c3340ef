//! A countdown that reports the seconds left until a fixed deadline.

use std::cmp::Ordering;
use std::fmt;

use crate::SharedClock;

/// Counts down to zero against a [`Clock`](crate::Clock).
///
/// The deadline is captured once, at construction.  Reading the value is a
/// pure computation (`max(0, deadline - now)`); nothing is stored between
/// reads, and there is no reset.  Build a new countdown to restart.
///
/// ```
/// use live_core::{Countdown, ManualClock};
///
/// let clock = ManualClock::new();
/// let timer = Countdown::start(&clock.shared(), 2.0);
/// assert!(timer > 0.0);
/// clock.advance(2.5);
/// assert_eq!(timer.remaining(), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Countdown {
    clock:    SharedClock,
    deadline: f64,
}

impl Countdown {
    /// Start counting `seconds` from the clock's current time.
    pub fn start(clock: &SharedClock, seconds: f64) -> Self {
        Self {
            clock:    clock.clone(),
            deadline: clock.now() + seconds,
        }
    }

    /// Seconds left, or `0.0` once the deadline has passed.
    #[inline]
    pub fn remaining(&self) -> f64 {
        (self.deadline - self.clock.now()).max(0.0)
    }

    /// `true` once no time remains.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.remaining() <= 0.0
    }
}

impl PartialEq<f64> for Countdown {
    fn eq(&self, other: &f64) -> bool {
        self.remaining() == *other
    }
}

impl PartialOrd<f64> for Countdown {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.remaining().partial_cmp(other)
    }
}

impl From<&Countdown> for f64 {
    fn from(timer: &Countdown) -> f64 {
        timer.remaining()
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.remaining())
    }
}
