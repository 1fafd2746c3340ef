//! Time-boxed behaviors.
//!
//! `timed` runs an inner behavior until a countdown expires and then either
//! hands its slot to a followup or unregisters itself.  `suspend` is the same
//! thing around [`Idle`]: wait, then switch.
//!
//! ```text
//!   ┌──────────── timer > 0 ────────────┐
//!   │  inner.tick(ctx)                   │
//!   └───────────────────────────────────┘
//!                   │ timer == 0
//!                   ▼
//!   followup?  ── yes ──► Replace(followup)   (same id, same pause tag)
//!              ── no  ──► Remove
//! ```
//!
//! The countdown is captured when the wrapper is built, not on its first
//! tick.  A wrapper registered while its pause tag is active therefore keeps
//! counting down while skipped.

use live_core::{Countdown, SharedClock};

use crate::{Action, Behavior, BehaviorContext, BehaviorResult, Idle};

/// Runs `inner` while time remains, then switches to the followup or removes
/// itself.  Build with [`timed`] or [`suspend`].
pub struct Timed<E, A = ()> {
    inner:    Box<dyn Behavior<E, A>>,
    timer:    Countdown,
    followup: Option<Box<dyn Behavior<E, A>>>,
}

impl<E: 'static, A: 'static> Timed<E, A> {
    /// Wrap `inner` for `duration` seconds of `clock` time, starting now.
    pub fn new(inner: impl Behavior<E, A>, duration: f64, clock: &SharedClock) -> Self {
        Self {
            inner:    Box::new(inner),
            timer:    Countdown::start(clock, duration),
            followup: None,
        }
    }

    /// Take over the slot with `followup` once the time is up.
    pub fn then(mut self, followup: impl Behavior<E, A>) -> Self {
        self.followup = Some(Box::new(followup));
        self
    }

    /// Seconds left before the switch.
    #[inline]
    pub fn remaining(&self) -> f64 {
        self.timer.remaining()
    }

    pub fn has_followup(&self) -> bool {
        self.followup.is_some()
    }
}

impl<E: 'static, A: 'static> Behavior<E, A> for Timed<E, A> {
    /// While time remains, the inner action is honoured with one exception:
    /// `Replace` swaps the *inner* behavior and keeps the countdown running.
    /// An inner `Remove` ends the wrapper early without running the followup.
    fn tick(&mut self, ctx: &mut BehaviorContext<'_, E, A>) -> BehaviorResult<Action<E, A>> {
        if self.timer > 0.0 {
            return match self.inner.tick(ctx)? {
                Action::Replace(next) => {
                    self.inner = next;
                    Ok(Action::Continue)
                }
                action => Ok(action),
            };
        }

        Ok(match self.followup.take() {
            Some(next) => Action::Replace(next),
            None       => Action::Remove,
        })
    }

    fn label(&self) -> &'static str {
        "timed"
    }
}

/// Run `inner` for `duration` seconds, then remove it.
///
/// Chain [`Timed::then`] to hand the slot to another behavior instead.
pub fn timed<E: 'static, A: 'static>(
    inner:    impl Behavior<E, A>,
    duration: f64,
    clock:    &SharedClock,
) -> Timed<E, A> {
    Timed::new(inner, duration, clock)
}

/// Do nothing for `duration` seconds, then remove (or, with
/// [`Timed::then`], switch to a followup).
pub fn suspend<E: 'static, A: 'static>(duration: f64, clock: &SharedClock) -> Timed<E, A> {
    Timed::new(Idle, duration, clock)
}
