//! Simulation time model.
//!
//! # Design
//!
//! Two different notions of time coexist:
//!
//! - **Frame time** counts ticks.  `FrameClock` holds the current `Tick` and
//!   the configured `TickRate`; motion primitives use the rate to turn "per
//!   second" amounts into per-tick deltas.
//! - **Timer time** is continuous seconds read from a [`Clock`].  Countdowns
//!   capture a deadline against a clock and compare it with `now()` on every
//!   read.  `WallClock` follows the host's monotonic clock; `ManualClock` is
//!   advanced explicitly (by tests, or by the scene once per tick when the
//!   simulated time source is selected).
//!
//! The per-second conversion divides by `ticks_per_second + 1`, not by
//! `ticks_per_second`.  Tuned motion depends on that damping constant.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::{LiveError, LiveResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickRate ──────────────────────────────────────────────────────────────────

/// Logic ticks per second, as reported by the host's frame-rate clock.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TickRate(f32);

impl TickRate {
    /// 60 ticks per second.
    pub const DEFAULT: TickRate = TickRate(60.0);

    /// Validate and wrap a rate.  Rejects zero, negative, and non-finite values.
    pub fn new(ticks_per_second: f32) -> LiveResult<Self> {
        if ticks_per_second.is_finite() && ticks_per_second > 0.0 {
            Ok(TickRate(ticks_per_second))
        } else {
            Err(LiveError::InvalidTickRate(ticks_per_second))
        }
    }

    #[inline]
    pub fn ticks_per_second(self) -> f32 {
        self.0
    }

    /// The divisor applied to per-second quantities: `ticks_per_second + 1`.
    #[inline]
    pub fn divisor(self) -> f32 {
        self.0 + 1.0
    }

    /// Convert a per-second amount into the per-tick delta.
    #[inline]
    pub fn per_tick(self, per_second: f32) -> f32 {
        per_second / self.divisor()
    }

    /// Length of one tick in seconds.
    #[inline]
    pub fn tick_secs(self) -> f64 {
        1.0 / self.0 as f64
    }
}

impl Default for TickRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TickRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} tps", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Tracks the current tick and the rate ticks are produced at.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    pub rate: TickRate,
    /// The current tick.  Advanced by `FrameClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl FrameClock {
    pub fn new(rate: TickRate) -> Self {
        Self { rate, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed frame time in seconds at the current rate.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.rate.tick_secs()
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3}s @ {})", self.current_tick, self.elapsed_secs(), self.rate)
    }
}

// ── Clock sources ─────────────────────────────────────────────────────────────

/// A source of monotonically non-decreasing seconds.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Seconds since an arbitrary, fixed origin.
    fn now(&self) -> f64;
}

/// Clock handle shared by every countdown created in a scene.
pub type SharedClock = Arc<dyn Clock>;

/// The host's monotonic wall clock.
#[derive(Debug)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }

    /// Convenience constructor returning a [`SharedClock`].
    pub fn shared() -> SharedClock {
        Arc::new(Self::new())
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to.
///
/// Cloning yields another handle to the same time value, so a test (or the
/// scene) can keep one handle to advance while countdowns read through a
/// [`SharedClock`] built from another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    /// Start at `0.0` seconds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `secs`.
    pub fn advance(&self, secs: f64) {
        self.set(self.now() + secs);
    }

    /// Jump to an absolute time.
    pub fn set(&self, secs: f64) {
        self.bits.store(secs.to_bits(), Ordering::Release);
    }

    /// A [`SharedClock`] reading this clock.
    pub fn shared(&self) -> SharedClock {
        Arc::new(self.clone())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}
