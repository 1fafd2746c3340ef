//! `move_to`: steer a body to a world position and stop exactly on it.
//!
//! Three mutually exclusive modes, all reduced to the acceleration form when
//! the behavior is built:
//!
//! | Mode    | Options                             | Reduced to                              |
//! |---------|-------------------------------------|-----------------------------------------|
//! | time    | `time`                              | speed `distance / time` (computed once) |
//! | speed   | `speed`                             | accel `0`, start `speed`, max `speed`   |
//! | accel   | `accel`, `start_speed`, `max_speed` | itself                                  |
//!
//! Speeds are stored in units per second and converted with the
//! `ticks_per_second + 1` divisor on every tick, so a tick-rate change
//! mid-flight is honoured.  `accel` is added to that speed once per tick,
//! which raises the per-tick step by `accel / (tps + 1)` each tick.
//!
//! Per tick, until the stop flag is set:
//!
//! ```text
//! speed  = min(speed + accel, max_speed)
//! step   = speed / (tps + 1)
//! move     step along (target - position).normalize()
//! stop   = distance_to(target) - step < 0   (or distance_to(target) == 0)
//! ```
//!
//! On the tick after the flag is set the body is snapped onto the target,
//! the speed reset and the behavior removed.
//!
//! A mode whose speed never becomes positive (negative acceleration with no
//! start speed, for instance) never reaches the target and never finishes.
//! Wrap it in [`timed`](live_behavior::timed) to bound it.

use glam::Vec3;
use live_behavior::{Action, Behavior, BehaviorContext, BehaviorResult};
use live_core::Space;

use crate::{Body, MotionError, MotionResult, Transform};

// ── Options ───────────────────────────────────────────────────────────────────

/// Keyword-style arguments for [`move_to`].
///
/// Set exactly one of `time`, `speed`, `accel`; `start_speed` and `max_speed`
/// are only valid next to `accel`.  Anything else is rejected by
/// [`MoveOptions::mode`].
///
/// ```rust
/// use live_entity::{MoveMode, MoveOptions};
///
/// let mode = MoveOptions::accel(2.0).max_speed(3.0).mode().unwrap();
/// assert_eq!(mode, MoveMode::Accel { accel: 2.0, start_speed: 0.0, max_speed: Some(3.0) });
///
/// assert!(MoveOptions::speed(1.0).max_speed(3.0).mode().is_err());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MoveOptions {
    pub time:        Option<f32>,
    pub speed:       Option<f32>,
    pub accel:       Option<f32>,
    pub start_speed: Option<f32>,
    pub max_speed:   Option<f32>,
}

impl MoveOptions {
    /// Reach the target in `seconds`.
    pub fn time(seconds: f32) -> Self {
        Self { time: Some(seconds), ..Self::default() }
    }

    /// Travel at a constant `units_per_sec`.
    pub fn speed(units_per_sec: f32) -> Self {
        Self { speed: Some(units_per_sec), ..Self::default() }
    }

    /// Gain `units_per_sec` of speed every tick, starting from rest and
    /// unbounded unless [`start_speed`](Self::start_speed) /
    /// [`max_speed`](Self::max_speed) are chained.
    pub fn accel(units_per_sec: f32) -> Self {
        Self { accel: Some(units_per_sec), ..Self::default() }
    }

    pub fn start_speed(mut self, units_per_sec: f32) -> Self {
        self.start_speed = Some(units_per_sec);
        self
    }

    pub fn max_speed(mut self, units_per_sec: f32) -> Self {
        self.max_speed = Some(units_per_sec);
        self
    }

    /// Check the option combination and resolve it into a [`MoveMode`].
    ///
    /// Precedence when several primary keys are present is `accel`, then
    /// `speed`, then `time`; the others are then reported as invalid for the
    /// chosen mode.
    pub fn mode(&self) -> MotionResult<MoveMode> {
        let fields = [
            ("time", self.time),
            ("speed", self.speed),
            ("accel", self.accel),
            ("start_speed", self.start_speed),
            ("max_speed", self.max_speed),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(MotionError::NonFinite { key, value });
                }
            }
        }

        if let Some(accel) = self.accel {
            reject("accel", &[("time", self.time), ("speed", self.speed)])?;
            let start_speed = non_negative("start_speed", self.start_speed.unwrap_or(0.0))?;
            let max_speed = self.max_speed.map(|m| non_negative("max_speed", m)).transpose()?;
            return Ok(MoveMode::Accel { accel, start_speed, max_speed });
        }

        if let Some(speed) = self.speed {
            reject("speed", &[
                ("time", self.time),
                ("start_speed", self.start_speed),
                ("max_speed", self.max_speed),
            ])?;
            return Ok(MoveMode::Speed(non_negative("speed", speed)?));
        }

        if let Some(time) = self.time {
            reject("time", &[("start_speed", self.start_speed), ("max_speed", self.max_speed)])?;
            if time <= 0.0 {
                return Err(MotionError::NonPositiveTime(time));
            }
            return Ok(MoveMode::Time(time));
        }

        Err(MotionError::MissingMode)
    }
}

fn reject(mode: &'static str, extra: &[(&'static str, Option<f32>)]) -> MotionResult<()> {
    match extra.iter().find(|(_, v)| v.is_some()) {
        Some((key, _)) => Err(MotionError::InvalidOption { key: *key, mode }),
        None           => Ok(()),
    }
}

fn non_negative(key: &'static str, value: f32) -> MotionResult<f32> {
    if value < 0.0 {
        Err(MotionError::Negative { key, value })
    } else {
        Ok(value)
    }
}

/// A validated kinematic mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveMode {
    /// Arrive after this many seconds.
    Time(f32),
    /// Constant speed, units per second.
    Speed(f32),
    Accel {
        accel:       f32,
        start_speed: f32,
        max_speed:   Option<f32>,
    },
}

// ── MoveTo ────────────────────────────────────────────────────────────────────

/// Target-seeking behavior.  Build with [`move_to`].
#[derive(Clone, Debug)]
pub struct MoveTo {
    target:        Vec3,
    accel:         f32,
    max_speed:     Option<f32>,
    current_speed: f32,
    stop_next:     bool,
}

impl MoveTo {
    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Current speed in units per second.
    #[inline]
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// `true` once the next tick will snap onto the target.
    #[inline]
    pub fn is_arriving(&self) -> bool {
        self.stop_next
    }
}

/// Build a behavior that moves `body` to `target` in world space.
///
/// `body` is only read here (time mode needs the starting distance); pass
/// the body the behavior will be registered on.
pub fn move_to<T: Transform>(body: &Body<T>, target: Vec3, options: MoveOptions) -> MotionResult<MoveTo> {
    let (accel, start_speed, max_speed) = match options.mode()? {
        MoveMode::Accel { accel, start_speed, max_speed } => (accel, start_speed, max_speed),
        MoveMode::Speed(speed) => (0.0, speed, Some(speed)),
        MoveMode::Time(time) => {
            let speed = body.distance_to(target) / time;
            (0.0, speed, Some(speed))
        }
    };
    Ok(MoveTo {
        target,
        accel,
        max_speed,
        current_speed: start_speed,
        stop_next: false,
    })
}

impl<T: Transform, A: 'static> Behavior<Body<T>, A> for MoveTo {
    fn tick(&mut self, ctx: &mut BehaviorContext<'_, Body<T>, A>) -> BehaviorResult<Action<Body<T>, A>> {
        let body = &mut *ctx.owner;

        if self.stop_next {
            body.set_world_position(self.target);
            self.current_speed = 0.0;
            return Ok(Action::Remove);
        }

        self.current_speed += self.accel;
        if let Some(max) = self.max_speed {
            self.current_speed = self.current_speed.min(max);
        }

        let step = body.rate().per_tick(self.current_speed);
        let direction = body.direction_to(self.target);
        body.transform.translate(direction * step, Space::World);

        // Already on target with zero speed counts as arrived too.
        let remaining = body.distance_to(self.target);
        if remaining - step < 0.0 || remaining == 0.0 {
            self.stop_next = true;
        }
        Ok(Action::Continue)
    }

    fn label(&self) -> &'static str {
        "move_to"
    }
}
