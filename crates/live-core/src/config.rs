//! Scene configuration.
//!
//! Typically loaded from a JSON/TOML file by the application crate and passed
//! to the scene builder.

use crate::{LiveError, LiveResult, TickRate};

/// What a behavior queue does when a behavior's `tick` returns an error.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailurePolicy {
    /// Log the error and keep the behavior registered.
    #[default]
    Isolate,
    /// Log the error and unregister the failing behavior.
    Evict,
    /// Stop the pass and return the error to the caller.
    Abort,
}

/// Where countdowns read their time from.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeSource {
    /// The host's monotonic clock.
    #[default]
    Wall,
    /// A manual clock the scene advances by one tick length per step.
    Simulated,
}

/// Top-level scene configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneConfig {
    /// Logic ticks per second.  Default: 60.
    pub tick_rate: f32,

    /// Ticks executed by `Scene::run`.  `0` means `run` returns immediately;
    /// use `run_ticks` for open-ended stepping.
    pub total_ticks: u64,

    /// Error handling applied by every behavior queue in the scene.
    pub failure_policy: FailurePolicy,

    /// Clock used by `timed`/`suspend` countdowns.
    pub time_source: TimeSource,
}

impl SceneConfig {
    /// Check every field; returns the validated tick rate.
    pub fn validate(&self) -> LiveResult<TickRate> {
        let rate = TickRate::new(self.tick_rate)
            .map_err(|e| LiveError::Config(e.to_string()))?;
        Ok(rate)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tick_rate:      TickRate::DEFAULT.ticks_per_second(),
            total_ticks:    0,
            failure_policy: FailurePolicy::default(),
            time_source:    TimeSource::default(),
        }
    }
}
