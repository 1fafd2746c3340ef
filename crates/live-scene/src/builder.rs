//! Fluent builder for constructing a [`Scene`].

use std::collections::BTreeMap;

use live_core::{FrameClock, ManualClock, PauseStates, SceneConfig, SharedClock, TimeSource, WallClock};
use live_entity::{GroupRegistry, Transform};
use tracing::debug;

use crate::{Scene, SceneError, SceneResult};

/// Fluent builder for [`Scene<T>`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                         |
/// |-------------------|-------------------------------------------------|
/// | `.clock(c)`       | Chosen by `config.time_source`                  |
/// | `.paused(tags)`   | Nothing paused                                  |
///
/// # Example
///
/// ```rust
/// use live_core::{SceneConfig, TimeSource};
/// use live_entity::BasicTransform;
/// use live_scene::SceneBuilder;
///
/// let config = SceneConfig { time_source: TimeSource::Simulated, ..SceneConfig::default() };
/// let scene = SceneBuilder::new(config).build::<BasicTransform>().unwrap();
/// assert_eq!(scene.len(), 0);
/// ```
pub struct SceneBuilder {
    config: SceneConfig,
    clock:  Option<SharedClock>,
    paused: PauseStates,
}

impl SceneBuilder {
    pub fn new(config: SceneConfig) -> Self {
        Self { config, clock: None, paused: PauseStates::new() }
    }

    /// Read countdowns from `clock` instead of the configured time source.
    ///
    /// The scene never advances an injected clock; the caller owns it.
    pub fn clock(mut self, clock: SharedClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Start with these pause tags active.
    pub fn paused(mut self, paused: PauseStates) -> Self {
        self.paused = paused;
        self
    }

    /// Validate the configuration and return an empty scene.
    pub fn build<T: Transform>(self) -> SceneResult<Scene<T>> {
        let rate = self
            .config
            .validate()
            .map_err(|e| SceneError::Config(e.to_string()))?;

        let (time, manual) = match (self.clock, self.config.time_source) {
            (Some(clock), _) => (clock, None),
            (None, TimeSource::Wall) => (WallClock::shared(), None),
            (None, TimeSource::Simulated) => {
                let manual = ManualClock::new();
                (manual.shared(), Some(manual))
            }
        };

        debug!(
            %rate,
            time_source = ?self.config.time_source,
            policy = ?self.config.failure_policy,
            "scene built"
        );

        Ok(Scene {
            clock:    FrameClock::new(rate),
            config:   self.config,
            entities: BTreeMap::new(),
            groups:   GroupRegistry::new(),
            pause:    self.paused,
            time,
            manual,
            next_id:  0,
        })
    }
}
