//! Scene observer trait for progress reporting.

use live_behavior::PassStats;
use live_core::Tick;
use tracing::info;

/// What one [`Scene::step`](crate::Scene::step) did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Entities whose tick queue ran.
    pub entities: usize,
    /// Tick-queue counters summed over every entity.
    pub passes:   PassStats,
}

/// Callbacks invoked by the scene's tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SceneObserver {
    /// Called at the start of each tick, before any entity runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once every entity has run.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called once after [`Scene::run`](crate::Scene::run) finishes.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`SceneObserver`] that does nothing.
pub struct NoopObserver;

impl SceneObserver for NoopObserver {}

/// Logs a summary line through `tracing` every `interval` ticks and a total
/// at the end of the run.
#[derive(Debug, Default)]
pub struct TracingObserver {
    interval: u64,
    total:    PassStats,
}

impl TracingObserver {
    /// `interval == 0` disables the per-interval lines.
    pub fn new(interval: u64) -> Self {
        Self { interval, total: PassStats::default() }
    }

    /// Counters accumulated so far.
    pub fn total(&self) -> PassStats {
        self.total
    }
}

impl SceneObserver for TracingObserver {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.total += stats.passes;
        if self.interval > 0 && tick.0.is_multiple_of(self.interval) {
            info!(
                %tick,
                entities = stats.entities,
                invoked  = stats.passes.invoked,
                paused   = stats.passes.paused,
                failed   = stats.passes.failed,
                "tick"
            );
        }
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        info!(
            %final_tick,
            invoked = self.total.invoked,
            removed = self.total.removed,
            failed  = self.total.failed,
            "run finished"
        );
    }
}
