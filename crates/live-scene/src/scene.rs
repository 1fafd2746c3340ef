//! The `Scene` struct and its tick loop.

use std::collections::BTreeMap;

use live_behavior::PassStats;
use live_core::{
    EntityId, FrameClock, GroupTag, ManualClock, PauseStates, PauseTag, SceneConfig, SharedClock,
    Tick, TickRate,
};
use live_entity::{Entity, GroupRegistry, Transform};
use tracing::{debug, info, trace};

use crate::{SceneBuilder, SceneError, SceneObserver, SceneResult, TickStats};

/// Owns every entity plus the state shared between them: pause states, the
/// group registry, the frame clock, and the clock countdowns read from.
///
/// Each [`step`](Self::step):
///
/// 1. Runs every entity's tick queue once, in ascending `EntityId` order
///    (in parallel with the `parallel` feature).  Contacts reported since
///    the previous step are visible to the behaviors and cleared afterwards.
/// 2. Advances the frame clock and, with [`TimeSource::Simulated`], the
///    countdown clock by one tick length.
///
/// Create via [`SceneBuilder`] or [`Scene::new`].
///
/// [`TimeSource::Simulated`]: live_core::TimeSource::Simulated
pub struct Scene<T: Transform> {
    /// Configuration the scene was built with.
    pub config: SceneConfig,

    pub(crate) clock:    FrameClock,
    pub(crate) entities: BTreeMap<EntityId, Entity<T>>,
    pub(crate) groups:   GroupRegistry,
    pub(crate) pause:    PauseStates,
    /// Clock handed to `timed` / `suspend`.
    pub(crate) time:     SharedClock,
    /// Set when the scene drives `time` itself.
    pub(crate) manual:   Option<ManualClock>,
    pub(crate) next_id:  u32,
}

impl<T: Transform> Scene<T> {
    /// Shorthand for `SceneBuilder::new(config).build()`.
    pub fn new(config: SceneConfig) -> SceneResult<Self> {
        SceneBuilder::new(config).build()
    }

    // ── Entities ──────────────────────────────────────────────────────────

    /// Add an entity with a tick queue only.
    pub fn spawn(&mut self, transform: T) -> EntityId {
        let id = self.allocate();
        self.insert(Entity::new(id, transform, self.clock.rate))
    }

    /// Add an entity that also accepts contacts.
    pub fn spawn_tracking_contacts(&mut self, transform: T) -> EntityId {
        let id = self.allocate();
        self.insert(Entity::with_contact_tracking(id, transform, self.clock.rate))
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, mut entity: Entity<T>) -> EntityId {
        entity.set_policy(self.config.failure_policy);
        let id = entity.id();
        debug!(entity = %id, contacts = entity.tracks_contacts(), "spawned");
        self.entities.insert(id, entity);
        id
    }

    /// Remove an entity and every group membership it holds.
    ///
    /// The entity is handed back; dropping it discards its queues.
    pub fn despawn(&mut self, id: EntityId) -> SceneResult<Entity<T>> {
        let mut entity = self.entities.remove(&id).ok_or(SceneError::EntityNotFound(id))?;
        entity.leave_all_groups(&mut self.groups);
        debug!(entity = %id, "despawned");
        Ok(entity)
    }

    pub fn entity(&self, id: EntityId) -> SceneResult<&Entity<T>> {
        self.entities.get(&id).ok_or(SceneError::EntityNotFound(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> SceneResult<&mut Entity<T>> {
        self.entities.get_mut(&id).ok_or(SceneError::EntityNotFound(id))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity<T>> {
        self.entities.values()
    }

    // ── Groups ────────────────────────────────────────────────────────────

    /// Add `id` to the group `tag`.  Returns `false` if already a member.
    pub fn classify(&mut self, id: EntityId, tag: impl Into<GroupTag>) -> SceneResult<bool> {
        let entity = self.entities.get_mut(&id).ok_or(SceneError::EntityNotFound(id))?;
        Ok(entity.classify(tag, &mut self.groups))
    }

    pub fn declassify(&mut self, id: EntityId, tag: &str) -> SceneResult<bool> {
        let entity = self.entities.get_mut(&id).ok_or(SceneError::EntityNotFound(id))?;
        Ok(entity.declassify(tag, &mut self.groups))
    }

    /// Members of `tag`, ascending.
    pub fn group(&self, tag: &str) -> impl Iterator<Item = EntityId> + '_ {
        self.groups.members(tag)
    }

    pub fn groups(&self) -> &GroupRegistry {
        &self.groups
    }

    // ── Pause states ──────────────────────────────────────────────────────

    /// Activate a pause tag.  Takes effect from the next pass.
    pub fn pause(&mut self, tag: impl Into<PauseTag>) -> bool {
        let tag = tag.into();
        let label = tag.to_string();
        let added = self.pause.push(tag);
        if added {
            debug!(tag = %label, "paused");
        }
        added
    }

    /// Deactivate a pause tag.
    pub fn resume(&mut self, tag: &str) -> bool {
        let removed = self.pause.remove(tag);
        if removed {
            debug!(tag, "resumed");
        }
        removed
    }

    pub fn pause_states(&self) -> &PauseStates {
        &self.pause
    }

    // ── Time ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn tick_rate(&self) -> TickRate {
        self.clock.rate
    }

    pub fn frame_clock(&self) -> &FrameClock {
        &self.clock
    }

    /// The clock `timed` / `suspend` countdowns should be built against.
    pub fn time(&self) -> &SharedClock {
        &self.time
    }

    /// Change the tick rate for the scene and every entity in it.
    pub fn set_tick_rate(&mut self, ticks_per_second: f32) -> SceneResult<()> {
        let rate = TickRate::new(ticks_per_second)?;
        self.clock.rate = rate;
        for entity in self.entities.values_mut() {
            entity.set_tick_rate(rate);
        }
        debug!(%rate, "tick rate changed");
        Ok(())
    }

    // ── Contacts ──────────────────────────────────────────────────────────

    /// Report that `other` touches `id` this tick.
    pub fn report_contact(&mut self, id: EntityId, other: EntityId) -> SceneResult<PassStats> {
        let entity = self.entities.get_mut(&id).ok_or(SceneError::EntityNotFound(id))?;
        entity
            .deliver_contact(other, &self.pause)
            .map_err(SceneError::entity(id))
    }

    /// Report a collision between `a` and `b` to whichever of them tracks
    /// contacts.
    pub fn report_collision(&mut self, a: EntityId, b: EntityId) -> SceneResult<()> {
        for (id, other) in [(a, b), (b, a)] {
            let entity = self.entities.get_mut(&id).ok_or(SceneError::EntityNotFound(id))?;
            if entity.tracks_contacts() {
                entity
                    .deliver_contact(other, &self.pause)
                    .map_err(SceneError::entity(id))?;
            }
        }
        Ok(())
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run ticks until `config.total_ticks` is reached.
    pub fn run<O: SceneObserver>(&mut self, observer: &mut O) -> SceneResult<()> {
        info!(
            from = %self.clock.current_tick,
            to = self.config.total_ticks,
            entities = self.entities.len(),
            "run started"
        );
        while self.clock.current_tick.0 < self.config.total_ticks {
            self.step(observer)?;
        }
        observer.on_run_end(self.clock.current_tick);
        info!(tick = %self.clock.current_tick, "run finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores
    /// `total_ticks`).
    pub fn run_ticks<O: SceneObserver>(&mut self, n: u64, observer: &mut O) -> SceneResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Run one tick.
    pub fn step<O: SceneObserver>(&mut self, observer: &mut O) -> SceneResult<TickStats> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let stats = self.tick_entities()?;
        trace!(tick = %now, invoked = stats.passes.invoked, "tick");
        observer.on_tick_end(now, &stats);

        self.clock.advance();
        if let Some(manual) = &self.manual {
            manual.advance(self.clock.rate.tick_secs());
        }
        Ok(stats)
    }

    /// Stops at the first failing entity (only possible with
    /// `FailurePolicy::Abort`).
    #[cfg(not(feature = "parallel"))]
    fn tick_entities(&mut self) -> SceneResult<TickStats> {
        let pause = &self.pause;
        let mut stats = TickStats::default();
        for (&id, entity) in self.entities.iter_mut() {
            stats.passes += entity.run_tick(pause).map_err(SceneError::entity(id))?;
            stats.entities += 1;
        }
        Ok(stats)
    }

    /// Every entity runs; the error of the lowest failing id is returned.
    #[cfg(feature = "parallel")]
    fn tick_entities(&mut self) -> SceneResult<TickStats> {
        use rayon::prelude::*;

        let pause = &self.pause;
        let results: Vec<_> = self
            .entities
            .par_iter_mut()
            .map(|(&id, entity)| entity.run_tick(pause).map_err(SceneError::entity(id)))
            .collect();

        let mut stats = TickStats::default();
        for result in results {
            stats.passes += result?;
            stats.entities += 1;
        }
        Ok(stats)
    }
}
