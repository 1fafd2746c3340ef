//! Contact-driven behaviors.
//!
//! The contact queue of an entity is run once per reported contact, with the
//! other entity as the extra argument.  `TrackContacts` is registered on it
//! permanently and fills the body's touching list; `Uncollide` reads that
//! list from the tick queue.

use live_behavior::{Action, Behavior, BehaviorContext, BehaviorResult};
use live_core::{BehaviorId, EntityId};
use tracing::trace;

use crate::{Body, Transform};

/// Id under which [`TrackContacts`] is registered on every contact queue.
pub const TRACK_CONTACTS: BehaviorId = BehaviorId::Named("live.track_contacts");

/// Appends the touching entity to the body's touching list, once per tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrackContacts;

impl<T: Transform> Behavior<Body<T>, EntityId> for TrackContacts {
    fn tick(
        &mut self,
        ctx: &mut BehaviorContext<'_, Body<T>, EntityId>,
    ) -> BehaviorResult<Action<Body<T>, EntityId>> {
        let other = *ctx.args;
        if ctx.owner.note_contact(other) {
            trace!(entity = %ctx.owner.id(), %other, "contact");
        }
        Ok(Action::Continue)
    }

    fn label(&self) -> &'static str {
        "track_contacts"
    }
}

/// Runs `inner` only on ticks where none of `targets` is touching the owner.
pub struct Uncollide<I> {
    targets: Vec<EntityId>,
    inner:   I,
}

impl<I> Uncollide<I> {
    pub fn targets(&self) -> &[EntityId] {
        &self.targets
    }
}

impl<T, A, I> Behavior<Body<T>, A> for Uncollide<I>
where
    T: Transform,
    A: 'static,
    I: Behavior<Body<T>, A>,
{
    fn tick(&mut self, ctx: &mut BehaviorContext<'_, Body<T>, A>) -> BehaviorResult<Action<Body<T>, A>> {
        if ctx.owner.touching().iter().any(|e| self.targets.contains(e)) {
            return Ok(Action::Continue);
        }
        self.inner.tick(ctx)
    }

    fn label(&self) -> &'static str {
        "uncollide"
    }
}

/// Gate `inner` on not touching any of `targets`.
pub fn uncollide<I>(targets: impl IntoIterator<Item = EntityId>, inner: I) -> Uncollide<I> {
    Uncollide { targets: targets.into_iter().collect(), inner }
}
