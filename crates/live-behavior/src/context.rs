//! Per-invocation context handed to every behavior.

use live_core::{BehaviorId, PauseTag};
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::Behavior;
use crate::queue::Entry;

// ── Registration ──────────────────────────────────────────────────────────────

/// Options for registering a behavior.
///
/// ```rust
/// use live_behavior::Registration;
///
/// let reg = Registration::new().id("mouselook").pause_when("menu");
/// assert!(reg.id.is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registration {
    /// Explicit id.  `None` lets the queue generate one.
    pub id: Option<BehaviorId>,
    /// Skip the behavior while this tag is an active pause state.
    pub pause_when: Option<PauseTag>,
}

impl Registration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<BehaviorId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn pause_when(mut self, tag: impl Into<PauseTag>) -> Self {
        self.pause_when = Some(tag.into());
        self
    }
}

// ── Deferred commands ─────────────────────────────────────────────────────────

/// Queue mutations recorded while a pass is running.
pub(crate) struct Commands<E, A> {
    next_auto:               u64,
    pub(crate) removals:     FxHashSet<BehaviorId>,
    pub(crate) replacements: Vec<(BehaviorId, Box<dyn Behavior<E, A>>)>,
    pub(crate) additions:    Vec<(BehaviorId, Entry<E, A>)>,
}

impl<E, A> Commands<E, A> {
    pub(crate) fn new() -> Self {
        Self {
            next_auto:    0,
            removals:     FxHashSet::default(),
            replacements: Vec::new(),
            additions:    Vec::new(),
        }
    }

    /// Hand out the next generated id.  Generated ids are never reused.
    #[inline]
    pub(crate) fn allocate(&mut self) -> BehaviorId {
        let id = BehaviorId::Auto(self.next_auto);
        self.next_auto += 1;
        id
    }

    pub(crate) fn resolve_id(&mut self, requested: Option<BehaviorId>) -> BehaviorId {
        match requested {
            Some(id) => id,
            None     => self.allocate(),
        }
    }
}

// ── BehaviorContext ───────────────────────────────────────────────────────────

/// Everything a behavior sees during one invocation.
///
/// `owner` and `args` are plain borrows.  Queue mutations go through
/// [`spawn`](Self::spawn) / [`remove`](Self::remove), which only *record* the
/// request; the queue applies it once the pass is over.
pub struct BehaviorContext<'a, E, A = ()> {
    /// The object that owns the queue (e.g. an entity body).
    pub owner: &'a mut E,

    /// Extra data for this pass: `()` on tick queues, the touching entity on
    /// contact queues.
    pub args: &'a A,

    id:       BehaviorId,
    commands: &'a mut Commands<E, A>,
}

impl<'a, E: 'static, A: 'static> BehaviorContext<'a, E, A> {
    pub(crate) fn new(
        owner:    &'a mut E,
        args:     &'a A,
        id:       BehaviorId,
        commands: &'a mut Commands<E, A>,
    ) -> Self {
        Self { owner, args, id, commands }
    }

    /// The id the running behavior is registered under.
    #[inline]
    pub fn id(&self) -> BehaviorId {
        self.id
    }

    /// Register `behavior` with a generated id.  It first runs next pass.
    pub fn spawn(&mut self, behavior: impl Behavior<E, A>) -> BehaviorId {
        self.spawn_with(behavior, Registration::new())
    }

    /// Register `behavior` with explicit options.  It first runs next pass.
    ///
    /// An explicit id that is already live is overwritten when the pass ends.
    pub fn spawn_with(&mut self, behavior: impl Behavior<E, A>, registration: Registration) -> BehaviorId {
        let id = self.commands.resolve_id(registration.id);
        trace!(behavior = %id, spawned_by = %self.id, label = behavior.label(), "deferred register");
        self.commands.additions.push((id, Entry {
            behavior:  Box::new(behavior),
            pause_tag: registration.pause_when,
        }));
        id
    }

    /// Unregister `id` once the pass ends.  It is not invoked again, not even
    /// later in this pass.  Unknown ids are ignored.
    pub fn remove(&mut self, id: BehaviorId) {
        trace!(behavior = %id, removed_by = %self.id, "deferred unregister");
        self.commands.additions.retain(|(pending, _)| *pending != id);
        self.commands.removals.insert(id);
    }
}
