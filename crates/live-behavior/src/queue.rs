//! `BehaviorQueue`: the per-owner behavior scheduler.
//!
//! # Mutation during a pass
//!
//! A pass iterates over a snapshot of the ids that were live when it started.
//! Behaviors never touch the entry map directly: removals, replacements, and
//! additions are recorded (from the returned [`Action`] or through the
//! [`BehaviorContext`]) and applied in one batch after the last invocation:
//!
//! ```text
//! replacements  →  removals  →  additions
//! ```
//!
//! Consequences callers can rely on:
//!
//! - an entry marked for removal is skipped by every later invocation slot,
//!   including the rest of the current pass;
//! - a removal requested in the same pass as a replacement wins;
//! - an entry added during a pass is first invoked by the next pass;
//! - ids removed from outside a pass (`unregister`) are skipped by the next
//!   pass and dropped when it ends.
//!
//! # Duplicate ids
//!
//! Registering an explicit id that is already live **overwrites** the old
//! entry.  Registering an id that is pending removal revives it with the new
//! behavior.

use live_core::{BehaviorId, FailurePolicy, PauseStates, PauseTag};
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::context::Commands;
use crate::{Action, Behavior, BehaviorContext, BehaviorError, BehaviorResult, Registration};

/// One registered behavior.
pub(crate) struct Entry<E, A> {
    pub(crate) behavior:  Box<dyn Behavior<E, A>>,
    pub(crate) pause_tag: Option<PauseTag>,
}

// ── PassStats ─────────────────────────────────────────────────────────────────

/// Counters describing one (or, summed, several) passes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Behaviors whose `tick` was called.
    pub invoked:  usize,
    /// Behaviors skipped because their pause tag is active.
    pub paused:   usize,
    /// Behaviors whose `tick` returned an error.
    pub failed:   usize,
    /// Entries dropped when the pass ended.
    pub removed:  usize,
    /// Entries whose behavior was swapped when the pass ended.
    pub replaced: usize,
    /// Entries registered during the pass.
    pub added:    usize,
}

impl std::ops::AddAssign for PassStats {
    fn add_assign(&mut self, rhs: Self) {
        self.invoked  += rhs.invoked;
        self.paused   += rhs.paused;
        self.failed   += rhs.failed;
        self.removed  += rhs.removed;
        self.replaced += rhs.replaced;
        self.added    += rhs.added;
    }
}

// ── BehaviorQueue ─────────────────────────────────────────────────────────────

/// A mapping from [`BehaviorId`] to behavior plus optional pause tag, executed
/// once per pass.
///
/// `E` is the owner passed to every behavior, `A` the per-pass extra argument.
/// The queue itself holds no reference to its owner; the owner is lent to
/// [`run_pass`](Self::run_pass) for the duration of one pass.
///
/// # Example
///
/// ```rust
/// use live_behavior::{Action, BehaviorContext, BehaviorQueue};
/// use live_core::PauseStates;
///
/// let mut queue: BehaviorQueue<u32> = BehaviorQueue::new();
/// queue.register_fn(|ctx: &mut BehaviorContext<'_, u32>| {
///     *ctx.owner += 1;
///     Ok(Action::Continue)
/// });
///
/// let mut counter = 0;
/// queue.run_pass(&mut counter, &PauseStates::new(), &()).unwrap();
/// queue.run_pass(&mut counter, &PauseStates::new(), &()).unwrap();
/// assert_eq!(counter, 2);
/// ```
pub struct BehaviorQueue<E, A = ()> {
    entries:  FxHashMap<BehaviorId, Entry<E, A>>,
    commands: Commands<E, A>,
    policy:   FailurePolicy,
    /// Reused id buffer so steady-state passes do not allocate.
    snapshot: Vec<BehaviorId>,
}

impl<E: 'static, A: 'static> BehaviorQueue<E, A> {
    /// An empty queue using [`FailurePolicy::Isolate`].
    pub fn new() -> Self {
        Self::with_policy(FailurePolicy::default())
    }

    pub fn with_policy(policy: FailurePolicy) -> Self {
        Self {
            entries:  FxHashMap::default(),
            commands: Commands::new(),
            policy,
            snapshot: Vec::new(),
        }
    }

    #[inline]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: FailurePolicy) {
        self.policy = policy;
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Register `behavior` under a generated id, never paused.
    pub fn register(&mut self, behavior: impl Behavior<E, A>) -> BehaviorId {
        self.register_with(behavior, Registration::new())
    }

    /// Register `behavior` with explicit id and/or pause tag.
    ///
    /// Takes effect immediately: the behavior runs in the next pass.  An
    /// explicit id that is already live is overwritten.
    pub fn register_with(&mut self, behavior: impl Behavior<E, A>, registration: Registration) -> BehaviorId {
        let id = self.commands.resolve_id(registration.id);
        let label = behavior.label();
        let entry = Entry {
            behavior:  Box::new(behavior),
            pause_tag: registration.pause_when,
        };

        self.commands.removals.remove(&id);
        if self.entries.insert(id, entry).is_some() {
            debug!(behavior = %id, label, "overwrote existing behavior");
        } else {
            trace!(behavior = %id, label, "registered behavior");
        }
        id
    }

    /// Register a closure under a generated id.
    pub fn register_fn<F>(&mut self, f: F) -> BehaviorId
    where
        F: FnMut(&mut BehaviorContext<'_, E, A>) -> BehaviorResult<Action<E, A>> + Send + 'static,
    {
        self.register(crate::from_fn(f))
    }

    /// Mark `id` for removal.
    ///
    /// The entry is not invoked by the next pass and is dropped when that
    /// pass ends.  Unknown ids and repeated calls are no-ops.
    pub fn unregister(&mut self, id: BehaviorId) {
        if self.entries.contains_key(&id) && self.commands.removals.insert(id) {
            trace!(behavior = %id, "unregister requested");
        }
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// The behavior registered under `id`, if it is live.
    pub fn lookup(&self, id: BehaviorId) -> BehaviorResult<&dyn Behavior<E, A>> {
        self.live_entry(id).map(|entry| entry.behavior.as_ref())
    }

    /// The pause tag `id` was registered with.
    pub fn pause_tag(&self, id: BehaviorId) -> BehaviorResult<Option<&PauseTag>> {
        self.live_entry(id).map(|entry| entry.pause_tag.as_ref())
    }

    /// `true` if `id` is registered and not pending removal.
    pub fn contains(&self, id: BehaviorId) -> bool {
        self.live_entry(id).is_ok()
    }

    /// `true` if `id` has been unregistered but not yet dropped.
    pub fn is_pending_removal(&self, id: BehaviorId) -> bool {
        self.commands.removals.contains(&id)
    }

    /// Number of live entries (pending removals excluded).
    pub fn len(&self) -> usize {
        self.entries
            .keys()
            .filter(|id| !self.commands.removals.contains(id))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live ids, in unspecified order.
    pub fn ids(&self) -> impl Iterator<Item = BehaviorId> + '_ {
        self.entries
            .keys()
            .copied()
            .filter(|id| !self.commands.removals.contains(id))
    }

    fn live_entry(&self, id: BehaviorId) -> BehaviorResult<&Entry<E, A>> {
        if self.commands.removals.contains(&id) {
            return Err(BehaviorError::NotFound(id));
        }
        self.entries.get(&id).ok_or(BehaviorError::NotFound(id))
    }

    // ── Execution ─────────────────────────────────────────────────────────

    /// Run every live, non-paused behavior once, then apply deferred changes.
    ///
    /// With an empty `pause` list every entry runs.  Otherwise an entry is
    /// skipped when its pause tag is active; its state is left untouched so
    /// it resumes exactly where it stopped.
    ///
    /// Errors returned by behaviors are handled according to the queue's
    /// [`FailurePolicy`].  Only `Abort` makes this method return `Err`, and
    /// even then the deferred changes recorded so far are applied first.
    pub fn run_pass(&mut self, owner: &mut E, pause: &PauseStates, args: &A) -> BehaviorResult<PassStats> {
        let mut stats = PassStats::default();
        let mut aborted = None;

        let mut snapshot = std::mem::take(&mut self.snapshot);
        snapshot.clear();
        snapshot.extend(self.entries.keys().copied());

        for &id in &snapshot {
            if self.commands.removals.contains(&id) {
                continue;
            }
            let Some(entry) = self.entries.get_mut(&id) else {
                continue;
            };
            if pause.pauses(entry.pause_tag.as_ref()) {
                stats.paused += 1;
                continue;
            }

            stats.invoked += 1;
            let result = {
                let mut ctx = BehaviorContext::new(&mut *owner, args, id, &mut self.commands);
                entry.behavior.tick(&mut ctx)
            };

            match result {
                Ok(Action::Continue) => {}
                Ok(Action::Remove) => {
                    self.commands.removals.insert(id);
                }
                Ok(Action::Replace(next)) => {
                    self.commands.replacements.push((id, next));
                }
                Err(err) => {
                    stats.failed += 1;
                    let label = entry.behavior.label();
                    match self.policy {
                        FailurePolicy::Isolate => {
                            warn!(behavior = %id, label, error = %err, "behavior failed; isolated");
                        }
                        FailurePolicy::Evict => {
                            warn!(behavior = %id, label, error = %err, "behavior failed; evicting");
                            self.commands.removals.insert(id);
                        }
                        FailurePolicy::Abort => {
                            warn!(behavior = %id, label, error = %err, "behavior failed; aborting pass");
                            aborted = Some(err);
                            break;
                        }
                    }
                }
            }
        }

        self.snapshot = snapshot;
        self.apply_deferred(&mut stats);

        match aborted {
            Some(err) => Err(err),
            None      => Ok(stats),
        }
    }

    /// Apply everything recorded during the pass.
    fn apply_deferred(&mut self, stats: &mut PassStats) {
        for (id, next) in self.commands.replacements.drain(..) {
            if let Some(entry) = self.entries.get_mut(&id) {
                trace!(behavior = %id, from = entry.behavior.label(), to = next.label(), "replaced behavior");
                entry.behavior = next;
                stats.replaced += 1;
            }
        }

        for id in self.commands.removals.drain() {
            if self.entries.remove(&id).is_some() {
                trace!(behavior = %id, "removed behavior");
                stats.removed += 1;
            }
        }

        for (id, entry) in self.commands.additions.drain(..) {
            if self.entries.insert(id, entry).is_some() {
                debug!(behavior = %id, "overwrote existing behavior");
            }
            stats.added += 1;
        }
    }
}

impl<E: 'static, A: 'static> Default for BehaviorQueue<E, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, A> std::fmt::Debug for BehaviorQueue<E, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorQueue")
            .field("entries", &self.entries.len())
            .field("pending_removals", &self.commands.removals.len())
            .field("policy", &self.policy)
            .finish()
    }
}
