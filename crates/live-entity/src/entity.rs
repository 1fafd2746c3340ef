//! `Entity<T>`: a body plus the behavior queues that drive it.

use live_behavior::{Behavior, BehaviorQueue, PassStats, Registration};
use live_core::{BehaviorId, EntityId, FailurePolicy, GroupTag, PauseStates, TickRate};
use tracing::{debug, trace};

use crate::contact::TRACK_CONTACTS;
use crate::{BasicTransform, Body, EntityError, EntityResult, GroupRegistry, TrackContacts, Transform};

/// Tick queue type of an entity: owner is the body, no extra argument.
pub type TickQueue<T> = BehaviorQueue<Body<T>>;

/// Contact queue type: the extra argument is the touching entity.
pub type ContactQueue<T> = BehaviorQueue<Body<T>, EntityId>;

/// One simulated object.
///
/// The body and the queues are separate fields so a queue can lend
/// `&mut Body<T>` to its behaviors while it runs.
pub struct Entity<T: Transform = BasicTransform> {
    body:      Body<T>,
    behaviors: TickQueue<T>,
    contacts:  Option<ContactQueue<T>>,
    groups:    Vec<GroupTag>,
}

impl<T: Transform> Entity<T> {
    /// An entity with a tick queue only.
    pub fn new(id: EntityId, transform: T, rate: TickRate) -> Self {
        Self {
            body:      Body::new(id, transform, rate),
            behaviors: BehaviorQueue::new(),
            contacts:  None,
            groups:    Vec::new(),
        }
    }

    /// An entity that also accepts contacts.  [`TrackContacts`] is registered
    /// on the contact queue under [`TRACK_CONTACTS`].
    pub fn with_contact_tracking(id: EntityId, transform: T, rate: TickRate) -> Self {
        let mut entity = Self::new(id, transform, rate);
        entity.enable_contact_tracking();
        entity
    }

    /// Create the contact queue if it does not exist yet.
    pub fn enable_contact_tracking(&mut self) {
        if self.contacts.is_some() {
            return;
        }
        let mut queue = ContactQueue::with_policy(self.behaviors.policy());
        queue.register_with(TrackContacts, Registration::new().id(TRACK_CONTACTS));
        self.contacts = Some(queue);
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.body.id()
    }

    pub fn body(&self) -> &Body<T> {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body<T> {
        &mut self.body
    }

    pub fn behaviors(&self) -> &TickQueue<T> {
        &self.behaviors
    }

    pub fn behaviors_mut(&mut self) -> &mut TickQueue<T> {
        &mut self.behaviors
    }

    pub fn contacts(&self) -> Option<&ContactQueue<T>> {
        self.contacts.as_ref()
    }

    pub fn contacts_mut(&mut self) -> Option<&mut ContactQueue<T>> {
        self.contacts.as_mut()
    }

    #[inline]
    pub fn tracks_contacts(&self) -> bool {
        self.contacts.is_some()
    }

    /// Shorthand for registering on the tick queue.
    pub fn add(&mut self, behavior: impl Behavior<Body<T>>) -> BehaviorId {
        self.behaviors.register(behavior)
    }

    pub fn add_with(&mut self, behavior: impl Behavior<Body<T>>, registration: Registration) -> BehaviorId {
        self.behaviors.register_with(behavior, registration)
    }

    /// Register on the contact queue.
    pub fn add_contact(&mut self, behavior: impl Behavior<Body<T>, EntityId>) -> EntityResult<BehaviorId> {
        let id = self.id();
        let queue = self.contacts.as_mut().ok_or(EntityError::ContactsDisabled(id))?;
        Ok(queue.register(behavior))
    }

    /// Apply `policy` to both queues.
    pub fn set_policy(&mut self, policy: FailurePolicy) {
        self.behaviors.set_policy(policy);
        if let Some(contacts) = &mut self.contacts {
            contacts.set_policy(policy);
        }
    }

    pub fn set_tick_rate(&mut self, rate: TickRate) {
        self.body.set_rate(rate);
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Run the tick queue once, then forget this tick's contacts.
    pub fn run_tick(&mut self, pause: &PauseStates) -> EntityResult<PassStats> {
        let result = self.behaviors.run_pass(&mut self.body, pause, &());
        self.body.clear_contacts();
        Ok(result?)
    }

    /// Run the contact queue for one contact with `other`.
    pub fn deliver_contact(&mut self, other: EntityId, pause: &PauseStates) -> EntityResult<PassStats> {
        let id = self.id();
        let queue = self.contacts.as_mut().ok_or(EntityError::ContactsDisabled(id))?;
        Ok(queue.run_pass(&mut self.body, pause, &other)?)
    }

    // ── Groups ────────────────────────────────────────────────────────────

    /// Join `tag` in `registry`.  Returns `false` if already a member.
    ///
    /// The entity only remembers the tag, not the registry.  Whoever owns
    /// `registry` must pass the same one to [`leave_all_groups`] when the
    /// entity is destroyed; `Scene` does this for its own registry, so inside
    /// a scene go through `Scene::classify` instead.
    ///
    /// [`leave_all_groups`]: Self::leave_all_groups
    pub fn classify(&mut self, tag: impl Into<GroupTag>, registry: &mut GroupRegistry) -> bool {
        let tag = tag.into();
        if !registry.insert(tag.clone(), self.id()) {
            return false;
        }
        debug!(entity = %self.id(), group = %tag, "classified");
        self.groups.push(tag);
        true
    }

    /// Leave `tag`.  Returns `false` if not a member.
    pub fn declassify(&mut self, tag: &str, registry: &mut GroupRegistry) -> bool {
        let before = self.groups.len();
        self.groups.retain(|t| t.as_str() != tag);
        let left = registry.remove(tag, self.id());
        if left {
            trace!(entity = %self.id(), group = tag, "declassified");
        }
        left || self.groups.len() != before
    }

    /// Groups this entity joined, in joining order.
    pub fn groups(&self) -> &[GroupTag] {
        &self.groups
    }

    /// Drop every membership this entity recorded from `registry`.  Must be
    /// called with the registry `classify` was given, before the entity is
    /// dropped.
    pub fn leave_all_groups(&mut self, registry: &mut GroupRegistry) {
        registry.remove_all(&self.groups, self.id());
        self.groups.clear();
    }
}

impl<T: Transform + std::fmt::Debug> std::fmt::Debug for Entity<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("body", &self.body)
            .field("behaviors", &self.behaviors)
            .field("contacts", &self.contacts)
            .field("groups", &self.groups)
            .finish()
    }
}
