//! What a behavior asks its queue to do after this tick.

use std::fmt;

use crate::Behavior;

/// The outcome of one [`Behavior::tick`] call.
///
/// Actions are collected during the invoke phase and applied by the queue
/// after every entry has run, so a behavior can never observe (or corrupt)
/// a half-mutated queue.
pub enum Action<E, A = ()> {
    /// Keep the behavior registered and call it again next pass.
    Continue,

    /// Unregister this behavior.  It is not invoked again, not even later in
    /// the current pass.
    Remove,

    /// Swap this behavior for `next`, keeping the same id and pause tag.
    /// `next` is first invoked by the following pass.
    Replace(Box<dyn Behavior<E, A>>),
}

impl<E: 'static, A: 'static> Action<E, A> {
    /// Box `next` into a [`Action::Replace`].
    pub fn replace(next: impl Behavior<E, A>) -> Self {
        Action::Replace(Box::new(next))
    }
}

impl<E, A> Action<E, A> {
    #[inline]
    pub fn is_continue(&self) -> bool {
        matches!(self, Action::Continue)
    }
}

impl<E: 'static, A: 'static> fmt::Debug for Action<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Continue      => f.write_str("Continue"),
            Action::Remove        => f.write_str("Remove"),
            Action::Replace(next) => f.debug_tuple("Replace").field(&next.label()).finish(),
        }
    }
}
