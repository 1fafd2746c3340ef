//! Strongly typed identifiers.
//!
//! `EntityId` is a zero-cost wrapper around a `u32` allocated by the scene.
//! `BehaviorId` names one registration inside a single behavior queue and is
//! either chosen by the caller (`Named`) or handed out by the queue's counter
//! (`Auto`).  The two namespaces are disjoint, so a generated id can never
//! collide with a caller-supplied one.

use std::fmt;

/// Handle of an entity inside a scene.  Never reused within one scene.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

/// Handle of one behavior registration inside a behavior queue.
///
/// Ids are only unique within the queue that issued them: two entities may
/// both have a behavior named `"patrol"`, and both tick queues may hand out
/// `Auto(0)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum BehaviorId {
    /// Generated by the queue's counter.  Dense, never reused by that queue.
    Auto(u64),
    /// Supplied by the caller, e.g. `"mouselook"`.
    Named(&'static str),
}

impl From<&'static str> for BehaviorId {
    #[inline]
    fn from(name: &'static str) -> Self {
        BehaviorId::Named(name)
    }
}

impl fmt::Display for BehaviorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BehaviorId::Auto(n)    => write!(f, "#{n}"),
            BehaviorId::Named(s)   => f.write_str(s),
        }
    }
}
