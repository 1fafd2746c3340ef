//! Named entity groups.
//!
//! A group ("type") is a tag such as `"enemy"` shared by any number of
//! entities; an entity may belong to several.  Members are kept in a
//! `BTreeSet` so iteration order is stable across runs.

use std::collections::BTreeSet;

use live_core::{EntityId, GroupTag};
use rustc_hash::FxHashMap;

/// Mapping from group tag to member entities.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: FxHashMap<GroupTag, BTreeSet<EntityId>>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `entity` to `tag`.  Returns `false` if it was already a member.
    pub fn insert(&mut self, tag: impl Into<GroupTag>, entity: EntityId) -> bool {
        self.groups.entry(tag.into()).or_default().insert(entity)
    }

    /// Remove `entity` from `tag`.  Empty groups are dropped.
    pub fn remove(&mut self, tag: &str, entity: EntityId) -> bool {
        let Some(members) = self.groups.get_mut(tag) else {
            return false;
        };
        let removed = members.remove(&entity);
        if members.is_empty() {
            self.groups.remove(tag);
        }
        removed
    }

    /// Remove `entity` from every group listed in `tags`.
    pub fn remove_all<'t>(&mut self, tags: impl IntoIterator<Item = &'t GroupTag>, entity: EntityId) {
        for tag in tags {
            self.remove(tag.as_str(), entity);
        }
    }

    /// Remove `entity` from every group, whether or not the caller knows
    /// which ones it joined.  Returns the number of memberships dropped.
    pub fn purge(&mut self, entity: EntityId) -> usize {
        let mut dropped = 0;
        self.groups.retain(|_, members| {
            if members.remove(&entity) {
                dropped += 1;
            }
            !members.is_empty()
        });
        dropped
    }

    /// Members of `tag` in ascending id order.  Unknown tags yield nothing.
    pub fn members(&self, tag: &str) -> impl Iterator<Item = EntityId> + '_ {
        self.groups.get(tag).into_iter().flat_map(|m| m.iter().copied())
    }

    pub fn contains(&self, tag: &str, entity: EntityId) -> bool {
        self.groups.get(tag).is_some_and(|m| m.contains(&entity))
    }

    /// Number of members of `tag`.
    pub fn count(&self, tag: &str) -> usize {
        self.groups.get(tag).map_or(0, BTreeSet::len)
    }

    /// Tags with at least one member, in unspecified order.
    pub fn tags(&self) -> impl Iterator<Item = &GroupTag> {
        self.groups.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}
