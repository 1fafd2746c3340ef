//! Application-defined labels: pause tags and group tags.
//!
//! Both are thin string newtypes backed by `Cow<'static, str>` so literal
//! tags (`"menu"`) cost no allocation while runtime-built tags still work.

use std::borrow::{Borrow, Cow};
use std::fmt;

/// Generate a string tag newtype.
macro_rules! string_tag {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(Cow<'static, str>);

        impl $name {
            /// Build a tag from a string literal in `const` context.
            #[inline]
            pub const fn new(label: &'static str) -> Self {
                Self(Cow::Borrowed(label))
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&'static str> for $name {
            #[inline]
            fn from(label: &'static str) -> Self {
                Self(Cow::Borrowed(label))
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(label: String) -> Self {
                Self(Cow::Owned(label))
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_tag! {
    /// Label used to selectively suspend a subset of behaviors, e.g. `"menu"`.
    pub struct PauseTag;
}

string_tag! {
    /// Name of an entity group ("type") such as `"enemy"` or `"pickup"`.
    pub struct GroupTag;
}

// ── PauseStates ───────────────────────────────────────────────────────────────

/// Ordered list of currently active pause tags.
///
/// Read once per pass by every behavior queue; mutated only between passes by
/// its owner (normally the scene).  An empty list means nothing is paused.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PauseStates {
    active: Vec<PauseTag>,
}

impl PauseStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate `tag`.  Returns `false` if it was already active.
    pub fn push(&mut self, tag: impl Into<PauseTag>) -> bool {
        let tag = tag.into();
        if self.active.contains(&tag) {
            return false;
        }
        self.active.push(tag);
        true
    }

    /// Deactivate `tag`.  Returns `false` if it was not active.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.active.len();
        self.active.retain(|t| t.as_str() != tag);
        self.active.len() != before
    }

    #[inline]
    pub fn contains(&self, tag: &str) -> bool {
        self.active.iter().any(|t| t.as_str() == tag)
    }

    /// `true` when a behavior carrying `tag` must be skipped this pass.
    #[inline]
    pub fn pauses(&self, tag: Option<&PauseTag>) -> bool {
        match tag {
            Some(t) if !self.active.is_empty() => self.contains(t.as_str()),
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Active tags in activation order.
    pub fn iter(&self) -> impl Iterator<Item = &PauseTag> {
        self.active.iter()
    }
}

impl<T: Into<PauseTag>> FromIterator<T> for PauseStates {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut states = PauseStates::new();
        for tag in iter {
            states.push(tag);
        }
        states
    }
}
