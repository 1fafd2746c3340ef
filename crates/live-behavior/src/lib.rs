//! `live-behavior` — behaviors, the behavior queue, and timed combinators.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`behavior`] | `Behavior` trait, `FnBehavior` closure adapter                |
//! | [`action`]   | `Action` enum (`Continue`, `Remove`, `Replace`)               |
//! | [`context`]  | `BehaviorContext<'a, E, A>` and `Registration`               |
//! | [`queue`]    | `BehaviorQueue<E, A>`, `PassStats`                            |
//! | [`timed`]    | `Timed`, `timed`, `suspend`                                   |
//! | [`idle`]     | `Idle`, a behavior that does nothing                          |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Pass model
//!
//! A pass runs in two phases:
//!
//! 1. **Invoke**: snapshot the live ids, then call `Behavior::tick` once for
//!    every entry that is neither pending removal nor paused.  Behaviors get
//!    `&mut E` (the owner) and may *request* queue changes through the
//!    context; nothing in the entry map changes during this phase.
//!
//! 2. **Apply**: replacements, then removals, then additions.  Anything
//!    added during a pass is first invoked by the next pass.
//!
//! `E` is the owner type handed to every behavior (an entity body in
//! `live-entity`), `A` is the per-pass extra argument (`()` for tick queues,
//! the touching entity for contact queues).

pub mod action;
pub mod behavior;
pub mod context;
pub mod error;
pub mod idle;
pub mod queue;
pub mod timed;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use behavior::{Behavior, FnBehavior, from_fn};
pub use context::{BehaviorContext, Registration};
pub use error::{BehaviorError, BehaviorResult};
pub use idle::Idle;
pub use queue::{BehaviorQueue, PassStats};
pub use timed::{Timed, suspend, timed};
