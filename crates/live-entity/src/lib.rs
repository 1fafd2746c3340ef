//! `live-entity` — the entity facade over two behavior queues.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`transform`] | `Transform` host primitive, `BasicTransform` (glam)       |
//! | [`body`]      | `Body<T>`: frame-normalized movement, rotation, scale     |
//! | [`entity`]    | `Entity<T>`: body, tick queue, optional contact queue     |
//! | [`motion`]    | `move_to`, `MoveOptions`, `MoveMode`, `MoveTo`            |
//! | [`contact`]   | `TrackContacts`, `uncollide`                              |
//! | [`registry`]  | `GroupRegistry`                                           |
//! | [`error`]     | `MotionError`, `EntityError`                              |
//!
//! # Per-tick data flow
//!
//! ```text
//! collision collaborator ──► Entity::deliver_contact(other)   (0..n times)
//!                                 │ contact queue pass, args = other
//!                                 ▼
//!                            body.touching += other
//!
//! tick trigger ───────────► Entity::run_tick()
//!                                 │ tick queue pass, owner = &mut body
//!                                 ▼
//!                            body.touching.clear()
//! ```

pub mod body;
pub mod contact;
pub mod entity;
pub mod error;
pub mod motion;
pub mod registry;
pub mod transform;


pub use body::Body;
pub use contact::{TRACK_CONTACTS, TrackContacts, Uncollide, uncollide};
pub use entity::{ContactQueue, Entity, TickQueue};
pub use error::{EntityError, EntityResult, MotionError, MotionResult};
pub use motion::{MoveMode, MoveOptions, MoveTo, move_to};
pub use registry::GroupRegistry;
pub use transform::{BasicTransform, Transform};
