//! `live-core` — foundational types for the `rust_live` behavior scheduler.
//!
//! This crate is a dependency of every other `live-*` crate.  It has no
//! `live-*` dependencies and a single external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `BehaviorId`                                |
//! | [`tags`]        | `PauseTag`, `GroupTag`, `PauseStates`                   |
//! | [`time`]        | `Tick`, `TickRate`, `FrameClock`, `Clock` sources       |
//! | [`countdown`]   | `Countdown` wall-clock timer                            |
//! | [`units`]       | `Rate`, `AngleUnit`, `Space`, `ScaleMode`               |
//! | [`config`]      | `SceneConfig`, `FailurePolicy`, `TimeSource`            |
//! | [`error`]       | `LiveError`, `LiveResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, tags, and config.   |

pub mod config;
pub mod countdown;
pub mod error;
pub mod ids;
pub mod tags;
pub mod time;
pub mod units;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{FailurePolicy, SceneConfig, TimeSource};
pub use countdown::Countdown;
pub use error::{LiveError, LiveResult};
pub use ids::{BehaviorId, EntityId};
pub use tags::{GroupTag, PauseStates, PauseTag};
pub use time::{Clock, FrameClock, ManualClock, SharedClock, Tick, TickRate, WallClock};
pub use units::{AngleUnit, Rate, ScaleMode, Space};
