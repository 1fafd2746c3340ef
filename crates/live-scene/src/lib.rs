//! `live-scene` — the scene driver for the rust_live scheduler.
//!
//! # Tick loop
//!
//! ```text
//! host / collision collaborator
//!   └─ report_contact / report_collision   (any time between steps)
//!
//! for tick in current..config.total_ticks:
//!   ① observer.on_tick_start
//!   ② every entity, ascending EntityId     (parallel with `parallel`)
//!        tick queue pass → touching list cleared
//!   ③ observer.on_tick_end(TickStats)
//!   ④ frame clock += 1; simulated time += 1 / tps
//! ```
//!
//! Pause states and the group registry belong to the scene and are only
//! mutated between passes.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs entity ticks on Rayon's thread pool.              |
//! | `serde`    | Serde derives on configuration and transforms.         |
//!
//! # Quick-start
//!
//! ```rust
//! use glam::Vec3;
//! use live_core::{SceneConfig, TimeSource};
//! use live_entity::{BasicTransform, MoveOptions, move_to};
//! use live_scene::{NoopObserver, Scene};
//!
//! let config = SceneConfig {
//!     tick_rate:   10.0,
//!     total_ticks: 20,
//!     time_source: TimeSource::Simulated,
//!     ..SceneConfig::default()
//! };
//! let mut scene = Scene::<BasicTransform>::new(config).unwrap();
//! let id = scene.spawn(BasicTransform::IDENTITY);
//!
//! let entity = scene.entity_mut(id).unwrap();
//! let mover = move_to(entity.body(), Vec3::X, MoveOptions::speed(5.0)).unwrap();
//! entity.add(mover);
//!
//! scene.run(&mut NoopObserver).unwrap();
//! assert_eq!(scene.entity(id).unwrap().body().world_position(), Vec3::X);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scene;


pub use builder::SceneBuilder;
pub use error::{SceneError, SceneResult};
pub use observer::{NoopObserver, SceneObserver, TickStats, TracingObserver};
pub use scene::Scene;
