//! `Body<T>`: the part of an entity behaviors operate on.
//!
//! Every amount passed to the `apply_*` primitives is turned into a per-tick
//! delta first:
//!
//! ```text
//! Rate::PerTick    delta = v
//! Rate::PerSecond  delta = v / (ticks_per_second + 1)
//! ```
//!
//! The `+ 1` in the divisor is part of the contract; tuned content relies on
//! it.

use glam::{Mat3, Mat4, Vec3, Vec4};
use live_core::{AngleUnit, EntityId, Rate, ScaleMode, Space, TickRate};
use tracing::debug;

use crate::{BasicTransform, Transform};

/// An entity's transform plus the per-tick state behaviors may read.
///
/// Split from the behavior queues so a queue can lend `&mut Body` to its
/// behaviors while it is itself borrowed mutably.
#[derive(Debug, Clone)]
pub struct Body<T: Transform = BasicTransform> {
    id:            EntityId,
    pub transform: T,
    rate:          TickRate,
    /// Entities reported touching this one during the current tick.
    touching:      Vec<EntityId>,
}

impl<T: Transform> Body<T> {
    pub fn new(id: EntityId, transform: T, rate: TickRate) -> Self {
        Self { id, transform, rate, touching: Vec::new() }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn rate(&self) -> TickRate {
        self.rate
    }

    pub fn set_rate(&mut self, rate: TickRate) {
        self.rate = rate;
    }

    /// Scale `v` down to one tick's worth.
    #[inline]
    pub fn per_tick(&self, v: Vec3, rate: Rate) -> Vec3 {
        match rate {
            Rate::PerTick   => v,
            Rate::PerSecond => v / self.rate.divisor(),
        }
    }

    // ── Motion primitives ─────────────────────────────────────────────────

    pub fn apply_movement(&mut self, movement: Vec3, rate: Rate, space: Space) {
        let delta = self.per_tick(movement, rate);
        self.transform.translate(delta, space);
    }

    /// Rotate by XYZ Euler angles.  Degrees are converted per axis after the
    /// per-tick normalization.
    pub fn apply_rotation(&mut self, rotation: Vec3, rate: Rate, unit: AngleUnit, space: Space) {
        let mut delta = self.per_tick(rotation, rate);
        if unit == AngleUnit::Degrees {
            delta = Vec3::new(delta.x.to_radians(), delta.y.to_radians(), delta.z.to_radians());
        }
        self.transform.rotate(delta, space);
    }

    /// Grow (or shrink) the object.
    ///
    /// `Additive` adds the delta to the local scale.  `Compose` adds
    /// `diag(delta) · orientation` into the linear part of the local
    /// transform; translation and the homogeneous row are left as they are.
    /// A composition that would leave the linear part singular is skipped.
    pub fn apply_scale(&mut self, scale: Vec3, rate: Rate, mode: ScaleMode) {
        let delta = self.per_tick(scale, rate);
        match mode {
            ScaleMode::Additive => {
                let current = self.transform.local_scale();
                self.transform.set_local_scale(current + delta);
            }
            ScaleMode::Compose => {
                let linear = Mat3::from_diagonal(delta) * self.transform.orientation();
                let addend = Mat4::from_cols(
                    linear.x_axis.extend(0.0),
                    linear.y_axis.extend(0.0),
                    linear.z_axis.extend(0.0),
                    Vec4::ZERO,
                );
                let composed = self.transform.local_matrix() + addend;
                let det = Mat3::from_mat4(composed).determinant();
                if det == 0.0 || !det.is_finite() {
                    debug!(entity = %self.id, ?delta, "singular scale composition skipped");
                    return;
                }
                self.transform.set_local_matrix(composed);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn world_position(&self) -> Vec3 {
        self.transform.world_position()
    }

    #[inline]
    pub fn set_world_position(&mut self, position: Vec3) {
        self.transform.set_world_position(position);
    }

    pub fn distance_to(&self, target: Vec3) -> f32 {
        self.world_position().distance(target)
    }

    /// Unit vector toward `target`, or zero when already there.
    pub fn direction_to(&self, target: Vec3) -> Vec3 {
        (target - self.world_position()).normalize_or_zero()
    }

    // ── Contacts ──────────────────────────────────────────────────────────

    /// Entities reported touching this one since the last tick ended.
    pub fn touching(&self) -> &[EntityId] {
        &self.touching
    }

    pub fn is_touching(&self, other: EntityId) -> bool {
        self.touching.contains(&other)
    }

    /// Record a contact.  Returns `false` if `other` was already listed.
    pub(crate) fn note_contact(&mut self, other: EntityId) -> bool {
        if self.touching.contains(&other) {
            return false;
        }
        self.touching.push(other);
        true
    }

    pub(crate) fn clear_contacts(&mut self) {
        self.touching.clear();
    }
}
