//! The host transform primitive and a reference implementation.
//!
//! Behaviors never write positions directly; they go through
//! [`Body`](crate::Body), which normalizes amounts to one tick and then calls
//! into a [`Transform`].  Embedding engines implement the trait over their own
//! scene objects; [`BasicTransform`] is a self-contained version used by the
//! scene driver, the demo, and the tests.

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};
use live_core::Space;

/// Raw per-tick transform operations supplied by the host.
///
/// All amounts handed to these methods are already per-tick deltas.
pub trait Transform: Send + 'static {
    fn world_position(&self) -> Vec3;

    fn set_world_position(&mut self, position: Vec3);

    /// Pure rotation part of the local transform (no scale).
    fn orientation(&self) -> Mat3;

    /// Move by `delta`.  With [`Space::Local`] the delta is expressed along
    /// the object's own axes.
    fn translate(&mut self, delta: Vec3, space: Space);

    /// Rotate by the XYZ Euler angles in `delta` (radians).
    fn rotate(&mut self, delta: Vec3, space: Space);

    fn local_scale(&self) -> Vec3;

    fn set_local_scale(&mut self, scale: Vec3);

    /// The full local transform as a 4×4 matrix.
    fn local_matrix(&self) -> Mat4;

    fn set_local_matrix(&mut self, matrix: Mat4);
}

/// Position, rotation, and non-uniform scale held directly in `glam` types.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicTransform {
    pub position: Vec3,
    /// Unit quaternion.
    pub rotation: Quat,
    pub scale:    Vec3,
}

impl BasicTransform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale:    Vec3::ONE,
    };

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    #[must_use]
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation, ..Self::IDENTITY }
    }
}

impl Default for BasicTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform for BasicTransform {
    #[inline]
    fn world_position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    fn set_world_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn orientation(&self) -> Mat3 {
        Mat3::from_quat(self.rotation)
    }

    fn translate(&mut self, delta: Vec3, space: Space) {
        self.position += match space {
            Space::World => delta,
            Space::Local => self.rotation * delta,
        };
    }

    fn rotate(&mut self, delta: Vec3, space: Space) {
        let step = Quat::from_euler(EulerRot::XYZ, delta.x, delta.y, delta.z);
        self.rotation = match space {
            Space::World => step * self.rotation,
            Space::Local => self.rotation * step,
        }
        .normalize();
    }

    #[inline]
    fn local_scale(&self) -> Vec3 {
        self.scale
    }

    #[inline]
    fn set_local_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    fn set_local_matrix(&mut self, matrix: Mat4) {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        self.scale = scale;
        self.rotation = rotation.normalize();
        self.position = position;
    }
}
