//! Spatial and common types
//!
//! Conventions: right-handed, +Y up, -Z forward, +X right. Angles that come
//! from settings or input are in degrees; `glam` works in radians.

use crate::id::EntityId;
use glam::{EulerRot, Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position, rotation, and scale of a host entity
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Rotate in local space by Euler angles in degrees.
    ///
    /// Applied Z, then X, then Y, the usual order for a yaw-pitch-roll rig.
    pub fn rotate_local_degrees(&mut self, euler: Vec3) {
        let delta = Quat::from_euler(
            EulerRot::YXZ,
            euler.y.to_radians(),
            euler.x.to_radians(),
            euler.z.to_radians(),
        );
        self.rotation = (self.rotation * delta).normalize();
    }

    /// Rotate around world up by `degrees`, positive turning right
    pub fn rotate_yaw_degrees(&mut self, degrees: f32) {
        let delta = Quat::from_rotation_y(-degrees.to_radians());
        self.rotation = (delta * self.rotation).normalize();
    }

    /// Map a point from this transform's local space into its parent's space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * (self.scale * point)
    }

    /// Compose with a child transform expressed in this transform's space
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            position: self.transform_point(child.position),
            rotation: (self.rotation * child.rotation).normalize(),
            scale: self.scale * child.scale,
        }
    }
}

/// Rotation whose forward (-Z) points along `direction`.
///
/// Returns `None` for a zero-length direction. When `direction` is parallel
/// to `up`, a fallback up axis is used.
pub fn look_rotation(direction: Vec3, up: Vec3) -> Option<Quat> {
    let forward = direction.try_normalize()?;
    let right = forward
        .cross(up)
        .try_normalize()
        .or_else(|| forward.cross(Vec3::Z).try_normalize())?;
    let true_up = right.cross(forward);
    Some(Quat::from_mat3(&Mat3::from_cols(right, true_up, -forward)).normalize())
}

/// A half-line used for interaction traces
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`. A zero direction falls back to forward.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Nearest intersection reported by a host raycast
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// The entity owning the collider that was hit (not necessarily a root)
    pub entity: EntityId,
    pub distance: f32,
    pub point: Vec3,
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
