//! Kinematic character body with an attached first-person camera

use serde::{Deserialize, Serialize};
use vantage_core::{Color, Quat, Ray, Transform, Vec2, Vec3};
use vantage_gameplay::{CameraRig, CharacterMotor, CrosshairView};

/// Height of the walkable floor plane
pub const FLOOR_Y: f32 = 0.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySettings {
    pub position: Vec3,
    /// Initial heading in degrees, positive turning right
    pub yaw: f32,
    /// Camera height above the feet
    pub eye_height: f32,
    /// Attach a camera; without one look input only turns the body
    pub camera: bool,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            eye_height: 1.6,
            camera: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    pub field_of_view: f32,
    pub local_rotation: Quat,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            field_of_view: 60.0,
            local_rotation: Quat::IDENTITY,
        }
    }
}

/// Moves freely and stands on the floor plane at `FLOOR_Y`
#[derive(Debug, Clone)]
pub struct FirstPersonBody {
    transform: Transform,
    grounded: bool,
    eye_height: f32,
    lens: Option<Lens>,
}

impl FirstPersonBody {
    pub fn new(settings: &BodySettings) -> Self {
        let mut transform = Transform::from_position(settings.position);
        transform.rotate_yaw_degrees(settings.yaw);
        let mut body = Self {
            transform,
            grounded: false,
            eye_height: settings.eye_height,
            lens: settings.camera.then(Lens::default),
        };
        body.snap_to_floor();
        body
    }

    pub fn has_camera(&self) -> bool {
        self.lens.is_some()
    }

    pub fn lens(&self) -> Option<&Lens> {
        self.lens.as_ref()
    }

    pub fn eye_position(&self) -> Vec3 {
        self.transform.position + Vec3::Y * self.eye_height
    }

    fn snap_to_floor(&mut self) {
        self.grounded = self.transform.position.y <= FLOOR_Y;
        if self.grounded {
            self.transform.position.y = FLOOR_Y;
        }
    }
}

impl CharacterMotor for FirstPersonBody {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn move_by(&mut self, delta: Vec3) {
        self.transform.position += delta;
        self.snap_to_floor();
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn rotate_yaw(&mut self, degrees: f32) {
        self.transform.rotate_yaw_degrees(degrees);
    }
}

impl CameraRig for FirstPersonBody {
    fn field_of_view(&self) -> f32 {
        self.lens.map_or(0.0, |lens| lens.field_of_view)
    }

    fn set_field_of_view(&mut self, degrees: f32) {
        if let Some(lens) = self.lens.as_mut() {
            lens.field_of_view = degrees;
        }
    }

    fn set_local_rotation(&mut self, rotation: Quat) {
        if let Some(lens) = self.lens.as_mut() {
            lens.local_rotation = rotation;
        }
    }

    fn viewport_center_ray(&self) -> Ray {
        let local = self.lens.map_or(Quat::IDENTITY, |lens| lens.local_rotation);
        let direction = self.transform.rotation * local * Vec3::NEG_Z;
        Ray::new(self.eye_position(), direction)
    }
}

/// The crosshair image as last drawn
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CrosshairImage {
    pub color: Color,
    pub size: Vec2,
}

impl CrosshairView for CrosshairImage {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }
}
