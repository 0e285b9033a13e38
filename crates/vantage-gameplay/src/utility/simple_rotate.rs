//! Constant-rate local rotation

use crate::host::EntityHost;
use serde::{Deserialize, Serialize};
use vantage_core::{Result, Vec3};
use vantage_runtime::Behavior;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleRotateSettings {
    /// Euler angles in degrees applied per second at speed 1
    pub angle: Vec3,
    pub speed: f32,
}

impl Default for SimpleRotateSettings {
    fn default() -> Self {
        Self {
            angle: Vec3::X,
            speed: 1.0,
        }
    }
}

/// Spins the owner in local space at a constant rate
#[derive(Debug, Clone, Default)]
pub struct SimpleRotate {
    settings: SimpleRotateSettings,
}

impl SimpleRotate {
    pub fn new(settings: SimpleRotateSettings) -> Self {
        Self { settings }
    }
}

impl<H: EntityHost + ?Sized> Behavior<H> for SimpleRotate {
    fn update(&mut self, host: &mut H, dt: f64) -> Result<()> {
        let SimpleRotateSettings { angle, speed } = self.settings;
        if angle == Vec3::ZERO || speed == 0.0 {
            return Ok(());
        }
        host.transform_mut().rotate_local_degrees(angle * speed * dt as f32);
        Ok(())
    }

    fn name(&self) -> &str {
        "simple_rotate"
    }
}
