//! Constant-velocity translation

use crate::host::EntityHost;
use serde::{Deserialize, Serialize};
use vantage_core::{Result, Vec3};
use vantage_runtime::Behavior;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleMoveSettings {
    pub direction: Vec3,
    /// Units per second along `direction`
    pub speed: f32,
}

impl Default for SimpleMoveSettings {
    fn default() -> Self {
        Self {
            direction: Vec3::X,
            speed: 1.0,
        }
    }
}

/// Translates the owner at a constant rate
#[derive(Debug, Clone, Default)]
pub struct SimpleMove {
    settings: SimpleMoveSettings,
}

impl SimpleMove {
    pub fn new(settings: SimpleMoveSettings) -> Self {
        Self { settings }
    }
}

impl<H: EntityHost + ?Sized> Behavior<H> for SimpleMove {
    fn update(&mut self, host: &mut H, dt: f64) -> Result<()> {
        let SimpleMoveSettings { direction, speed } = self.settings;
        if direction == Vec3::ZERO || speed == 0.0 {
            return Ok(());
        }
        host.transform_mut().position += direction * speed * dt as f32;
        Ok(())
    }

    fn name(&self) -> &str {
        "simple_move"
    }
}
