//! Player controller tuning

use serde::{Deserialize, Serialize};

pub const MIN_FOV: f32 = 30.0;
pub const MAX_FOV: f32 = 90.0;

/// Tuning values for [`super::PlayerController`], loadable from TOML.
///
/// Every field has a default; out-of-range values are pulled back into range
/// by [`PlayerSettings::sanitized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    // Look & feel
    pub sensitivity_scalar: f32,
    pub yaw_sensitivity: f32,
    pub pitch_sensitivity: f32,
    pub yaw_inversion: bool,
    pub pitch_inversion: bool,

    // Fov & zoom
    pub default_fov: f32,
    pub zoom_scalar: f32,
    pub zoom_duration: f32,

    // Jump & gravity
    pub gravity_scalar: f32,
    /// World gravity along Y, negative pulls down
    pub gravity_y: f32,
    pub jump_height: f32,

    // Speed
    pub walk_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,

    // Interaction
    pub interaction_range: f32,

    pub debug: DebugSettings,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            sensitivity_scalar: 0.5,
            yaw_sensitivity: 0.5,
            pitch_sensitivity: 0.5,
            yaw_inversion: false,
            pitch_inversion: false,
            default_fov: 60.0,
            zoom_scalar: 2.0,
            zoom_duration: 0.2,
            gravity_scalar: 1.0,
            gravity_y: -9.81,
            jump_height: 1.0,
            walk_speed: 4.0,
            acceleration: 24.0,
            deceleration: 32.0,
            interaction_range: 3.0,
            debug: DebugSettings::default(),
        }
    }
}

/// Developer shortcuts that poke the local vitals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Initial value of the controller's `can_debug` flag
    pub enabled: bool,
    pub heal_amount: f32,
    pub damage_amount: f32,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            heal_amount: 5.0,
            damage_amount: 5.0,
        }
    }
}

fn clamp_field(field: &str, value: f32, min: f32, max: f32) -> f32 {
    let clamped = if value.is_nan() { min } else { value.clamp(min, max) };
    if clamped != value {
        log::warn!(
            "{} = {} is outside [{}, {}], using {}",
            field,
            value,
            min,
            max,
            clamped
        );
    }
    clamped
}

impl PlayerSettings {
    /// Copy with every ranged field clamped into its valid range
    pub fn sanitized(&self) -> Self {
        let mut s = self.clone();
        s.sensitivity_scalar = clamp_field("sensitivity_scalar", s.sensitivity_scalar, 0.01, 100.0);
        s.yaw_sensitivity = clamp_field("yaw_sensitivity", s.yaw_sensitivity, 0.01, 100.0);
        s.pitch_sensitivity = clamp_field("pitch_sensitivity", s.pitch_sensitivity, 0.01, 100.0);
        s.default_fov = clamp_field("default_fov", s.default_fov, MIN_FOV, MAX_FOV);
        s.zoom_scalar = clamp_field("zoom_scalar", s.zoom_scalar, 1.0, 4.0);
        s.zoom_duration = clamp_field("zoom_duration", s.zoom_duration, 0.0, 3.0);
        s.gravity_scalar = clamp_field("gravity_scalar", s.gravity_scalar, 0.0, f32::MAX);
        s.jump_height = clamp_field("jump_height", s.jump_height, 0.0, f32::MAX);
        s.walk_speed = clamp_field("walk_speed", s.walk_speed, 0.0, f32::MAX);
        s.acceleration = clamp_field("acceleration", s.acceleration, 0.0, f32::MAX);
        s.deceleration = clamp_field("deceleration", s.deceleration, 0.0, f32::MAX);
        s.interaction_range = clamp_field("interaction_range", s.interaction_range, 0.0, f32::MAX);
        s
    }

    /// Field of view while zoomed in
    pub fn zoomed_fov(&self) -> f32 {
        self.default_fov / self.zoom_scalar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        let s = PlayerSettings::default();
        assert_eq!(s.sanitized(), s);
        assert_eq!(s.zoomed_fov(), 30.0);
    }

    #[test]
    fn test_sanitized_clamps() {
        let s = PlayerSettings {
            default_fov: 120.0,
            zoom_scalar: 0.5,
            zoom_duration: -1.0,
            sensitivity_scalar: 0.0,
            walk_speed: f32::NAN,
            ..PlayerSettings::default()
        }
        .sanitized();

        assert_eq!(s.default_fov, MAX_FOV);
        assert_eq!(s.zoom_scalar, 1.0);
        assert_eq!(s.zoom_duration, 0.0);
        assert_eq!(s.sensitivity_scalar, 0.01);
        assert_eq!(s.walk_speed, 0.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let s: PlayerSettings = toml::from_str(
            r#"
            walk_speed = 6.0
            pitch_inversion = true

            [debug]
            damage_amount = 20.0
            "#,
        )
        .unwrap();

        assert_eq!(s.walk_speed, 6.0);
        assert!(s.pitch_inversion);
        assert_eq!(s.debug.damage_amount, 20.0);
        assert_eq!(s.debug.heal_amount, 5.0);
        assert_eq!(s.acceleration, 24.0);
    }
}
