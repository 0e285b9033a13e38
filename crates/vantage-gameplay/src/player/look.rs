//! Mouse look

use super::settings::PlayerSettings;
use vantage_core::{Quat, Vec2};

/// Pitch limit in degrees, just short of straight up/down
pub const PITCH_LIMIT: f32 = 86.0;

/// Turn this frame's look input into a yaw delta and the new pitch.
///
/// Positive yaw turns right. Pitch is accumulated, positive looking down,
/// and clamped to `±PITCH_LIMIT`.
pub fn look_step(look: Vec2, pitch: f32, settings: &PlayerSettings) -> (f32, f32) {
    let look = look * settings.sensitivity_scalar;

    let yaw_sensitivity = if settings.yaw_inversion {
        -settings.yaw_sensitivity
    } else {
        settings.yaw_sensitivity
    };
    let pitch_sensitivity = if settings.pitch_inversion {
        -settings.pitch_sensitivity
    } else {
        settings.pitch_sensitivity
    };

    let yaw_delta = look.x * yaw_sensitivity;
    let pitch = (pitch - look.y * pitch_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    (yaw_delta, pitch)
}

/// Camera local rotation for a pitch in degrees (positive looks down)
pub fn pitch_rotation(pitch: f32) -> Quat {
    Quat::from_rotation_x(-pitch.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::Vec3;

    #[test]
    fn test_sensitivity_scales_input() {
        let settings = PlayerSettings::default();
        let (yaw, pitch) = look_step(Vec2::new(10.0, 4.0), 0.0, &settings);
        // 10 * 0.5 * 0.5
        assert!((yaw - 2.5).abs() < 1e-5);
        // Moving the mouse up looks up
        assert!((pitch + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_inversion_flips_sign() {
        let settings = PlayerSettings {
            yaw_inversion: true,
            pitch_inversion: true,
            ..PlayerSettings::default()
        };
        let (yaw, pitch) = look_step(Vec2::new(10.0, 4.0), 0.0, &settings);
        assert!((yaw + 2.5).abs() < 1e-5);
        assert!((pitch - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pitch_clamped() {
        let settings = PlayerSettings::default();
        let (_, pitch) = look_step(Vec2::new(0.0, -10_000.0), 0.0, &settings);
        assert_eq!(pitch, PITCH_LIMIT);
        let (_, pitch) = look_step(Vec2::new(0.0, 10_000.0), 0.0, &settings);
        assert_eq!(pitch, -PITCH_LIMIT);
    }

    #[test]
    fn test_positive_pitch_looks_down() {
        let forward = pitch_rotation(30.0) * Vec3::NEG_Z;
        assert!(forward.y < 0.0);
    }
}
