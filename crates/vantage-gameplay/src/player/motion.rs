//! Gravity, jumping, and horizontal movement

use vantage_core::{math, Transform, Vec2, Vec3};

/// Vertical speed held while grounded, keeps the body pressed to slopes
pub const GROUNDED_VERTICAL_SPEED: f32 = -1.0;

/// Below this squared input magnitude the body decelerates
const INPUT_DEADZONE_SQ: f32 = 0.01;

/// Integrate vertical speed for one frame
pub fn integrate_gravity(
    vertical_speed: f32,
    grounded: bool,
    gravity_y: f32,
    gravity_scalar: f32,
    dt: f32,
) -> f32 {
    if grounded {
        GROUNDED_VERTICAL_SPEED
    } else {
        vertical_speed + gravity_y * dt * gravity_scalar
    }
}

/// Launch speed that peaks at `jump_height`: `sqrt(2 * h * |g| * scalar)`
pub fn jump_speed(jump_height: f32, gravity_y: f32, gravity_scalar: f32) -> f32 {
    (2.0 * jump_height * gravity_y.abs() * gravity_scalar)
        .max(0.0)
        .sqrt()
}

/// Desired horizontal velocity from move input in the body's frame.
///
/// Input longer than one (diagonal keys) is shortened to unit length.
pub fn target_velocity(move_input: Vec2, body: &Transform, walk_speed: f32) -> Vec3 {
    let input = move_input.clamp_length_max(1.0);
    let right = flatten(body.right());
    let forward = flatten(body.forward());
    (right * input.x + forward * input.y) * walk_speed
}

/// Move `current` toward `target`, accelerating while there is input and
/// decelerating otherwise
pub fn approach_velocity(
    current: Vec3,
    target: Vec3,
    move_input: Vec2,
    acceleration: f32,
    deceleration: f32,
    dt: f32,
) -> Vec3 {
    let rate = if move_input.length_squared() > INPUT_DEADZONE_SQ {
        acceleration
    } else {
        deceleration
    };
    math::lerp_vec3(current, target, rate * dt)
}

fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grounded_resets_vertical_speed() {
        assert_eq!(
            integrate_gravity(-20.0, true, -9.81, 1.0, 0.1),
            GROUNDED_VERTICAL_SPEED
        );
    }

    #[test]
    fn test_airborne_integrates_scaled_gravity() {
        let v = integrate_gravity(0.0, false, -10.0, 2.0, 0.5);
        assert!((v + 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_jump_speed() {
        // sqrt(2 * 1 * 9.81)
        assert!((jump_speed(1.0, -9.81, 1.0) - 4.4294).abs() < 1e-3);
        assert_eq!(jump_speed(0.0, -9.81, 1.0), 0.0);
    }

    #[test]
    fn test_target_velocity_follows_facing() {
        let body = Transform::IDENTITY;
        let v = target_velocity(Vec2::new(0.0, 1.0), &body, 4.0);
        assert!((v - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-5);

        let mut turned = Transform::IDENTITY;
        turned.rotate_yaw_degrees(90.0);
        let v = target_velocity(Vec2::new(0.0, 1.0), &turned, 4.0);
        assert!((v - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_diagonal_input_is_normalized() {
        let v = target_velocity(Vec2::new(1.0, 1.0), &Transform::IDENTITY, 4.0);
        assert!((v.length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_analog_input_keeps_magnitude() {
        let v = target_velocity(Vec2::new(0.0, 0.5), &Transform::IDENTITY, 4.0);
        assert!((v.length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_approach_uses_acceleration_with_input() {
        let target = Vec3::new(4.0, 0.0, 0.0);
        let v = approach_velocity(Vec3::ZERO, target, Vec2::X, 24.0, 32.0, 0.01);
        assert!((v.x - 0.96).abs() < 1e-5);
    }

    #[test]
    fn test_approach_uses_deceleration_without_input() {
        let current = Vec3::new(4.0, 0.0, 0.0);
        let v = approach_velocity(current, Vec3::ZERO, Vec2::ZERO, 24.0, 32.0, 0.01);
        assert!((v.x - 2.72).abs() < 1e-5);
    }

    #[test]
    fn test_approach_never_overshoots() {
        let target = Vec3::new(4.0, 0.0, 0.0);
        let v = approach_velocity(Vec3::ZERO, target, Vec2::X, 24.0, 32.0, 1.0);
        assert_eq!(v, target);
    }
}
