//! Keep an entity turned toward another
//!
//! The aim is solved in world space and written back relative to the owner's
//! parent, so a parented entity still faces its target.

use crate::host::EntityHost;
use serde::{Deserialize, Serialize};
use vantage_core::{look_rotation, math, EntityId, Result, Vec3};
use vantage_runtime::Behavior;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookAtSettings {
    /// Turn gradually instead of snapping
    pub smooth_look: bool,
    pub smooth_speed: f32,
}

impl Default for LookAtSettings {
    fn default() -> Self {
        Self {
            smooth_look: false,
            smooth_speed: 5.0,
        }
    }
}

/// Keeps the owner's forward pointed at another entity
#[derive(Debug, Clone)]
pub struct LookAt {
    target: Option<EntityId>,
    settings: LookAtSettings,
}

impl LookAt {
    pub fn new(target: Option<EntityId>, settings: LookAtSettings) -> Self {
        Self { target, settings }
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<EntityId>) {
        self.target = target;
    }
}

impl<H: EntityHost + ?Sized> Behavior<H> for LookAt {
    fn update(&mut self, host: &mut H, dt: f64) -> Result<()> {
        let Some(target) = self.target else {
            return Ok(());
        };
        let Some(target_position) = host.position_of(target) else {
            return Ok(());
        };

        // Aim in world space, then express the result relative to the parent
        let parent = host.parent_transform();
        let transform = host.transform_mut();
        let eye = parent.transform_point(transform.position);
        let Some(aim) = look_rotation(target_position - eye, Vec3::Y) else {
            return Ok(());
        };
        let desired = (parent.rotation.inverse() * aim).normalize();

        transform.rotation = if self.settings.smooth_look {
            let t = math::clamp01(self.settings.smooth_speed * dt as f32);
            transform.rotation.slerp(desired, t).normalize()
        } else {
            desired
        };
        Ok(())
    }

    fn name(&self) -> &str {
        "look_at"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utility::testing::TestEntity;
    use vantage_core::{Quat, Transform};

    fn host_with_target(position: Vec3) -> (TestEntity, EntityId) {
        let mut host = TestEntity::new();
        let target = EntityId::from_raw(2);
        host.others.insert(target, position);
        (host, target)
    }

    #[test]
    fn test_instant_faces_target() {
        let (mut host, target) = host_with_target(Vec3::new(5.0, 0.0, 0.0));
        let mut look = LookAt::new(Some(target), LookAtSettings::default());
        look.update(&mut host, 0.016).unwrap();
        assert!((host.transform.forward() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_smooth_turns_partway() {
        let (mut host, target) = host_with_target(Vec3::new(5.0, 0.0, 0.0));
        let settings = LookAtSettings {
            smooth_look: true,
            smooth_speed: 5.0,
        };
        let mut look = LookAt::new(Some(target), settings);

        look.update(&mut host, 0.1).unwrap();
        let forward = host.transform.forward();
        assert!(forward.x > 0.1 && forward.x < 0.99, "forward = {:?}", forward);

        for _ in 0..200 {
            look.update(&mut host, 0.1).unwrap();
        }
        assert!((host.transform.forward() - Vec3::X).length() < 1e-3);
    }

    #[test]
    fn test_parented_owner_aims_in_world_space() {
        let (mut host, target) = host_with_target(Vec3::new(10.0, 0.0, -5.0));
        host.parent = Transform::from_position(Vec3::new(10.0, 0.0, 0.0));
        host.parent.rotate_yaw_degrees(90.0);
        let mut look = LookAt::new(Some(target), LookAtSettings::default());
        look.update(&mut host, 0.016).unwrap();

        let world = host.parent.mul_transform(&host.transform);
        assert!((world.forward() - Vec3::NEG_Z).length() < 1e-5);
        // Relative to a parent facing +X, world -Z is a quarter turn left
        assert!((host.transform.forward() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut host = TestEntity::new();
        let mut look = LookAt::new(None, LookAtSettings::default());
        look.update(&mut host, 0.016).unwrap();
        assert_eq!(host.transform.rotation, Quat::IDENTITY);

        look.set_target(Some(EntityId::from_raw(77)));
        look.update(&mut host, 0.016).unwrap();
        assert_eq!(host.transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_coincident_target_is_skipped() {
        let (mut host, target) = host_with_target(Vec3::ZERO);
        let mut look = LookAt::new(Some(target), LookAtSettings::default());
        look.update(&mut host, 0.016).unwrap();
        assert_eq!(host.transform.rotation, Quat::IDENTITY);
    }
}
