//! Engine collaborators
//!
//! Gameplay code computes values; the host engine owns transforms, physics,
//! input, and UI. These traits are the only way behaviors reach those
//! services. Optional collaborators (`camera`, `world`, `vitals`) may be
//! missing, in which case the behavior that needs them does nothing.

use crate::interaction::Interactable;
use crate::vitals::Vitals;
use vantage_core::{Color, EntityId, Quat, Ray, RayHit, Transform, Vec2, Vec3};
use vantage_runtime::InputState;

/// Kinematic character body driven by the player controller
pub trait CharacterMotor {
    /// Whether the body rests on a walkable surface after the last move
    fn is_grounded(&self) -> bool;

    /// Move by `delta` (world space) and resolve collisions
    fn move_by(&mut self, delta: Vec3);

    fn transform(&self) -> Transform;

    /// Turn the body around world up by `degrees`, positive turning right
    fn rotate_yaw(&mut self, degrees: f32);
}

/// First-person camera attached to the character
pub trait CameraRig {
    /// Vertical field of view in degrees
    fn field_of_view(&self) -> f32;

    fn set_field_of_view(&mut self, degrees: f32);

    /// Rotation relative to the character body
    fn set_local_rotation(&mut self, rotation: Quat);

    /// World-space ray through the center of the viewport
    fn viewport_center_ray(&self) -> Ray;
}

/// World queries used by the interaction trace
pub trait InteractionWorld {
    /// Nearest hit along `ray` within `max_distance`
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit>;

    /// Walk from the hit collider's entity to its root, then search the root
    /// and its descendants depth-first for the interactable capability
    fn resolve_interactable(&self, hit_entity: EntityId) -> Option<EntityId>;

    /// Look up a live interactable. Stale ids resolve to `None`.
    fn interactable_mut(&mut self, id: EntityId) -> Option<&mut dyn Interactable>;
}

/// Everything the player controller talks to
pub trait PlayerHost {
    /// The entity the controller is attached to
    fn owner(&self) -> EntityId;

    fn input(&self) -> &InputState;

    fn input_mut(&mut self) -> &mut InputState;

    fn motor(&mut self) -> &mut dyn CharacterMotor;

    fn camera(&mut self) -> Option<&mut dyn CameraRig>;

    fn world(&mut self) -> Option<&mut dyn InteractionWorld>;

    fn vitals(&mut self) -> Option<&mut dyn Vitals>;

    /// Capture the pointer for mouse look
    fn lock_cursor(&mut self) {}
}

/// UI element drawn by the crosshair controller
pub trait CrosshairView {
    /// Tint every image of the crosshair
    fn set_color(&mut self, color: Color);

    /// Size of the crosshair rect in UI units
    fn set_size(&mut self, size: Vec2);
}

/// Everything the crosshair controller talks to
pub trait CrosshairHost {
    /// Velocity of the tracked character, `None` when there is no character
    fn player_velocity(&self) -> Option<Vec3>;

    fn crosshair_view(&mut self) -> &mut dyn CrosshairView;
}

/// Transform access for the utility behaviors
pub trait EntityHost {
    /// The entity the behavior is attached to
    fn owner(&self) -> EntityId;

    /// Owner's transform, relative to its parent
    fn transform(&self) -> &Transform;

    fn transform_mut(&mut self) -> &mut Transform;

    /// World transform of the owner's parent, identity for a root entity
    fn parent_transform(&self) -> Transform {
        Transform::IDENTITY
    }

    /// World position of an entity, `None` if it no longer exists
    fn position_of(&self, entity: EntityId) -> Option<Vec3>;

    /// Schedule destruction of the owner at the end of the frame
    fn destroy(&mut self);
}
