//! Sandbox host: the world, the player body, and the UI it draws into
//!
//! `Sandbox` implements the gameplay host traits. Utility behaviors live on
//! their entities as a `Utilities` component and run against an
//! `EntityView`, a short-lived borrow of the world scoped to one entity.

use crate::body::{BodySettings, CrosshairImage, FirstPersonBody};
use crate::scenario::EntityDef;
use crate::world::{Collider, SandboxWorld};
use vantage_core::{EntityId, Result, Transform, VantageError, Vec3};
use vantage_gameplay::utility::{Lifetime, LookAt, SimpleMove, SimpleRotate};
use vantage_gameplay::{
    CameraRig, CharacterMotor, CrosshairHost, CrosshairView, EntityHost, InteractionWorld,
    PlayerHost, Vitals, VitalsComponent, VitalsSettings,
};
use vantage_runtime::{Behavior, EventBus, GameEvent, InputState};

/// A utility behavior that can run against any entity host
pub type UtilityBehavior = Box<dyn for<'a> Behavior<dyn EntityHost + 'a> + Send + Sync>;

/// Behaviors attached to one entity, run in order
#[derive(Default)]
pub struct Utilities(pub Vec<UtilityBehavior>);

/// Name the player entity is spawned under
pub const PLAYER_NAME: &str = "player";

pub struct Sandbox {
    world: SandboxWorld,
    input: InputState,
    player: EntityId,
    body: FirstPersonBody,
    crosshair: CrosshairImage,
    player_velocity: Option<Vec3>,
    cursor_locked: bool,
    events: EventBus<GameEvent>,
}

impl Sandbox {
    pub fn new(body: &BodySettings, vitals: Option<&VitalsSettings>) -> Result<Self> {
        let mut world = SandboxWorld::new();
        let player = world.spawn(PLAYER_NAME)?;
        let body = FirstPersonBody::new(body);
        world.set_transform(player, body.transform())?;
        if let Some(settings) = vitals {
            world.insert(player, VitalsComponent::new(settings))?;
        }

        Ok(Self {
            world,
            input: InputState::new(),
            player,
            body,
            crosshair: CrosshairImage::default(),
            player_velocity: None,
            cursor_locked: false,
            events: EventBus::new(),
        })
    }

    /// Spawn scene entities: first all names, then components and links
    pub fn spawn_entities(&mut self, defs: &[EntityDef]) -> Result<()> {
        for def in defs {
            let id = self.world.spawn(def.name.clone())?;
            let mut transform = Transform::from_position(def.position);
            transform.rotate_local_degrees(def.rotation);
            self.world.set_transform(id, transform)?;
        }

        for def in defs {
            let id = self
                .world
                .get_id(&def.name)
                .ok_or_else(|| VantageError::EntityNotFound(def.name.clone()))?;

            if let Some(parent) = &def.parent {
                let parent = self
                    .world
                    .get_id(parent)
                    .ok_or_else(|| VantageError::EntityNotFound(parent.clone()))?;
                self.world.set_parent(id, parent)?;
            }
            if let Some(half_extents) = def.collider {
                self.world.insert(id, Collider::new(half_extents))?;
            }
            if let Some(info) = &def.interactable {
                self.world.insert(id, info.clone())?;
            }

            let utilities = self.build_utilities(def);
            if !utilities.0.is_empty() {
                self.world.insert(id, utilities)?;
            }
        }

        log::info!("Spawned {} entities", defs.len());
        Ok(())
    }

    fn build_utilities(&self, def: &EntityDef) -> Utilities {
        let mut behaviors: Vec<UtilityBehavior> = Vec::new();
        if let Some(settings) = &def.lifetime {
            behaviors.push(Box::new(Lifetime::new(settings)));
        }
        if let Some(settings) = &def.simple_move {
            behaviors.push(Box::new(SimpleMove::new(settings.clone())));
        }
        if let Some(settings) = &def.simple_rotate {
            behaviors.push(Box::new(SimpleRotate::new(settings.clone())));
        }
        if let Some(look_at) = &def.look_at {
            let target = look_at.target.as_deref().and_then(|name| {
                let id = self.world.get_id(name);
                if id.is_none() {
                    log::warn!("'{}' looks at unknown entity '{}'", def.name, name);
                }
                id
            });
            behaviors.push(Box::new(LookAt::new(target, look_at.settings.clone())));
        }
        Utilities(behaviors)
    }

    // --- Accessors ---

    pub fn world(&self) -> &SandboxWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut SandboxWorld {
        &mut self.world
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn body(&self) -> &FirstPersonBody {
        &self.body
    }

    pub fn crosshair(&self) -> &CrosshairImage {
        &self.crosshair
    }

    pub fn crosshair_mut(&mut self) -> &mut CrosshairImage {
        &mut self.crosshair
    }

    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    pub fn player_health(&self) -> Option<f32> {
        self.world
            .get_ref::<VitalsComponent>(self.player)
            .map(|vitals| vitals.current_health())
    }

    pub fn set_player_velocity(&mut self, velocity: Option<Vec3>) {
        self.player_velocity = velocity;
    }

    // --- Frame steps ---

    /// Copy the body transform onto the player entity
    pub fn sync_player(&mut self) -> Result<()> {
        self.world.set_transform(self.player, self.body.transform())
    }

    /// Run every entity's utility behaviors once
    pub fn update_utilities(&mut self, dt: f64) -> Result<()> {
        for id in self.world.ids_with::<Utilities>() {
            let Some(transform) = self.world.transform(id) else {
                continue;
            };
            let parent = self
                .world
                .get_parent(id)
                .and_then(|parent| self.world.world_transform(parent))
                .unwrap_or(Transform::IDENTITY);
            let Some(mut utilities) = self.world.take::<Utilities>(id) else {
                continue;
            };

            let mut view = EntityView {
                world: &self.world,
                owner: id,
                transform,
                parent,
                destroy: false,
            };
            let host: &mut dyn EntityHost = &mut view;
            let result = utilities
                .0
                .iter_mut()
                .try_for_each(|behavior| behavior.update(&mut *host, dt));
            let EntityView {
                transform, destroy, ..
            } = view;

            self.world.set_transform(id, transform)?;
            self.world.insert(id, utilities)?;
            if destroy {
                self.events.push(GameEvent::DestroyRequested(id));
            }
            result?;
        }
        Ok(())
    }

    /// Drain host events and every vitals component's notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for id in self.world.ids_with::<VitalsComponent>() {
            if let Some(vitals) = self.world.get_mut::<VitalsComponent>(id) {
                events.extend(
                    vitals
                        .drain_events()
                        .into_iter()
                        .map(|event| GameEvent::Vitals { entity: id, event }),
                );
            }
        }
        events.extend(self.events.drain());
        events
    }
}

impl PlayerHost for Sandbox {
    fn owner(&self) -> EntityId {
        self.player
    }

    fn input(&self) -> &InputState {
        &self.input
    }

    fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    fn motor(&mut self) -> &mut dyn CharacterMotor {
        &mut self.body
    }

    fn camera(&mut self) -> Option<&mut dyn CameraRig> {
        if self.body.has_camera() {
            Some(&mut self.body)
        } else {
            None
        }
    }

    fn world(&mut self) -> Option<&mut dyn InteractionWorld> {
        Some(&mut self.world)
    }

    fn vitals(&mut self) -> Option<&mut dyn Vitals> {
        self.world
            .get_mut::<VitalsComponent>(self.player)
            .map(|vitals| vitals as &mut dyn Vitals)
    }

    fn lock_cursor(&mut self) {
        self.cursor_locked = true;
    }
}

impl CrosshairHost for Sandbox {
    fn player_velocity(&self) -> Option<Vec3> {
        self.player_velocity
    }

    fn crosshair_view(&mut self) -> &mut dyn CrosshairView {
        &mut self.crosshair
    }
}

/// One entity's local transform plus read access to the rest of the world
pub struct EntityView<'a> {
    world: &'a SandboxWorld,
    owner: EntityId,
    transform: Transform,
    /// World transform of the owner's parent
    parent: Transform,
    destroy: bool,
}

impl EntityHost for EntityView<'_> {
    fn owner(&self) -> EntityId {
        self.owner
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn parent_transform(&self) -> Transform {
        self.parent
    }

    fn position_of(&self, entity: EntityId) -> Option<Vec3> {
        if entity == self.owner {
            return Some(self.parent.transform_point(self.transform.position));
        }
        self.world.world_position(entity)
    }

    fn destroy(&mut self) {
        self.destroy = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_gameplay::utility::{LifetimeSettings, SimpleMoveSettings};
    use vantage_gameplay::InteractableInfo;
    use vantage_runtime::VitalsEvent;

    fn sandbox() -> Sandbox {
        Sandbox::new(&BodySettings::default(), Some(&VitalsSettings::default())).unwrap()
    }

    fn entity(name: &str) -> EntityDef {
        EntityDef {
            name: name.to_string(),
            ..EntityDef::default()
        }
    }

    #[test]
    fn test_player_spawned_with_vitals() {
        let mut sandbox = sandbox();
        let player = sandbox.player();
        assert_eq!(sandbox.world().get_id(PLAYER_NAME), Some(player));
        assert_eq!(sandbox.player_health(), Some(100.0));

        let events = sandbox.drain_events();
        assert!(matches!(
            events[0],
            GameEvent::Vitals {
                event: VitalsEvent::HealthUpdated { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_without_vitals_host_reports_none() {
        let mut sandbox = Sandbox::new(&BodySettings::default(), None).unwrap();
        assert!(PlayerHost::vitals(&mut sandbox).is_none());
        assert!(sandbox.player_health().is_none());
    }

    #[test]
    fn test_camera_follows_body_settings() {
        let mut sandbox = Sandbox::new(
            &BodySettings {
                camera: false,
                ..BodySettings::default()
            },
            None,
        )
        .unwrap();
        assert!(sandbox.camera().is_none());
    }

    #[test]
    fn test_spawn_entities_with_components() {
        let mut sandbox = sandbox();
        let mut door = entity("door");
        door.position = Vec3::new(0.0, 1.0, -3.0);
        door.collider = Some(Vec3::new(0.5, 1.0, 0.1));
        door.interactable = Some(InteractableInfo::new("Open", "Door", ""));
        let mut handle = entity("handle");
        handle.parent = Some("door".into());

        sandbox.spawn_entities(&[door, handle]).unwrap();
        let world = sandbox.world();
        let door = world.get_id("door").unwrap();
        let handle = world.get_id("handle").unwrap();
        assert_eq!(world.get_parent(handle), Some(door));
        assert!(world.has::<Collider>(door));
        assert_eq!(world.resolve_interactable(handle), Some(door));
    }

    #[test]
    fn test_utilities_move_and_expire() {
        let mut sandbox = sandbox();
        let mut mover = entity("mover");
        mover.simple_move = Some(SimpleMoveSettings {
            direction: Vec3::Z,
            speed: 2.0,
        });
        mover.lifetime = Some(LifetimeSettings { lifetime: 1.0 });
        sandbox.spawn_entities(&[mover]).unwrap();
        sandbox.drain_events();

        for _ in 0..3 {
            sandbox.update_utilities(0.25).unwrap();
        }
        let id = sandbox.world().get_id("mover").unwrap();
        let position = sandbox.world().transform(id).unwrap().position;
        assert!((position.z - 1.5).abs() < 1e-5);
        assert!(sandbox.drain_events().is_empty());

        sandbox.update_utilities(0.25).unwrap();
        assert_eq!(sandbox.drain_events(), vec![GameEvent::DestroyRequested(id)]);
        // Behaviors are put back after running
        assert!(sandbox.world().has::<Utilities>(id));
    }

    #[test]
    fn test_unknown_look_target_is_tolerated() {
        let mut sandbox = sandbox();
        let mut turret = entity("turret");
        turret.look_at = Some(crate::scenario::LookAtDef {
            target: Some("ghost".into()),
            ..Default::default()
        });
        sandbox.spawn_entities(&[turret]).unwrap();
        sandbox.update_utilities(0.1).unwrap();
        let id = sandbox.world().get_id("turret").unwrap();
        assert_eq!(sandbox.world().transform(id), Some(Transform::IDENTITY));
    }

    #[test]
    fn test_look_at_tracks_player() {
        let mut sandbox = sandbox();
        let mut turret = entity("turret");
        turret.position = Vec3::new(0.0, 0.0, -5.0);
        turret.look_at = Some(crate::scenario::LookAtDef {
            target: Some(PLAYER_NAME.into()),
            ..Default::default()
        });
        sandbox.spawn_entities(&[turret]).unwrap();
        sandbox.update_utilities(0.1).unwrap();
        let id = sandbox.world().get_id("turret").unwrap();
        let forward = sandbox.world().transform(id).unwrap().forward();
        assert!((forward - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_look_at_under_rotated_parent() {
        let mut sandbox = sandbox();
        let mut rig = entity("rig");
        rig.position = Vec3::new(10.0, 0.0, 0.0);
        rig.rotation = Vec3::new(0.0, 90.0, 0.0);
        let mut turret = entity("turret");
        turret.parent = Some("rig".into());
        turret.look_at = Some(crate::scenario::LookAtDef {
            target: Some("beacon".into()),
            ..Default::default()
        });
        let mut beacon = entity("beacon");
        beacon.position = Vec3::new(10.0, 0.0, -5.0);
        sandbox.spawn_entities(&[rig, turret, beacon]).unwrap();

        sandbox.update_utilities(0.1).unwrap();
        let id = sandbox.world().get_id("turret").unwrap();
        let world = sandbox.world().world_transform(id).unwrap();
        assert!((world.position - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
        assert!((world.forward() - Vec3::NEG_Z).length() < 1e-5);
    }
}
