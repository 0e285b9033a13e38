//! First-person player controller
//!
//! Per frame, `update` runs movement (gravity, walking, jumping), then the
//! interaction trace, then debug actions; `late_update` runs look and zoom.
//! Each group is gated by its capability flag, except that a zoom already in
//! flight keeps running when looking is switched off. Missing optional
//! collaborators (camera, interaction world, vitals) silently disable the
//! parts that need them.

mod look;
mod motion;
mod settings;

pub use look::{look_step, pitch_rotation, PITCH_LIMIT};
pub use motion::{
    approach_velocity, integrate_gravity, jump_speed, target_velocity, GROUNDED_VERTICAL_SPEED,
};
pub use settings::{DebugSettings, PlayerSettings, MAX_FOV, MIN_FOV};

use crate::host::PlayerHost;
use crate::zoom::FovTransition;
use vantage_core::{math, EntityId, Quat, Result, Vec3};
use vantage_runtime::{actions, Behavior, EventBus, GameEvent};

pub struct PlayerController {
    settings: PlayerSettings,

    can_move: bool,
    can_look: bool,
    can_interact: bool,
    can_debug: bool,

    /// Smoothed horizontal velocity, y is always zero
    velocity: Vec3,
    vertical_speed: f32,

    /// Accumulated body yaw in degrees, `[0, 360)`
    yaw: f32,
    /// Camera pitch in degrees, positive looking down
    pitch: f32,

    zoom: Option<FovTransition>,
    focused: Option<EntityId>,

    events: EventBus<GameEvent>,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(PlayerSettings::default())
    }
}

impl PlayerController {
    pub fn new(settings: PlayerSettings) -> Self {
        let settings = settings.sanitized();
        Self {
            can_move: true,
            can_look: true,
            can_interact: true,
            can_debug: settings.debug.enabled,
            settings,
            velocity: Vec3::ZERO,
            vertical_speed: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            zoom: None,
            focused: None,
            events: EventBus::new(),
        }
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    // --- Capability flags ---

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    pub fn set_can_move(&mut self, enabled: bool) {
        self.can_move = enabled;
    }

    pub fn can_look(&self) -> bool {
        self.can_look
    }

    pub fn set_can_look(&mut self, enabled: bool) {
        self.can_look = enabled;
    }

    pub fn can_interact(&self) -> bool {
        self.can_interact
    }

    pub fn set_can_interact(&mut self, enabled: bool) {
        self.can_interact = enabled;
    }

    pub fn can_debug(&self) -> bool {
        self.can_debug
    }

    pub fn set_can_debug(&mut self, enabled: bool) {
        self.can_debug = enabled;
    }

    // --- Observable state ---

    /// Horizontal velocity combined with the current vertical speed
    pub fn velocity(&self) -> Vec3 {
        Vec3::new(self.velocity.x, self.vertical_speed, self.velocity.z)
    }

    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }

    pub fn vertical_speed(&self) -> f32 {
        self.vertical_speed
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// The interactable currently under the crosshair
    pub fn focused(&self) -> Option<EntityId> {
        self.focused
    }

    pub fn is_zooming(&self) -> bool {
        self.zoom.is_some()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    // --- Lifecycle ---

    /// One-time setup once the host is ready: reset the camera and grab the cursor
    pub fn start<H: PlayerHost + ?Sized>(&mut self, host: &mut H) {
        self.reset_camera(host);
        host.lock_cursor();
    }

    fn reset_camera<H: PlayerHost + ?Sized>(&mut self, host: &mut H) {
        self.pitch = 0.0;
        let fov = self.settings.default_fov;
        if let Some(camera) = host.camera() {
            camera.set_field_of_view(fov.clamp(MIN_FOV, MAX_FOV));
            camera.set_local_rotation(Quat::IDENTITY);
        }
    }

    // --- Movement ---

    fn apply_gravity<H: PlayerHost + ?Sized>(&mut self, host: &mut H, dt: f32) {
        let grounded = host.motor().is_grounded();
        self.vertical_speed = integrate_gravity(
            self.vertical_speed,
            grounded,
            self.settings.gravity_y,
            self.settings.gravity_scalar,
            dt,
        );
    }

    fn handle_movement<H: PlayerHost + ?Sized>(&mut self, host: &mut H, dt: f32) {
        let move_input = host.input().axis(actions::MOVE);
        let body = host.motor().transform();
        let target = target_velocity(move_input, &body, self.settings.walk_speed);
        self.velocity = approach_velocity(
            self.velocity,
            target,
            move_input,
            self.settings.acceleration,
            self.settings.deceleration,
            dt,
        );
    }

    fn handle_jumping<H: PlayerHost + ?Sized>(&mut self, host: &mut H) {
        if host.input().is_pressed(actions::JUMP) && host.motor().is_grounded() {
            self.vertical_speed = jump_speed(
                self.settings.jump_height,
                self.settings.gravity_y,
                self.settings.gravity_scalar,
            );
        }
    }

    fn apply_velocity<H: PlayerHost + ?Sized>(&mut self, host: &mut H, dt: f32) {
        let motion = self.velocity() * dt;
        host.motor().move_by(motion);
    }

    // --- Interaction ---

    fn interaction_trace<H: PlayerHost + ?Sized>(&mut self, host: &mut H) {
        let Some(ray) = host.camera().map(|camera| camera.viewport_center_ray()) else {
            return;
        };
        let owner = host.owner();
        let range = self.settings.interaction_range;
        let Some(world) = host.world() else {
            return;
        };

        let hit_target = world
            .raycast(&ray, range)
            .and_then(|hit| world.resolve_interactable(hit.entity));

        if hit_target == self.focused {
            return;
        }

        if let Some(previous) = self.focused {
            if let Some(target) = world.interactable_mut(previous) {
                target.set_focus(false);
            }
        }
        if let Some(current) = hit_target {
            if let Some(target) = world.interactable_mut(current) {
                target.set_focus(true);
            }
        }

        log::debug!("Focus {:?} -> {:?}", self.focused, hit_target);
        self.events.push(GameEvent::FocusChanged {
            controller: owner,
            previous: self.focused,
            current: hit_target,
        });
        self.focused = hit_target;
    }

    fn handle_interact<H: PlayerHost + ?Sized>(&mut self, host: &mut H) {
        if !host.input().was_pressed_this_frame(actions::INTERACT) {
            return;
        }
        let Some(focused) = self.focused else {
            return;
        };
        let owner = host.owner();
        let Some(world) = host.world() else {
            return;
        };
        if let Some(target) = world.interactable_mut(focused) {
            target.interact_with();
            self.events.push(GameEvent::Interacted {
                controller: owner,
                target: focused,
            });
        }
    }

    // --- Debug ---

    fn handle_debug<H: PlayerHost + ?Sized>(&mut self, host: &mut H) {
        let heal = host.input().was_pressed_this_frame(actions::HEAL);
        let damage = host.input().was_pressed_this_frame(actions::DAMAGE);
        if !heal && !damage {
            return;
        }

        let causer = Some(host.owner());
        let Some(vitals) = host.vitals() else {
            return;
        };
        if heal {
            vitals.take_healing(self.settings.debug.heal_amount, causer);
        }
        if damage {
            vitals.take_damage(self.settings.debug.damage_amount, causer);
        }
    }

    // --- Look & zoom ---

    fn handle_look<H: PlayerHost + ?Sized>(&mut self, host: &mut H) {
        let look = host.input().axis(actions::LOOK);
        let (yaw_delta, pitch) = look_step(look, self.pitch, &self.settings);
        self.pitch = pitch;
        self.yaw = math::wrap_degrees(self.yaw + yaw_delta);

        if yaw_delta != 0.0 {
            host.motor().rotate_yaw(yaw_delta);
        }
        if let Some(camera) = host.camera() {
            camera.set_local_rotation(pitch_rotation(self.pitch));
        }
    }

    fn handle_zoom<H: PlayerHost + ?Sized>(&mut self, host: &mut H) {
        let pressed = host.input().was_pressed_this_frame(actions::ZOOM);
        let released = host.input().was_released_this_frame(actions::ZOOM);
        let Some(camera) = host.camera() else {
            return;
        };

        let duration = self.settings.zoom_duration;
        if pressed {
            let target = self.settings.zoomed_fov();
            log::debug!("Zoom in to {:.1}", target);
            self.zoom = Some(FovTransition::new(camera.field_of_view(), target, duration));
        }
        if released {
            let target = self.settings.default_fov;
            log::debug!("Zoom out to {:.1}", target);
            self.zoom = Some(FovTransition::new(camera.field_of_view(), target, duration));
        }
    }

    /// Step the live transition, if any. Runs regardless of `can_look`.
    fn advance_zoom<H: PlayerHost + ?Sized>(&mut self, host: &mut H, dt: f32) {
        if self.zoom.is_none() {
            return;
        }
        let Some(camera) = host.camera() else {
            return;
        };
        if let Some(transition) = self.zoom.as_mut() {
            let fov = transition.step(dt);
            camera.set_field_of_view(fov.clamp(MIN_FOV, MAX_FOV));
            if transition.is_finished() {
                self.zoom = None;
            }
        }
    }
}

impl<H: PlayerHost + ?Sized> Behavior<H> for PlayerController {
    fn on_enable(&mut self, host: &mut H) {
        let input = host.input_mut();
        input.enable_set(actions::PLAYER_SET);
        input.enable_set(actions::DEBUG_SET);
    }

    fn on_disable(&mut self, host: &mut H) {
        let input = host.input_mut();
        input.disable_set(actions::PLAYER_SET);
        input.disable_set(actions::DEBUG_SET);
        if self.zoom.take().is_some() {
            log::debug!("Zoom transition cancelled");
        }
    }

    fn update(&mut self, host: &mut H, dt: f64) -> Result<()> {
        let dt = dt as f32;

        if self.can_move {
            self.apply_gravity(host, dt);
            self.handle_movement(host, dt);
            self.handle_jumping(host);
            self.apply_velocity(host, dt);
        }

        if self.can_interact {
            self.interaction_trace(host);
            self.handle_interact(host);
        }

        if self.can_debug {
            self.handle_debug(host);
        }

        Ok(())
    }

    fn late_update(&mut self, host: &mut H, dt: f64) -> Result<()> {
        if self.can_look {
            self.handle_look(host);
            self.handle_zoom(host);
        }
        self.advance_zoom(host, dt as f32);
        Ok(())
    }

    fn name(&self) -> &str {
        "player_controller"
    }
}
