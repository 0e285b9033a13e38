//! Frame loop for headless scenario runs
//!
//! Each frame: advance the clock, feed the input timeline, run the player's
//! `update`, the crosshair, and the utility behaviors, then the player's
//! `late_update`. Events are drained last, which is also when requested
//! destruction happens.

use crate::report::{FocusRecord, InteractionRecord, RunReport};
use crate::sandbox::Sandbox;
use crate::scenario::Scenario;
use vantage_core::{EntityId, Result, Vec2};
use vantage_gameplay::{CharacterMotor, CrosshairController, PlayerController};
use vantage_runtime::{actions, Behavior, GameClock, GameEvent, VitalsEvent};

pub struct Runner {
    scenario: Scenario,
    sandbox: Sandbox,
    player: PlayerController,
    crosshair: CrosshairController,
    clock: GameClock,
    /// Buttons held by the timeline on the previous frame
    held: Vec<String>,
    report: RunReport,
}

impl Runner {
    pub fn new(scenario: Scenario) -> Result<Self> {
        let mut sandbox = Sandbox::new(&scenario.body, scenario.vitals.as_ref())?;
        sandbox.spawn_entities(&scenario.entities)?;

        let mut player = PlayerController::new(scenario.player.clone());
        player.on_enable(&mut sandbox);
        player.start(&mut sandbox);

        let mut crosshair = CrosshairController::new(scenario.crosshair.clone());
        crosshair.awake(sandbox.crosshair_mut());

        let report = RunReport {
            scenario: scenario.scenario.name.clone(),
            ..RunReport::default()
        };
        log::info!(
            "Scenario '{}': {} frames at {:.4}s",
            scenario.scenario.name,
            scenario.scenario.frames,
            scenario.scenario.dt
        );

        Ok(Self {
            scenario,
            sandbox,
            player,
            crosshair,
            clock: GameClock::new(),
            held: Vec::new(),
            report,
        })
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    /// Frames advanced so far
    pub fn frame(&self) -> u64 {
        self.clock.frame
    }

    /// Run the scenario's configured number of frames and report
    pub fn run(mut self) -> Result<RunReport> {
        let frames = self.scenario.scenario.frames;
        self.run_frames(frames)?;
        self.player.on_disable(&mut self.sandbox);
        Ok(self.report())
    }

    pub fn run_frames(&mut self, frames: u64) -> Result<()> {
        for _ in 0..frames {
            self.step()?;
        }
        Ok(())
    }

    /// Advance one frame
    pub fn step(&mut self) -> Result<()> {
        let frame = self.clock.frame;
        self.clock.advance(self.scenario.scenario.dt);
        let dt = self.clock.delta_time;

        self.feed_input(frame);

        self.player.update(&mut self.sandbox, dt)?;
        self.sandbox.sync_player()?;

        self.sandbox.set_player_velocity(Some(self.player.velocity()));
        self.crosshair.update(&mut self.sandbox, dt)?;

        self.sandbox.update_utilities(dt)?;

        self.player.late_update(&mut self.sandbox, dt)?;
        self.sandbox.sync_player()?;

        self.handle_events(frame)?;
        self.sandbox.input_mut().end_frame();
        Ok(())
    }

    fn feed_input(&mut self, frame: u64) {
        let movement = self.scenario.move_at(frame);
        let look = self.scenario.look_delta_at(frame);
        let held: Vec<String> = self
            .scenario
            .held_at(frame)
            .into_iter()
            .map(String::from)
            .collect();

        let input = self.sandbox.input_mut();
        input.set_axis(actions::MOVE, movement);
        if look != Vec2::ZERO {
            input.set_axis(actions::LOOK, look);
        }
        for button in self.held.iter().filter(|b| !held.contains(b)) {
            input.release(button);
        }
        for button in held.iter().filter(|b| !self.held.contains(b)) {
            input.press(button);
        }
        self.held = held;
    }

    fn handle_events(&mut self, frame: u64) -> Result<()> {
        let mut events = self.player.drain_events();
        events.extend(self.sandbox.drain_events());

        for event in events {
            match event {
                GameEvent::FocusChanged { current, .. } => {
                    let target = current.map(|id| self.name_of(id));
                    self.report.focus_changes.push(FocusRecord { frame, target });
                }
                GameEvent::Interacted { target, .. } => {
                    let target = self.name_of(target);
                    log::info!("Frame {}: interacted with {}", frame, target);
                    self.report
                        .interactions
                        .push(InteractionRecord { frame, target });
                }
                GameEvent::Vitals { event, .. } => match event {
                    VitalsEvent::Damaged { amount } => self.report.damage_taken += amount,
                    VitalsEvent::Healed { amount } => self.report.healing_received += amount,
                    VitalsEvent::Death => {
                        self.report.died_at.get_or_insert(frame);
                    }
                    VitalsEvent::HealthUpdated { .. } => {}
                },
                GameEvent::DestroyRequested(id) => self.destroy(id)?,
            }
        }
        Ok(())
    }

    fn destroy(&mut self, id: EntityId) -> Result<()> {
        if !self.sandbox.world().contains(id) {
            return Ok(());
        }
        let names: Vec<String> = {
            let world = self.sandbox.world();
            let mut doomed = vec![id];
            let mut i = 0;
            while i < doomed.len() {
                doomed.extend(world.children(doomed[i]));
                i += 1;
            }
            doomed.into_iter().map(|id| self.name_of(id)).collect()
        };
        self.sandbox.world_mut().despawn(id)?;
        log::info!("Destroyed {}", names.join(", "));
        self.report.destroyed.extend(names);
        Ok(())
    }

    fn name_of(&self, id: EntityId) -> String {
        self.sandbox
            .world()
            .get_name(id)
            .map_or_else(|| id.to_string(), String::from)
    }

    /// Snapshot of the run so far
    pub fn report(&self) -> RunReport {
        let body = self.sandbox.body();
        RunReport {
            frames: self.clock.frame,
            elapsed: self.clock.total_time,
            final_position: body.transform().position.to_array(),
            yaw: self.player.yaw(),
            pitch: self.player.pitch(),
            grounded: body.is_grounded(),
            health: self.sandbox.player_health(),
            focused: self.player.focused().map(|id| self.name_of(id)),
            field_of_view: body.lens().map(|lens| lens.field_of_view),
            crosshair_size: self.sandbox.crosshair().size.x,
            ..self.report.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = r#"
        [scenario]
        name = "corridor"
        frames = 120

        [player.debug]
        enabled = true

        [vitals]
        max_health = 100.0

        [[entity]]
        name = "door"
        position = [0.0, 1.6, -2.5]
        collider = [0.5, 1.0, 0.1]
        interactable = { prompt = "Open", name = "Door" }

        [[entity]]
        name = "spark"
        position = [5.0, 0.0, 0.0]
        lifetime = { lifetime = 1.0 }
        simple_move = { direction = [0.0, 1.0, 0.0], speed = 1.0 }

        [[input]]
        start = 10
        end = 12
        hold = ["interact"]

        [[input]]
        start = 20
        end = 21
        hold = ["damage"]
    "#;

    fn runner(source: &str) -> Runner {
        Runner::new(Scenario::parse(source).unwrap()).unwrap()
    }

    #[test]
    fn test_setup_locks_cursor_and_paints_crosshair() {
        let runner = runner(CORRIDOR);
        assert!(runner.sandbox().is_cursor_locked());
        assert_eq!(runner.sandbox().crosshair().size.x, 96.0);
        assert_eq!(runner.frame(), 0);
    }

    #[test]
    fn test_corridor_run() {
        let report = runner(CORRIDOR).run().unwrap();
        assert_eq!(report.frames, 120);
        assert!((report.elapsed - 2.0).abs() < 1e-9);

        // Door sits in front of the eye from the first frame
        assert_eq!(report.focus_changes.len(), 1);
        assert_eq!(report.focus_changes[0].frame, 0);
        assert_eq!(report.focused.as_deref(), Some("door"));

        // One press, held for two frames
        assert_eq!(report.interactions.len(), 1);
        assert_eq!(report.interactions[0].frame, 10);

        assert_eq!(report.health, Some(95.0));
        assert_eq!(report.damage_taken, 5.0);
        assert!(report.died_at.is_none());

        assert_eq!(report.destroyed, vec!["spark".to_string()]);
        assert_eq!(report.field_of_view, Some(60.0));
        assert!(report.grounded);
    }

    #[test]
    fn test_walk_and_turn() {
        let report = runner(
            r#"
            [scenario]
            frames = 60

            [[input]]
            start = 0
            end = 60
            move = [0.0, 1.0]

            [[input]]
            start = 0
            end = 1
            look = [360.0, 0.0]
            "#,
        )
        .run()
        .unwrap();

        // Turned 90 degrees right on the first frame, then walked along +X
        assert!((report.yaw - 90.0).abs() < 1e-3);
        let [x, y, z] = report.final_position;
        assert!(x > 2.5, "x = {}", x);
        assert!(z.abs() < 0.2, "z = {}", z);
        assert_eq!(y, 0.0);
        assert!(report.crosshair_size > 96.0);
    }

    #[test]
    fn test_zoom_held_then_released() {
        let mut runner = runner(
            r#"
            [[input]]
            start = 0
            end = 30
            hold = ["zoom"]
            "#,
        );
        runner.run_frames(30).unwrap();
        assert_eq!(runner.report().field_of_view, Some(30.0));
        runner.run_frames(30).unwrap();
        assert_eq!(runner.report().field_of_view, Some(60.0));
    }

    #[test]
    fn test_jump_leaves_and_returns_to_floor() {
        let mut runner = runner(
            r#"
            [[input]]
            start = 0
            end = 1
            hold = ["jump"]
            "#,
        );
        runner.run_frames(10).unwrap();
        assert!(!runner.report().grounded);
        assert!(runner.report().final_position[1] > 0.0);
        runner.run_frames(110).unwrap();
        assert!(runner.report().grounded);
    }

    #[test]
    fn test_debug_disabled_by_settings() {
        let report = runner(
            r#"
            [player.debug]
            enabled = false

            [vitals]

            [[input]]
            start = 0
            end = 1
            hold = ["damage"]
            "#,
        )
        .run()
        .unwrap();
        assert_eq!(report.health, Some(100.0));
    }

    #[test]
    fn test_capability_flags_freeze_player() {
        let mut runner = runner(
            r#"
            [[input]]
            start = 0
            end = 30
            move = [0.0, 1.0]
            look = [10.0, 10.0]
            "#,
        );
        runner.player_mut().set_can_move(false);
        runner.player_mut().set_can_look(false);
        runner.run_frames(30).unwrap();
        let report = runner.report();
        assert_eq!(report.final_position, [0.0, 0.0, 0.0]);
        assert_eq!(report.yaw, 0.0);
    }

    #[test]
    fn test_destroying_parent_takes_children() {
        let report = runner(
            r#"
            [[entity]]
            name = "cart"
            lifetime = { lifetime = 1.0 }

            [[entity]]
            name = "wheel"
            parent = "cart"
            "#,
        )
        .run()
        .unwrap();
        assert_eq!(report.destroyed, vec!["cart".to_string(), "wheel".to_string()]);
    }

    #[test]
    fn test_bundled_corridor_scenario() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenarios/corridor.toml");
        let scenario = Scenario::load(path).unwrap();
        let report = Runner::new(scenario).unwrap().run().unwrap();

        assert_eq!(report.interactions.len(), 1);
        assert_eq!(report.interactions[0].target, "door");
        assert_eq!(report.focused.as_deref(), Some("door"));
        assert_eq!(report.health, Some(80.0));
        assert_eq!(report.destroyed, vec!["ember".to_string()]);
        assert_eq!(report.field_of_view, Some(60.0));
    }
}
