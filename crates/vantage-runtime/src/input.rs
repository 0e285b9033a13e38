//! Action-based input state
//!
//! The host translates device events into named actions; gameplay code only
//! ever asks about actions. Actions belong to sets that are enabled and
//! disabled as a unit, mirroring how a component acquires its bindings when
//! it is enabled and releases them when it is disabled.

use crate::actions;
use glam::Vec2;
use std::collections::HashMap;

/// How an action reports its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Held/released with press and release edges
    Button,
    /// Persistent 2D value (stick, WASD composite)
    Axis,
    /// 2D value accumulated over one frame and cleared at `end_frame` (mouse motion)
    Delta,
}

#[derive(Debug, Clone)]
struct Action {
    kind: ActionKind,
    set: String,
    value: Vec2,
    down: bool,
    pressed_this_frame: bool,
    released_this_frame: bool,
}

impl Action {
    fn new(kind: ActionKind, set: &str) -> Self {
        Self {
            kind,
            set: set.to_string(),
            value: Vec2::ZERO,
            down: false,
            pressed_this_frame: false,
            released_this_frame: false,
        }
    }

    fn clear(&mut self) {
        self.value = Vec2::ZERO;
        self.down = false;
        self.pressed_this_frame = false;
        self.released_this_frame = false;
    }
}

/// Tracks action values and per-frame edges
pub struct InputState {
    actions: HashMap<String, Action>,
    /// Action set name -> enabled
    sets: HashMap<String, bool>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Create an input state with the default `player` and `debug` sets, both disabled
    pub fn new() -> Self {
        let mut input = Self::empty();
        input.register(actions::PLAYER_SET, actions::LOOK, ActionKind::Delta);
        input.register(actions::PLAYER_SET, actions::MOVE, ActionKind::Axis);
        input.register(actions::PLAYER_SET, actions::JUMP, ActionKind::Button);
        input.register(actions::PLAYER_SET, actions::ZOOM, ActionKind::Button);
        input.register(actions::PLAYER_SET, actions::INTERACT, ActionKind::Button);
        input.register(actions::DEBUG_SET, actions::HEAL, ActionKind::Button);
        input.register(actions::DEBUG_SET, actions::DAMAGE, ActionKind::Button);
        input
    }

    /// Create an input state with no actions
    pub fn empty() -> Self {
        Self {
            actions: HashMap::new(),
            sets: HashMap::new(),
        }
    }

    /// Kind of a registered action, whether or not its set is enabled
    pub fn kind(&self, action: &str) -> Option<ActionKind> {
        self.actions.get(action).map(|a| a.kind)
    }

    /// Register an action in a set. Re-registering replaces the action.
    pub fn register(&mut self, set: &str, action: impl Into<String>, kind: ActionKind) {
        self.sets.entry(set.to_string()).or_insert(false);
        self.actions.insert(action.into(), Action::new(kind, set));
    }

    pub fn enable_set(&mut self, set: &str) {
        match self.sets.get_mut(set) {
            Some(enabled) => *enabled = true,
            None => log::warn!("Cannot enable unknown action set '{}'", set),
        }
    }

    /// Disable a set and drop any held state, so nothing stays latched
    pub fn disable_set(&mut self, set: &str) {
        if let Some(enabled) = self.sets.get_mut(set) {
            *enabled = false;
        }
        for action in self.actions.values_mut().filter(|a| a.set == set) {
            action.clear();
        }
    }

    pub fn is_set_enabled(&self, set: &str) -> bool {
        self.sets.get(set).copied().unwrap_or(false)
    }

    /// Registered action names, sorted
    pub fn action_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn live_mut(&mut self, action: &str) -> Option<&mut Action> {
        let Some(slot) = self.actions.get_mut(action) else {
            log::warn!("Input for unknown action '{}'", action);
            return None;
        };
        if self.sets.get(&slot.set).copied().unwrap_or(false) {
            Some(slot)
        } else {
            None
        }
    }

    fn live(&self, action: &str) -> Option<&Action> {
        self.actions
            .get(action)
            .filter(|a| self.sets.get(&a.set).copied().unwrap_or(false))
    }

    // --- Host-side feeding ---

    /// Set a 2D action value. Delta actions accumulate until `end_frame`.
    pub fn set_axis(&mut self, action: &str, value: Vec2) {
        if let Some(slot) = self.live_mut(action) {
            match slot.kind {
                ActionKind::Delta => slot.value += value,
                _ => slot.value = value,
            }
        }
    }

    pub fn press(&mut self, action: &str) {
        if let Some(slot) = self.live_mut(action) {
            if !slot.down {
                slot.pressed_this_frame = true;
            }
            slot.down = true;
        }
    }

    pub fn release(&mut self, action: &str) {
        if let Some(slot) = self.live_mut(action) {
            if slot.down {
                slot.released_this_frame = true;
            }
            slot.down = false;
        }
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        for action in self.actions.values_mut() {
            action.pressed_this_frame = false;
            action.released_this_frame = false;
            if action.kind == ActionKind::Delta {
                action.value = Vec2::ZERO;
            }
        }
    }

    // --- Query methods ---

    /// Current 2D value; zero for unknown or disabled actions
    pub fn axis(&self, action: &str) -> Vec2 {
        self.live(action).map(|a| a.value).unwrap_or(Vec2::ZERO)
    }

    /// Is the action currently held?
    pub fn is_pressed(&self, action: &str) -> bool {
        self.live(action).map(|a| a.down).unwrap_or(false)
    }

    /// Did the action go down this frame?
    pub fn was_pressed_this_frame(&self, action: &str) -> bool {
        self.live(action)
            .map(|a| a.pressed_this_frame)
            .unwrap_or(false)
    }

    /// Did the action come up this frame?
    pub fn was_released_this_frame(&self, action: &str) -> bool {
        self.live(action)
            .map(|a| a.released_this_frame)
            .unwrap_or(false)
    }
}
