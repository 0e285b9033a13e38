//! Names of the default action sets and actions

/// Movement, look, and interaction actions
pub const PLAYER_SET: &str = "player";
/// Developer shortcuts
pub const DEBUG_SET: &str = "debug";

pub const LOOK: &str = "look";
pub const MOVE: &str = "move";
pub const JUMP: &str = "jump";
pub const ZOOM: &str = "zoom";
pub const INTERACT: &str = "interact";

pub const HEAL: &str = "heal";
pub const DAMAGE: &str = "damage";
