//! Vantage Runtime - Frame loop infrastructure
//!
//! Provides the pieces a host frame loop needs to drive gameplay behaviors:
//! - `GameClock` - per-frame delta time, wall-clock or manually stepped
//! - `InputState` - named actions grouped into sets, with press/release edges
//! - `GameEvent` / `EventBus` - typed event queue drained by the host
//! - `Behavior` - trait for components ticked once per frame

pub mod actions;
mod clock;
mod event;
mod event_bus;
mod input;
mod system;

pub use clock::GameClock;
pub use event::{GameEvent, VitalsEvent};
pub use event_bus::EventBus;
pub use input::{ActionKind, InputState};
pub use system::Behavior;
