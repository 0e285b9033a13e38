//! Vantage Gameplay - Player-facing behaviors
//!
//! Everything here talks to the engine only through the traits in [`host`]:
//! - `PlayerController` - first-person movement, look, zoom, interaction trace
//! - `VitalsComponent` - health with damage, healing, and death events
//! - `CrosshairController` - speed-reactive crosshair sizing
//! - Utility behaviors - `Lifetime`, `LookAt`, `SimpleMove`, `SimpleRotate`

pub mod crosshair;
pub mod host;
pub mod interaction;
pub mod player;
pub mod utility;
pub mod vitals;
pub mod zoom;

pub use crosshair::{CrosshairController, CrosshairSettings};
pub use host::{
    CameraRig, CharacterMotor, CrosshairHost, CrosshairView, EntityHost, InteractionWorld,
    PlayerHost,
};
pub use interaction::{Interactable, InteractableInfo};
pub use player::{PlayerController, PlayerSettings};
pub use vitals::{Vitals, VitalsComponent, VitalsSettings};
pub use zoom::FovTransition;
