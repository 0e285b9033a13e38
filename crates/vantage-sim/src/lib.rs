//! Vantage Sim - Headless sandbox host
//!
//! Runs the gameplay behaviors against an in-memory scene:
//! - `SandboxWorld` - hecs world with names, parent links, and box colliders
//! - `Sandbox` - implements the gameplay host traits over the world
//! - `Scenario` - TOML scene plus a frame-ranged input timeline
//! - `Runner` - the frame loop, producing a `RunReport`

pub mod body;
pub mod report;
pub mod runner;
pub mod sandbox;
pub mod scenario;
pub mod world;

pub use body::{BodySettings, CrosshairImage, FirstPersonBody};
pub use report::RunReport;
pub use runner::Runner;
pub use sandbox::Sandbox;
pub use scenario::Scenario;
pub use world::{Collider, SandboxWorld};
