//! Vantage Core - Foundational types for the Vantage gameplay layer
//!
//! This crate provides the core types that all other Vantage crates depend on:
//! - `EntityId` - Stable, non-owning entity identifiers
//! - `Transform`, `Ray`, `RayHit`, `Color` - Spatial types over `glam`
//! - Interpolation helpers shared by the frame-driven behaviors
//! - Error types and Result alias

mod error;
mod id;
pub mod math;
mod types;

pub use error::{Result, VantageError};
pub use glam::{EulerRot, Quat, Vec2, Vec3};
pub use id::EntityId;
pub use types::{look_rotation, Color, Ray, RayHit, Transform};
