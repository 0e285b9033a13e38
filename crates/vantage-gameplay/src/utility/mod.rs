//! Small transform behaviors attached to scene entities

mod lifetime;
mod look_at;
mod simple_move;
mod simple_rotate;

pub use lifetime::{Lifetime, LifetimeSettings};
pub use look_at::{LookAt, LookAtSettings};
pub use simple_move::{SimpleMove, SimpleMoveSettings};
pub use simple_rotate::{SimpleRotate, SimpleRotateSettings};
