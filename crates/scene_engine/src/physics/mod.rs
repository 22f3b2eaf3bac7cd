//! Physics bodies
//!
//! Only the body shapes attached to objects live here. Collision resolution
//! is performed by the game's movement code against these boxes.

pub mod body;

pub use body::PhysicsBody;
