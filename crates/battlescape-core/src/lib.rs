//! **battlescape-core** — foundational types for tactical battlescape maps.
//!
//! This crate provides the value types shared by the pathfinding engine and
//! the tile map: 3D tile positions, grid bounds, the ten discrete movement
//! directions and the movement modes that select terrain cost rules.

pub mod direction;
pub mod geom;

pub use direction::{Direction, MovementMode};
pub use geom::{Bounds, ParsePositionError, Position};
