//! Battle maps: layered tile grids and the movement rules over them.
//!
//! [`BattleMap`] implements [`TerrainCost`](battlescape_paths::TerrainCost),
//! so it can be handed straight to a
//! [`Pathfinder`](battlescape_paths::Pathfinder).

pub mod layout;
mod map;
pub mod tile;

pub use layout::MapError;
pub use map::BattleMap;
pub use tile::{AIR_TU, DEEP_TU, FLOOR_TU, ROUGH_TU, Ground, TileKind, VERTICAL_TU};
