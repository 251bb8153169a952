//! Tactical pathfinding over layered battlescape grids.
//!
//! The engine is an A\* search built from three pieces:
//!
//! - [`PathfindingNode`]s, one per touched tile, held in a reusable
//!   [`NodePool`];
//! - an [`OpenSet`] priority queue with lazy deletion of superseded entries;
//! - a [`Pathfinder`] session that runs the search loop and asks a
//!   [`TerrainCost`] implementation what each move costs.
//!
//! Terrain rules live outside this crate. Any
//! `Fn(Position, Direction, MovementMode) -> Option<Step>` closure works as
//! a terrain.
//!
//! # Example
//!
//! ```
//! use battlescape_core::{Bounds, Direction, MovementMode, Position};
//! use battlescape_paths::{PathRequest, Pathfinder, Step};
//!
//! let bounds = Bounds::new(5, 5, 1);
//! let terrain = move |from: Position, dir: Direction, _: MovementMode| {
//!     let to = from + dir.offset();
//!     (!dir.is_vertical() && !dir.is_diagonal() && bounds.contains(to))
//!         .then_some(Step::new(4, to))
//! };
//!
//! let mut pf = Pathfinder::new(bounds);
//! let req = PathRequest::new(Position::new(0, 0, 0), Position::new(4, 4, 0));
//! let path = pf.find_path(&terrain, &req).unwrap().unwrap();
//! assert_eq!(path.len(), 8);
//! assert_eq!(path.total_tu(), 32);
//! ```

mod config;
mod error;
mod node;
mod open_set;
mod pathfinder;
mod traits;

pub use config::PathfinderConfig;
pub use error::{Endpoint, PathError};
pub use node::{HEURISTIC_SCALE, NodeId, NodePool, PathfindingNode};
pub use open_set::{EntryHandle, OpenSet};
pub use pathfinder::{Path, PathRequest, Pathfinder, Reachable, SearchStats, SearchStatus};
pub use traits::{Step, TerrainCost};
