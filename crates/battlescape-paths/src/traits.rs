use battlescape_core::{Direction, MovementMode, Position};

/// Outcome of a single passable move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Time units spent on the move. Must not be negative.
    pub tu: i32,
    /// Tile the move ends on. Usually `from + dir.offset()`, but terrain may
    /// redirect it (stairs, falling).
    pub destination: Position,
}

impl Step {
    #[inline]
    pub const fn new(tu: i32, destination: Position) -> Self {
        Self { tu, destination }
    }
}

/// Movement cost rules of a map, consulted once per expanded edge.
///
/// For the search to return shortest paths, every non-missile step must
/// cost at least [`HEURISTIC_SCALE`](crate::HEURISTIC_SCALE) time units
/// per tile of straight-line distance it covers.
pub trait TerrainCost {
    /// Cost of moving from `from` in direction `dir`, or `None` if the move
    /// is impossible in this movement mode.
    fn step(&self, from: Position, dir: Direction, mode: MovementMode) -> Option<Step>;
}

impl<F> TerrainCost for F
where
    F: Fn(Position, Direction, MovementMode) -> Option<Step>,
{
    #[inline]
    fn step(&self, from: Position, dir: Direction, mode: MovementMode) -> Option<Step> {
        self(from, dir, mode)
    }
}
