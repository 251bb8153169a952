//! Discrete movement directions and movement modes.

use std::fmt;

use crate::geom::Position;

/// One of the ten discrete moves a unit can make from a tile.
///
/// The eight lateral directions are numbered clockwise from north, followed
/// by the two vertical moves. The numbering is stable and can be stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
    Up = 8,
    Down = 9,
}

impl Direction {
    /// Every direction, in index order.
    pub const ALL: [Direction; 10] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::Up,
        Direction::Down,
    ];

    /// The eight directions that stay on the same level.
    pub const LATERAL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Stable numeric index (0–9).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction with the given index, or `None` if `i > 9`.
    #[inline]
    pub fn from_index(i: usize) -> Option<Direction> {
        Self::ALL.get(i).copied()
    }

    /// Unit offset of one move in this direction.
    pub const fn offset(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1, 0),
            Direction::NorthEast => Position::new(1, -1, 0),
            Direction::East => Position::new(1, 0, 0),
            Direction::SouthEast => Position::new(1, 1, 0),
            Direction::South => Position::new(0, 1, 0),
            Direction::SouthWest => Position::new(-1, 1, 0),
            Direction::West => Position::new(-1, 0, 0),
            Direction::NorthWest => Position::new(-1, -1, 0),
            Direction::Up => Position::new(0, 0, 1),
            Direction::Down => Position::new(0, 0, -1),
        }
    }

    /// Direction whose offset is exactly `offset`, if any.
    pub fn from_offset(offset: Position) -> Option<Direction> {
        Self::ALL.into_iter().find(|d| d.offset() == offset)
    }

    /// Whether this is one of the four diagonal lateral moves.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::SouthEast | Direction::SouthWest | Direction::NorthWest
        )
    }

    /// Whether this is `Up` or `Down`.
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// The direction pointing back.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
            Direction::Up => "Up",
            Direction::Down => "Down",
        };
        f.write_str(s)
    }
}

/// How the moving thing travels. Terrain cost rules depend on it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementMode {
    /// Ground movement: needs a floor, climbs only on gravlifts.
    #[default]
    Walk,
    /// Airborne movement: may cross open air and change levels freely.
    Fly,
    /// A guided projectile trace. Spends no time units.
    Missile,
}

impl MovementMode {
    #[inline]
    pub const fn is_missile(self) -> bool {
        matches!(self, MovementMode::Missile)
    }

    /// Candidate directions to try from any tile. The terrain decides which
    /// of them are passable.
    #[inline]
    pub const fn directions(self) -> &'static [Direction] {
        &Direction::ALL
    }
}

impl fmt::Display for MovementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementMode::Walk => f.write_str("walk"),
            MovementMode::Fly => f.write_str("fly"),
            MovementMode::Missile => f.write_str("missile"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_stable() {
        for (i, d) in Direction::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
            assert_eq!(Direction::from_index(i), Some(*d));
        }
        assert_eq!(Direction::from_index(10), None);
    }

    #[test]
    fn offsets_round_trip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_offset(d.offset()), Some(d));
        }
        assert_eq!(Direction::from_offset(Position::new(2, 0, 0)), None);
        assert_eq!(Direction::from_offset(Position::ZERO), None);
    }

    #[test]
    fn opposite_cancels_offset() {
        for d in Direction::ALL {
            assert_eq!(d.offset() + d.opposite().offset(), Position::ZERO);
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn classification() {
        let diagonals = Direction::ALL.iter().filter(|d| d.is_diagonal()).count();
        let vertical = Direction::ALL.iter().filter(|d| d.is_vertical()).count();
        assert_eq!(diagonals, 4);
        assert_eq!(vertical, 2);
        assert!(Direction::LATERAL.iter().all(|d| !d.is_vertical()));
        assert!(!Direction::North.is_diagonal());
    }

    #[test]
    fn movement_modes() {
        assert!(MovementMode::Missile.is_missile());
        assert!(!MovementMode::Fly.is_missile());
        assert_eq!(MovementMode::default(), MovementMode::Walk);
        assert_eq!(MovementMode::Walk.directions().len(), 10);
    }
}
