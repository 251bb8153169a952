//! Geometry primitives: [`Position`] and [`Bounds`].
//!
//! The battlescape is a stack of levels. X grows east, Y grows south and Z
//! grows upward, one unit per tile.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A 3D integer tile coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a position shifted by (dx, dy, dz).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_sq(self, other: Position) -> i32 {
        let d = other - self;
        d.x * d.x + d.y * d.y + d.z * d.z
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Position) -> f64 {
        f64::from(self.distance_sq(other)).sqrt()
    }
}

// --- trait impls for Position ---

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.z
            .cmp(&other.z)
            .then(self.y.cmp(&other.y))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Position {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Position {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Position {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<i32> for Position {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul for Position {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Div<i32> for Position {
    type Output = Self;
    #[inline]
    fn div(self, rhs: i32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Div for Position {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

/// Error returned when a string is not of the form `x,y,z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePositionError {
    input: String,
}

impl fmt::Display for ParsePositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid position \u{201c}{}\u{201d}, expected x,y,z", self.input)
    }
}

impl std::error::Error for ParsePositionError {}

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parse `"x,y,z"`. Whitespace around components is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError {
            input: s.to_string(),
        };
        let mut parts = s.split(',').map(|c| c.trim().parse::<i32>());
        let (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(err());
        };
        Ok(Self::new(x, y, z))
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// A half-open box \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Position,
    pub max: Position,
}

impl Bounds {
    /// A box of `width × length × height` tiles anchored at the origin.
    #[inline]
    pub fn new(width: i32, length: i32, height: i32) -> Self {
        Self::from_corners(Position::ZERO, Position::new(width, length, height))
    }

    /// Create a box from two corners, canonicalized so that `min` ≤ `max`
    /// on each axis.
    #[inline]
    pub fn from_corners(a: Position, b: Position) -> Self {
        Self {
            min: Position::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Position::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Extent along X.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Extent along Y.
    #[inline]
    pub fn length(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Number of levels.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.z - self.min.z
    }

    /// Whether the box has zero or negative volume.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y || self.min.z >= self.max.z
    }

    /// Total number of tiles in the box.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.width() as usize * self.length() as usize * self.height() as usize
    }

    /// Whether `p` is inside the half-open box.
    #[inline]
    pub fn contains(self, p: Position) -> bool {
        p.x >= self.min.x
            && p.x < self.max.x
            && p.y >= self.min.y
            && p.y < self.max.y
            && p.z >= self.min.z
            && p.z < self.max.z
    }

    /// Flat index of `p` (x fastest, then y, then z), or `None` if outside.
    #[inline]
    pub fn index(self, p: Position) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let w = self.width() as usize;
        let l = self.length() as usize;
        let x = (p.x - self.min.x) as usize;
        let y = (p.y - self.min.y) as usize;
        let z = (p.z - self.min.z) as usize;
        Some((z * l + y) * w + x)
    }

    /// Inverse of [`index`](Self::index). `idx` must be below `len()`.
    #[inline]
    pub fn position(self, idx: usize) -> Position {
        let w = self.width() as usize;
        let l = self.length() as usize;
        let x = (idx % w) as i32 + self.min.x;
        let y = ((idx / w) % l) as i32 + self.min.y;
        let z = (idx / (w * l)) as i32 + self.min.z;
        Position::new(x, y, z)
    }

    /// Iterate over every position, in index order.
    pub fn iter(self) -> impl Iterator<Item = Position> {
        (0..self.len()).map(move |i| self.position(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn position_arithmetic() {
        let a = Position::new(1, 2, 3);
        let b = Position::new(4, 6, 8);
        assert_eq!(a + b, Position::new(5, 8, 11));
        assert_eq!(b - a, Position::new(3, 4, 5));
        assert_eq!(a * 2, Position::new(2, 4, 6));
        assert_eq!(b / 2, Position::new(2, 3, 4));
        assert_eq!(a * b, Position::new(4, 12, 24));
        assert_eq!(b / a, Position::new(4, 3, 2));

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn distance() {
        let a = Position::ZERO;
        let b = Position::new(4, 4, 0);
        assert_eq!(a.distance_sq(b), 32);
        assert!((a.distance(b) - 32f64.sqrt()).abs() < 1e-9);
        assert_eq!(b.distance_sq(a), 32);
    }

    #[test]
    fn display_and_parse() {
        let p = Position::new(3, -1, 2);
        assert_eq!(p.to_string(), "(3, -1, 2)");
        assert_eq!("3,-1,2".parse::<Position>(), Ok(p));
        assert_eq!(" 3 , -1 ,2 ".parse::<Position>(), Ok(p));
        assert!("3,1".parse::<Position>().is_err());
        assert!("3,1,2,4".parse::<Position>().is_err());
        assert!("a,b,c".parse::<Position>().is_err());
    }

    #[test]
    fn positions_hash_by_value() {
        let mut set = HashSet::new();
        set.insert(Position::new(1, 1, 1));
        assert!(set.contains(&Position::new(1, 1, 1)));
        assert!(!set.contains(&Position::new(1, 1, 0)));
    }

    #[test]
    fn bounds_index_round_trip() {
        let b = Bounds::new(3, 4, 2);
        assert_eq!(b.len(), 24);
        for (i, p) in b.iter().enumerate() {
            assert_eq!(b.index(p), Some(i));
        }
        assert_eq!(b.index(Position::new(3, 0, 0)), None);
        assert_eq!(b.index(Position::new(0, 0, -1)), None);
        assert_eq!(b.position(3), Position::new(0, 1, 0));
        assert_eq!(b.position(12), Position::new(0, 0, 1));
    }

    #[test]
    fn bounds_from_corners_canonicalizes() {
        let b = Bounds::from_corners(Position::new(5, 1, 2), Position::new(1, 5, 0));
        assert_eq!(b.min, Position::new(1, 1, 0));
        assert_eq!(b.max, Position::new(5, 5, 2));
        assert!(b.contains(Position::new(1, 1, 0)));
        assert!(!b.contains(Position::new(5, 1, 0)));
    }

    #[test]
    fn empty_bounds() {
        let b = Bounds::new(4, 4, 0);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(b.iter().count(), 0);
    }
}
