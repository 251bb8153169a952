use std::fmt;

use battlescape_core::{Bounds, Direction, MovementMode, Position};
use battlescape_paths::{Step, TerrainCost};

use crate::layout::{self, MapError};
use crate::tile::{AIR_TU, TileKind, VERTICAL_TU};

/// A layered grid of tiles with battlescape movement rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleMap {
    bounds: Bounds,
    tiles: Vec<TileKind>,
}

impl BattleMap {
    /// A map of the given size with every tile set to `kind`.
    pub fn filled(bounds: Bounds, kind: TileKind) -> Self {
        Self {
            bounds,
            tiles: vec![kind; bounds.len()],
        }
    }

    /// Build a map from a text layout. See [`crate::layout`] for the format.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        let (bounds, tiles) = layout::parse(s)?;
        log::debug!(
            "parsed {}x{}x{} map",
            bounds.width(),
            bounds.length(),
            bounds.height()
        );
        Ok(Self { bounds, tiles })
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Tile at `pos`, or `None` if out of bounds.
    #[inline]
    pub fn tile(&self, pos: Position) -> Option<TileKind> {
        self.bounds.index(pos).map(|i| self.tiles[i])
    }

    /// Replace the tile at `pos`. Returns `false` if `pos` is out of bounds.
    pub fn set_tile(&mut self, pos: Position, kind: TileKind) -> bool {
        match self.bounds.index(pos) {
            Some(i) => {
                self.tiles[i] = kind;
                true
            }
            None => false,
        }
    }

    /// Draw level `z` as text, letting `mark` override the glyph of any
    /// tile. Returns an empty string for a level outside the map.
    pub fn render_level(&self, z: i32, mark: impl Fn(Position) -> Option<char>) -> String {
        let mut out = String::new();
        if z < self.bounds.min.z || z >= self.bounds.max.z {
            return out;
        }
        for y in self.bounds.min.y..self.bounds.max.y {
            for x in self.bounds.min.x..self.bounds.max.x {
                let p = Position::new(x, y, z);
                let ch = match mark(p) {
                    Some(ch) => ch,
                    None => self.tile(p).map_or(' ', TileKind::glyph),
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }

    fn is_wall(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(TileKind::is_wall)
    }

    /// Whether a diagonal move from `from` squeezes past a wall corner.
    fn cuts_corner(&self, from: Position, dir: Direction) -> bool {
        let d = dir.offset();
        self.is_wall(from.shift(d.x, 0, 0)) || self.is_wall(from.shift(0, d.y, 0))
    }

    fn vertical_tu(
        here: TileKind,
        there: TileKind,
        dir: Direction,
        mode: MovementMode,
    ) -> Option<i32> {
        let open = match mode {
            MovementMode::Walk => here == TileKind::Gravlift && there == TileKind::Gravlift,
            MovementMode::Fly | MovementMode::Missile => match dir {
                Direction::Up => !there.has_floor(),
                _ => !here.has_floor(),
            },
        };
        open.then_some(VERTICAL_TU)
    }
}

impl TerrainCost for BattleMap {
    fn step(&self, from: Position, dir: Direction, mode: MovementMode) -> Option<Step> {
        let to = from + dir.offset();
        let here = self.tile(from)?;
        let there = self.tile(to)?;
        if there.is_wall() {
            return None;
        }

        if dir.is_vertical() {
            let tu = Self::vertical_tu(here, there, dir, mode)?;
            return Some(Step::new(tu, to));
        }
        if dir.is_diagonal() && self.cuts_corner(from, dir) {
            return None;
        }

        let base = match mode {
            MovementMode::Walk => there.ground_tu()?,
            MovementMode::Fly | MovementMode::Missile => there.ground_tu().unwrap_or(AIR_TU),
        };
        let tu = if dir.is_diagonal() { base + base / 2 } else { base };
        Some(Step::new(tu, to))
    }
}

impl fmt::Display for BattleMap {
    /// Writes the map in layout form, so that parsing the output gives the
    /// same map back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for z in self.bounds.min.z..self.bounds.max.z {
            if z > self.bounds.min.z {
                f.write_str("\n")?;
            }
            f.write_str(&self.render_level(z, |_| None))?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BattleMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BattleMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        BattleMap::parse(&s).map_err(serde::de::Error::custom)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn map_round_trip() {
        let map = BattleMap::parse("..#\n^_,\n~~.").unwrap();
        let json = serde_json::to_string(&map).unwrap();
        let back: BattleMap = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }

    #[test]
    fn invalid_layout_is_rejected() {
        let res: Result<BattleMap, _> = serde_json::from_str("\"..\\n.\"");
        assert!(res.is_err());
    }
}
