//! Text layouts for battle maps.
//!
//! A layout is a stack of levels drawn as ASCII art, lowest level first.
//! Levels are separated by a blank line and all must have the same size.
//! Surrounding whitespace on each line is ignored.
//!
//! | Glyph | Tile |
//! |---|---|
//! | `.` | floor |
//! | `,` | rough floor |
//! | `~` | deep terrain |
//! | `#` | wall |
//! | `_` | open air |
//! | `^` | gravlift |

use std::fmt;

use battlescape_core::{Bounds, Position};

use crate::tile::TileKind;

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The layout contains no level.
    Empty,
    /// A line of a level is wider or narrower than the level's first line.
    InconsistentSize { level: i32, line: i32 },
    /// A level does not have the same size as level 0.
    LevelSizeMismatch { level: i32 },
    /// A character that is not a tile glyph.
    InvalidGlyph { ch: char, pos: Position },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("map layout is empty"),
            Self::InconsistentSize { level, line } => {
                write!(f, "map level {level}: line {line} has an inconsistent width")
            }
            Self::LevelSizeMismatch { level } => {
                write!(f, "map level {level} does not match the size of level 0")
            }
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "map contains invalid glyph \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for MapError {}

/// Parse `s` into bounds and tiles in [`Bounds::index`] order.
pub(crate) fn parse(s: &str) -> Result<(Bounds, Vec<TileKind>), MapError> {
    let mut levels: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in s.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                levels.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        levels.push(current);
    }

    let Some(first) = levels.first() else {
        return Err(MapError::Empty);
    };
    let width = first[0].chars().count();
    let length = first.len();

    let mut tiles = Vec::with_capacity(width * length * levels.len());
    for (z, level) in levels.iter().enumerate() {
        if level.len() != length || level[0].chars().count() != width {
            return Err(MapError::LevelSizeMismatch { level: z as i32 });
        }
        for (y, line) in level.iter().enumerate() {
            if line.chars().count() != width {
                return Err(MapError::InconsistentSize {
                    level: z as i32,
                    line: y as i32,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32, z as i32);
                let kind = TileKind::from_glyph(ch).ok_or(MapError::InvalidGlyph { ch, pos })?;
                tiles.push(kind);
            }
        }
    }

    let bounds = Bounds::new(width as i32, length as i32, levels.len() as i32);
    Ok((bounds, tiles))
}
