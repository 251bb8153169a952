/// Time units to cross a plain floor tile.
pub const FLOOR_TU: i32 = 4;
/// Time units to cross rubble, shrubs and similar.
pub const ROUGH_TU: i32 = 6;
/// Time units to wade through water or mud.
pub const DEEP_TU: i32 = 8;
/// Time units for a flyer to cross a tile without a floor.
pub const AIR_TU: i32 = 4;
/// Time units to change level, by gravlift or in flight.
pub const VERTICAL_TU: i32 = 8;

/// Kinds of walkable ground. Each costs at least [`FLOOR_TU`] to enter, so
/// a straight move never undercuts the search heuristic.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ground {
    #[default]
    Plain,
    Rough,
    Deep,
}

impl Ground {
    #[inline]
    pub const fn tu(self) -> i32 {
        match self {
            Ground::Plain => FLOOR_TU,
            Ground::Rough => ROUGH_TU,
            Ground::Deep => DEEP_TU,
        }
    }
}

/// What occupies one tile of the map.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    /// Nothing to stand on. Only flyers can enter.
    #[default]
    Open,
    /// Walkable ground.
    Floor(Ground),
    /// Impassable.
    Wall,
    /// Walkable ground that also lifts walkers to the levels above and below.
    Gravlift,
}

impl TileKind {
    pub const FLOOR: Self = TileKind::Floor(Ground::Plain);

    /// Layout glyph for this tile.
    pub fn glyph(self) -> char {
        match self {
            TileKind::Open => '_',
            TileKind::Wall => '#',
            TileKind::Gravlift => '^',
            TileKind::Floor(Ground::Plain) => '.',
            TileKind::Floor(Ground::Rough) => ',',
            TileKind::Floor(Ground::Deep) => '~',
        }
    }

    pub fn from_glyph(ch: char) -> Option<Self> {
        let kind = match ch {
            '_' => TileKind::Open,
            '#' => TileKind::Wall,
            '^' => TileKind::Gravlift,
            '.' => TileKind::FLOOR,
            ',' => TileKind::Floor(Ground::Rough),
            '~' => TileKind::Floor(Ground::Deep),
            _ => return None,
        };
        Some(kind)
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        self == TileKind::Wall
    }

    /// Cost for a walker to enter, or `None` if there is nothing to walk on.
    #[inline]
    pub fn ground_tu(self) -> Option<i32> {
        match self {
            TileKind::Floor(ground) => Some(ground.tu()),
            TileKind::Gravlift => Some(FLOOR_TU),
            TileKind::Open | TileKind::Wall => None,
        }
    }

    /// Whether a solid floor closes the tile from below. Gravlift shafts
    /// are open.
    #[inline]
    pub fn has_floor(self) -> bool {
        matches!(self, TileKind::Floor(_) | TileKind::Wall)
    }
}
