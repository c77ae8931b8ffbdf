use std::fmt;
use std::time::Duration;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::coord::{Coord, NUM_ROWS};
use crate::ui::{ElementId, Ui};


// Removing a highlight lags the pointer slightly so that the drag image
// leaving a tile does not flicker it.
pub const HIGHLIGHT_CLEAR_DELAY: Duration = Duration::from_millis(150);


// Stable tile reference: the algebraic form of the coordinate. Used as the
// wire-level tile id in move payloads and broadcasts, and as the tile's
// element id.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(Coord);

impl TileId {
    pub fn new(coord: Coord) -> Self { TileId(coord) }
    pub fn coord(self) -> Coord { self.0 }
    pub fn from_name(name: &str) -> Option<Self> { Coord::from_algebraic(name).map(TileId) }
    pub fn element(self) -> ElementId { ElementId::new(self.0.to_algebraic()) }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_algebraic())
    }
}

impl fmt::Debug for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileId({})", self.0.to_algebraic())
    }
}

impl Serialize for TileId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TileId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TileId::from_name(&s).ok_or_else(|| D::Error::custom(format!("unknown tile: {s:?}")))
    }
}


#[derive(Clone, Debug)]
pub struct Tile {
    coord: Coord,
    highlighted: bool,
}

impl Tile {
    fn new(coord: Coord) -> Self { Tile { coord, highlighted: false } }
    pub fn id(&self) -> TileId { TileId(self.coord) }
    pub fn coord(&self) -> Coord { self.coord }
    pub fn is_highlighted(&self) -> bool { self.highlighted }
    pub fn element(&self) -> ElementId { self.id().element() }
}


// All 64 tiles, created once at board construction and never destroyed.
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl TileSet {
    pub fn new() -> Self {
        TileSet { tiles: Coord::all().map(Tile::new).collect() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> { self.tiles.iter() }

    pub fn at(&self, coord: Coord) -> &Tile {
        &self.tiles[Self::index(coord)]
    }

    pub fn by_id(&self, id: TileId) -> &Tile { self.at(id.coord()) }

    pub fn by_name(&self, name: &str) -> Option<&Tile> {
        TileId::from_name(name).map(|id| self.by_id(id))
    }

    pub fn by_element(&self, element: &ElementId) -> Option<&Tile> {
        self.by_name(element.as_str())
    }

    pub fn set_highlight(&mut self, id: TileId, highlighted: bool, ui: &mut dyn Ui) {
        self.tiles[Self::index(id.coord())].highlighted = highlighted;
        ui.set_tile_highlight(id, highlighted);
    }

    // The model flag drops immediately; only the visual toggle is deferred.
    pub fn unhighlight_later(&mut self, id: TileId, ui: &mut dyn Ui) {
        self.tiles[Self::index(id.coord())].highlighted = false;
        ui.clear_tile_highlight_later(id, HIGHLIGHT_CLEAR_DELAY);
    }

    // Matches the order of `Coord::all`.
    fn index(coord: Coord) -> usize {
        (usize::from(coord.x()) - 1) * usize::from(NUM_ROWS) + usize::from(coord.y()) - 1
    }
}
