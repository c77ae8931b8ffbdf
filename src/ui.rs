use std::fmt;
use std::time::Duration;

use crate::piece::Piece;
use crate::tile::TileId;


// Identifier of the visual node backing an entity. The presentation layer owns
// the mapping to actual nodes; the model keeps these only as annotations and
// as a secondary lookup index for pointer-event targets.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self { ElementId(id.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpriteVariant {
    Normal,
    Highlighted,
}

// Presentation seam. The sync core calls these for every externally visible
// side effect; the embedding frontend maps them onto the page, and tests
// substitute a recording double.
pub trait Ui {
    fn create_piece(&mut self, piece: &Piece);

    // `piece.coord()` is already the destination. Implementations restore the
    // normal sprite variant once the transition completes.
    fn move_piece(&mut self, piece: &Piece, transition: Duration);

    fn remove_piece(&mut self, piece: &Piece);

    fn set_piece_sprite(&mut self, piece: &Piece, variant: SpriteVariant);

    fn set_tile_highlight(&mut self, tile: TileId, highlighted: bool);
    fn clear_tile_highlight_later(&mut self, tile: TileId, delay: Duration);

    fn play_move_sound(&mut self);

    fn show_game_info(&mut self, room: &str, host: Option<&str>, guest: Option<&str>);

    fn alert(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
    fn redirect_home(&mut self);
    fn redirect_home_later(&mut self, delay: Duration);
}
