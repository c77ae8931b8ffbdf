use std::time::Duration;

use derive_new::new;
use itertools::Itertools;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::EnumIter;

use crate::coord::Coord;
use crate::event::PieceResponse;
use crate::force::Force;
use crate::ui::{ElementId, SpriteVariant, Ui};
use crate::util::as_single_char;


// Transition time per square of Euclidean distance travelled.
pub const MOVE_ANIMATION_SPEED: f64 = 0.5;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn to_letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn from_shape(shape: &str) -> Option<Self> {
        as_single_char(shape).and_then(Self::from_letter)
    }
}

impl Serialize for PieceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.to_letter())
    }
}

impl<'de> Deserialize<'de> for PieceKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PieceKind::from_shape(&s)
            .ok_or_else(|| D::Error::custom(format!("unknown piece shape: {s:?}")))
    }
}


// Stable piece identity. Lookup key for the lifetime of the piece; the visual
// node id is derived from it, not the other way around.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct PieceId(u32);

impl PieceId {
    pub fn element(self) -> ElementId { ElementId::new(format!("p{}", self.0)) }
}


#[derive(Clone, Debug, new)]
pub struct Piece {
    id: PieceId,
    force: Force,
    kind: PieceKind,
    coord: Coord,
    #[new(value = "false")]
    highlighted: bool,
}

impl Piece {
    pub fn id(&self) -> PieceId { self.id }
    pub fn force(&self) -> Force { self.force }
    pub fn kind(&self) -> PieceKind { self.kind }
    pub fn coord(&self) -> Coord { self.coord }
    pub fn is_highlighted(&self) -> bool { self.highlighted }
    pub fn element(&self) -> ElementId { self.id.element() }
    pub fn source_token(&self) -> String { self.coord.to_source_token() }
}


// All live pieces. Pieces leave the set only when captured.
pub struct PieceSet {
    pieces: Vec<Piece>,
}

impl PieceSet {
    // Builds the live set from the server's initial piece list and
    // materializes one visual node per piece.
    pub fn new(dtos: &[PieceResponse], ui: &mut dyn Ui) -> Self {
        let pieces = dtos
            .iter()
            .enumerate()
            .map(|(idx, dto)| {
                Piece::new(PieceId(idx as u32), dto.color, dto.shape, Coord::new(dto.x, dto.y))
            })
            .collect_vec();
        for piece in &pieces {
            ui.create_piece(piece);
        }
        PieceSet { pieces }
    }

    pub fn len(&self) -> usize { self.pieces.len() }
    pub fn is_empty(&self) -> bool { self.pieces.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &Piece> { self.pieces.iter() }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id == id)
    }

    pub fn at(&self, coord: Coord) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.coord == coord)
    }

    // A missing occupant means the client and the server disagree about the
    // board, which this layer treats as unrecoverable.
    #[track_caller]
    pub fn occupant(&self, coord: Coord) -> &Piece {
        self.at(coord)
            .unwrap_or_else(|| panic!("no piece at {}", coord.to_algebraic()))
    }

    pub fn by_element(&self, element: &ElementId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.element() == *element)
    }

    pub fn by_source_token(&self, token: &str) -> Option<&Piece> {
        self.at(Coord::from_source_token(token)?)
    }

    pub fn set_sprite(&mut self, id: PieceId, variant: SpriteVariant, ui: &mut dyn Ui) {
        let piece = self.get_mut(id);
        piece.highlighted = variant == SpriteVariant::Highlighted;
        ui.set_piece_sprite(&*piece, variant);
    }

    // Moves a piece, capturing whatever stood on the target tile. The visual
    // transition is scaled by the distance travelled.
    pub fn move_to(&mut self, id: PieceId, target: Coord, ui: &mut dyn Ui) {
        let captured = self.at(target).map(|piece| piece.id).filter(|captured| *captured != id);
        if let Some(captured) = captured {
            self.remove(captured, ui);
        }
        let piece = self.get_mut(id);
        let transition =
            Duration::from_secs_f64(MOVE_ANIMATION_SPEED * piece.coord.distance(target));
        piece.coord = target;
        piece.highlighted = false;
        ui.move_piece(&*piece, transition);
        ui.play_move_sound();
    }

    pub fn remove(&mut self, id: PieceId, ui: &mut dyn Ui) {
        let idx = self
            .pieces
            .iter()
            .position(|piece| piece.id == id)
            .unwrap_or_else(|| panic!("piece {id:?} is not on the board"));
        let piece = self.pieces.remove(idx);
        ui.remove_piece(&piece);
    }

    #[track_caller]
    fn get_mut(&mut self, id: PieceId) -> &mut Piece {
        self.pieces
            .iter_mut()
            .find(|piece| piece.id == id)
            .unwrap_or_else(|| panic!("piece {id:?} is not on the board"))
    }
}
