// Test doubles and sample data. Kept in `src` so that both the in-module unit
// tests and the integration tests can use them.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use crate::channel::RealtimeTransport;
use crate::coord::Coord;
use crate::event::{ClientRequest, GameResponse, ParticipantResponse, PieceResponse, UserId};
use crate::force::Force;
use crate::piece::{Piece, PieceId, PieceKind};
use crate::tile::TileId;
use crate::ui::{SpriteVariant, Ui};


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum UiEffect {
    CreatePiece(PieceId),
    MovePiece { piece: PieceId, to: Coord, transition: Duration },
    RemovePiece(PieceId),
    PieceSprite { piece: PieceId, variant: SpriteVariant },
    TileHighlight { tile: TileId, highlighted: bool },
    TileUnhighlightLater { tile: TileId, delay: Duration },
    MoveSound,
    GameInfo { room: String, host: Option<String>, guest: Option<String> },
    Alert(String),
    Confirm(String),
    RedirectHome,
    RedirectHomeLater(Duration),
}

struct RecordingUiState {
    effects: Vec<UiEffect>,
    confirm_answer: bool,
}

// Records every presentation side effect. Shared through a handle so tests
// keep access after moving a clone into a board or session.
#[derive(Clone)]
pub struct RecordingUi {
    state: Rc<RefCell<RecordingUiState>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        let state = RecordingUiState { effects: Vec::new(), confirm_answer: true };
        RecordingUi { state: Rc::new(RefCell::new(state)) }
    }

    pub fn set_confirm_answer(&self, answer: bool) {
        self.state.borrow_mut().confirm_answer = answer;
    }

    pub fn effects(&self) -> Vec<UiEffect> {
        self.state.borrow().effects.clone()
    }

    pub fn drain_effects(&self) -> Vec<UiEffect> {
        mem::take(&mut self.state.borrow_mut().effects)
    }

    fn push(&self, effect: UiEffect) {
        self.state.borrow_mut().effects.push(effect);
    }
}

impl Ui for RecordingUi {
    fn create_piece(&mut self, piece: &Piece) {
        self.push(UiEffect::CreatePiece(piece.id()));
    }
    fn move_piece(&mut self, piece: &Piece, transition: Duration) {
        self.push(UiEffect::MovePiece { piece: piece.id(), to: piece.coord(), transition });
    }
    fn remove_piece(&mut self, piece: &Piece) {
        self.push(UiEffect::RemovePiece(piece.id()));
    }
    fn set_piece_sprite(&mut self, piece: &Piece, variant: SpriteVariant) {
        self.push(UiEffect::PieceSprite { piece: piece.id(), variant });
    }
    fn set_tile_highlight(&mut self, tile: TileId, highlighted: bool) {
        self.push(UiEffect::TileHighlight { tile, highlighted });
    }
    fn clear_tile_highlight_later(&mut self, tile: TileId, delay: Duration) {
        self.push(UiEffect::TileUnhighlightLater { tile, delay });
    }
    fn play_move_sound(&mut self) {
        self.push(UiEffect::MoveSound);
    }
    fn show_game_info(&mut self, room: &str, host: Option<&str>, guest: Option<&str>) {
        self.push(UiEffect::GameInfo {
            room: room.to_owned(),
            host: host.map(str::to_owned),
            guest: guest.map(str::to_owned),
        });
    }
    fn alert(&mut self, message: &str) {
        self.push(UiEffect::Alert(message.to_owned()));
    }
    fn confirm(&mut self, message: &str) -> bool {
        self.push(UiEffect::Confirm(message.to_owned()));
        self.state.borrow().confirm_answer
    }
    fn redirect_home(&mut self) {
        self.push(UiEffect::RedirectHome);
    }
    fn redirect_home_later(&mut self, delay: Duration) {
        self.push(UiEffect::RedirectHomeLater(delay));
    }
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TransportCall {
    Subscribe(String),
    Unsubscribe,
    Close,
}

#[derive(Clone, Default)]
pub struct FakeTransport {
    calls: Rc<RefCell<Vec<TransportCall>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.borrow().clone()
    }
}

impl RealtimeTransport for FakeTransport {
    fn subscribe(&mut self, topic: &str) {
        self.calls.borrow_mut().push(TransportCall::Subscribe(topic.to_owned()));
    }
    fn unsubscribe(&mut self) {
        self.calls.borrow_mut().push(TransportCall::Unsubscribe);
    }
    fn close(&mut self) {
        self.calls.borrow_mut().push(TransportCall::Close);
    }
}


pub fn drain_requests(requests_rx: &mpsc::Receiver<ClientRequest>) -> Vec<ClientRequest> {
    requests_rx.try_iter().collect()
}

pub fn participant(id: u64, name: &str) -> ParticipantResponse {
    ParticipantResponse { id: Some(UserId::new(id)), name: Some(name.to_owned()) }
}

// A cut-down middlegame position: enough material to exercise moves and
// captures without the full starting lineup.
pub fn sample_pieces() -> Vec<PieceResponse> {
    vec![
        PieceResponse { x: 5, y: 1, color: Force::White, shape: PieceKind::King },
        PieceResponse { x: 2, y: 2, color: Force::White, shape: PieceKind::Pawn },
        PieceResponse { x: 4, y: 4, color: Force::White, shape: PieceKind::Rook },
        PieceResponse { x: 5, y: 8, color: Force::Black, shape: PieceKind::King },
        PieceResponse { x: 2, y: 7, color: Force::Black, shape: PieceKind::Pawn },
        PieceResponse { x: 4, y: 7, color: Force::Black, shape: PieceKind::Knight },
    ]
}

// Alice hosts, Bob is the guest.
pub fn sample_game(turn: Force) -> GameResponse {
    GameResponse {
        name: "room 1".to_owned(),
        host: participant(1, "Alice"),
        guest: participant(2, "Bob"),
        turn,
        finished: false,
        pieces: sample_pieces(),
    }
}
