use std::sync::mpsc;

use crate::event::{CheckResponse, ClientRequest, MoveBroadcast, MoveCommand, MoveOutcome, PieceResponse};
use crate::force::Force;
use crate::piece::{PieceId, PieceSet};
use crate::role::Role;
use crate::tile::{TileId, TileSet};
use crate::turn::Turn;
use crate::ui::{ElementId, SpriteVariant, Ui};


const GAME_OVER_CONFIRM: &str = "The game is over. Return to the home screen?";


// At most one network round trip is outstanding per board. Responses are
// correlated purely by this state, so handlers that would start a second
// round trip while one is pending stay inert.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum PendingRequest {
    None,
    HoverCheck { target: TileId },
    DropCheck { piece: PieceId, source: TileId, target: TileId },
    Execute { piece: PieceId, target: TileId },
}


// Orchestrates one board: entity sets, turn ownership, the drag gesture
// lifecycle and the move-request protocol. All mutation enters through the
// gesture handlers, the response appliers and `apply_remote_move`.
pub struct Board {
    tiles: TileSet,
    pieces: PieceSet,
    turn: Turn,
    role: Role,
    source_tile: Option<TileId>,
    pending: PendingRequest,
    requests_tx: mpsc::Sender<ClientRequest>,
}

impl Board {
    pub fn new(
        pieces: &[PieceResponse], turn: Force, role: Role,
        requests_tx: mpsc::Sender<ClientRequest>, ui: &mut dyn Ui,
    ) -> Self {
        Board {
            tiles: TileSet::new(),
            pieces: PieceSet::new(pieces, ui),
            turn: Turn::new(turn),
            role,
            source_tile: None,
            pending: PendingRequest::None,
            requests_tx,
        }
    }

    pub fn tiles(&self) -> &TileSet { &self.tiles }
    pub fn pieces(&self) -> &PieceSet { &self.pieces }
    pub fn turn(&self) -> Force { self.turn.force() }
    pub fn role(&self) -> Role { self.role }
    pub fn source_tile(&self) -> Option<TileId> { self.source_tile }
    pub fn has_pending_request(&self) -> bool { self.pending != PendingRequest::None }

    // The sole client-side authorization gate. Server-side enforcement still
    // applies to everything this lets through.
    pub fn check_turn(&self) -> bool {
        self.role.plays(self.turn.force())
    }

    // Gesture start: remember the grabbed piece's tile and switch the piece to
    // its highlighted sprite. No network call.
    pub fn start_drag(&mut self, element: &ElementId, ui: &mut dyn Ui) {
        if self.pending != PendingRequest::None {
            log::info!("Ignoring drag start: a move request is in flight");
            return;
        }
        let Some(piece) = self.pieces.by_element(element) else {
            return;
        };
        let (id, coord) = (piece.id(), piece.coord());
        self.source_tile = Some(self.tiles.at(coord).id());
        self.pieces.set_sprite(id, SpriteVariant::Highlighted, ui);
    }

    pub fn end_drag(&mut self) {
        self.source_tile = None;
    }

    // Hover over a potential target: ask the server whether the move would be
    // legal and highlight the tile according to the verdict.
    pub fn hover_enter(&mut self, element: &ElementId) {
        if !self.check_turn() {
            return;
        }
        if self.pending != PendingRequest::None {
            return;
        }
        let Some(source) = self.source_tile else {
            return;
        };
        let Some(target) = self.resolve_target_tile(element) else {
            return;
        };
        if source == target {
            return;
        }
        let color = self.pieces.occupant(source.coord()).force();
        self.pending = PendingRequest::HoverCheck { target };
        self.requests_tx
            .send(ClientRequest::CheckMove(MoveCommand { source, target, color }))
            .unwrap();
    }

    pub fn hover_leave(&mut self, element: &ElementId, ui: &mut dyn Ui) {
        let Some(target) = self.resolve_target_tile(element) else {
            return;
        };
        self.tiles.unhighlight_later(target, ui);
    }

    // Drop resolves the source piece from the gesture payload token, not from
    // the marked source tile.
    pub fn drop_piece(&mut self, source_token: &str, target_element: &ElementId, ui: &mut dyn Ui) {
        self.source_tile = None;
        let piece = self
            .pieces
            .by_source_token(source_token)
            .unwrap_or_else(|| panic!("no piece matches source position {source_token:?}"));
        let (piece_id, color, coord) = (piece.id(), piece.force(), piece.coord());
        if !self.check_turn() {
            self.pieces.set_sprite(piece_id, SpriteVariant::Normal, ui);
            return;
        }
        if self.pending != PendingRequest::None {
            log::info!("Ignoring drop: a move request is in flight");
            self.pieces.set_sprite(piece_id, SpriteVariant::Normal, ui);
            return;
        }
        let source = self.tiles.at(coord).id();
        let Some(target) = self.resolve_target_tile(target_element) else {
            self.pieces.set_sprite(piece_id, SpriteVariant::Normal, ui);
            return;
        };
        if source == target {
            self.pieces.set_sprite(piece_id, SpriteVariant::Normal, ui);
            return;
        }
        // The hover-time verdict may be stale by now; check again before
        // executing.
        self.pending = PendingRequest::DropCheck { piece: piece_id, source, target };
        self.requests_tx
            .send(ClientRequest::CheckMove(MoveCommand { source, target, color }))
            .unwrap();
    }

    pub fn apply_check_verdict(&mut self, response: CheckResponse, ui: &mut dyn Ui) {
        match self.pending {
            PendingRequest::HoverCheck { target } => {
                self.pending = PendingRequest::None;
                self.tiles.set_highlight(target, response.movable, ui);
            }
            PendingRequest::DropCheck { piece, source, target } => {
                let Some(source_piece) = self.pieces.get(piece) else {
                    // The dragged piece can be captured by a remote move while
                    // the check is in flight.
                    self.pending = PendingRequest::None;
                    self.tiles.set_highlight(target, false, ui);
                    return;
                };
                if response.movable {
                    let color = source_piece.force();
                    self.pending = PendingRequest::Execute { piece, target };
                    self.requests_tx
                        .send(ClientRequest::ExecuteMove(MoveCommand { source, target, color }))
                        .unwrap();
                } else {
                    self.pending = PendingRequest::None;
                    self.pieces.set_sprite(piece, SpriteVariant::Normal, ui);
                    self.tiles.set_highlight(target, false, ui);
                }
            }
            PendingRequest::None | PendingRequest::Execute { .. } => {
                log::warn!("Unexpected move-check verdict; ignoring");
            }
        }
    }

    // `None` stands for a rejected or failed execute call; no state changes in
    // that case.
    pub fn apply_move_outcome(&mut self, outcome: Option<MoveOutcome>, ui: &mut dyn Ui) {
        let PendingRequest::Execute { piece, target } = self.pending else {
            log::warn!("Unexpected move outcome; ignoring");
            return;
        };
        self.pending = PendingRequest::None;
        match outcome {
            Some(outcome) => {
                self.pieces.move_to(piece, target.coord(), ui);
                self.turn.flip();
                if outcome.finished && ui.confirm(GAME_OVER_CONFIRM) {
                    ui.redirect_home();
                }
            }
            None => {
                self.pieces.set_sprite(piece, SpriteVariant::Normal, ui);
            }
        }
        self.tiles.set_highlight(target, false, ui);
    }

    // Transport-level failure of whichever request is outstanding. A failed
    // hover check just leaves the target unhighlighted; a failed drop check or
    // execute unwinds the gesture as if the move were rejected.
    pub fn fail_pending_request(&mut self, ui: &mut dyn Ui) {
        let pending = self.pending;
        self.pending = PendingRequest::None;
        match pending {
            PendingRequest::None => {}
            PendingRequest::HoverCheck { target } => {
                log::warn!("Move-legality check failed; leaving {target} unhighlighted");
            }
            PendingRequest::DropCheck { piece, target, .. }
            | PendingRequest::Execute { piece, target } => {
                log::warn!("Move request failed; dropping the gesture");
                if self.pieces.get(piece).is_some() {
                    self.pieces.set_sprite(piece, SpriteVariant::Normal, ui);
                }
                self.tiles.set_highlight(target, false, ui);
            }
        }
    }

    // A move broadcast for this game. Moves of the local player's own side are
    // deferred echoes of actions already applied on the execute response, so
    // only the opponent's moves are replayed, without re-checking legality.
    pub fn apply_remote_move(&mut self, broadcast: &MoveBroadcast, ui: &mut dyn Ui) {
        if self.role.plays(broadcast.color) {
            return;
        }
        let piece = self.pieces.occupant(broadcast.source.coord()).id();
        self.pieces.move_to(piece, broadcast.target.coord(), ui);
        self.turn.flip();
    }

    fn resolve_target_tile(&self, element: &ElementId) -> Option<TileId> {
        if let Some(tile) = self.tiles.by_element(element) {
            return Some(tile.id());
        }
        self.pieces.by_element(element).map(|piece| self.tiles.at(piece.coord()).id())
    }
}
