use std::sync::mpsc;
use std::time::Duration;

use crate::board::Board;
use crate::channel::{ChannelMessage, RealtimeChannel, RealtimeTransport};
use crate::event::{CheckResponse, ClientRequest, GameId, GameResponse, MoveOutcome, UserId};
use crate::role::Role;
use crate::ui::{ElementId, Ui};


pub const COMPLETION_REDIRECT_DELAY: Duration = Duration::from_secs(3);

const LOAD_FAILED_MESSAGE: &str = "Could not load the game. Returning home.";
const ALREADY_FINISHED_MESSAGE: &str = "This game has already finished. Returning home.";
const GAME_OVER_MESSAGE: &str = "The game is over. Returning home shortly.";


// The game id is the final segment of the location path.
pub fn game_id_from_path(path: &str) -> GameId {
    let start = path.rfind('/').map_or(0, |idx| idx + 1);
    GameId::new(&path[start..])
}


// Owns everything with session lifetime: the pub/sub channel, the board (once
// the game is ready) and the presentation seam. Constructed at page load,
// torn down with `close` on navigation away.
pub struct GameSession {
    viewer_id: UserId,
    channel: RealtimeChannel,
    board: Option<Board>,
    requests_tx: mpsc::Sender<ClientRequest>,
    ui: Box<dyn Ui>,
}

impl GameSession {
    // Subscribes the per-game topics, then requests the initial game state.
    pub fn start(
        game_id: GameId, viewer_id: UserId, transport: Box<dyn RealtimeTransport>,
        ui: Box<dyn Ui>, requests_tx: mpsc::Sender<ClientRequest>,
    ) -> Self {
        let channel = RealtimeChannel::connect(transport, game_id);
        requests_tx.send(ClientRequest::FetchGame).unwrap();
        GameSession { viewer_id, channel, board: None, requests_tx, ui }
    }

    pub fn game_id(&self) -> &GameId { self.channel.game_id() }
    pub fn board(&self) -> Option<&Board> { self.board.as_ref() }
    pub fn is_subscribed(&self) -> bool { self.channel.is_subscribed() }

    // Applies the initial fetch. `None` stands for an unreachable or
    // nonexistent game; both that and an already-finished game are fatal for
    // the session.
    pub fn apply_game_state(&mut self, response: Option<GameResponse>) {
        let Some(game) = response else {
            self.abort_session(LOAD_FAILED_MESSAGE);
            return;
        };
        if game.finished {
            self.abort_session(ALREADY_FINISHED_MESSAGE);
            return;
        }
        self.init_game(&game);
    }

    // An inbound pub/sub frame, as raw topic and body.
    pub fn handle_frame(&mut self, topic: &str, body: &str) {
        match self.channel.decode(topic, body) {
            Ok(ChannelMessage::Move(broadcast)) => {
                match self.board.as_mut() {
                    Some(board) => board.apply_remote_move(&broadcast, self.ui.as_mut()),
                    None => log::warn!("Dropping move broadcast: no active board"),
                }
                if broadcast.finished {
                    self.channel.unsubscribe();
                    self.ui.alert(GAME_OVER_MESSAGE);
                    self.ui.redirect_home_later(COMPLETION_REDIRECT_DELAY);
                }
            }
            Ok(ChannelMessage::Join(game)) => self.init_game(&game),
            Err(err) => log::warn!("Ignoring frame on {topic}: {err:?}"),
        }
    }

    pub fn close(&mut self) {
        self.channel.unsubscribe();
        self.channel.close();
    }

    // Gesture surface, forwarded to the board once the game is active.
    pub fn start_drag(&mut self, element: &ElementId) {
        if let Some(board) = self.board.as_mut() {
            board.start_drag(element, self.ui.as_mut());
        }
    }

    pub fn end_drag(&mut self) {
        if let Some(board) = self.board.as_mut() {
            board.end_drag();
        }
    }

    pub fn hover_enter(&mut self, element: &ElementId) {
        if let Some(board) = self.board.as_mut() {
            board.hover_enter(element);
        }
    }

    pub fn hover_leave(&mut self, element: &ElementId) {
        if let Some(board) = self.board.as_mut() {
            board.hover_leave(element, self.ui.as_mut());
        }
    }

    pub fn drop_piece(&mut self, source_token: &str, target_element: &ElementId) {
        if let Some(board) = self.board.as_mut() {
            board.drop_piece(source_token, target_element, self.ui.as_mut());
        }
    }

    pub fn apply_check_verdict(&mut self, response: CheckResponse) {
        if let Some(board) = self.board.as_mut() {
            board.apply_check_verdict(response, self.ui.as_mut());
        }
    }

    pub fn apply_move_outcome(&mut self, outcome: Option<MoveOutcome>) {
        if let Some(board) = self.board.as_mut() {
            board.apply_move_outcome(outcome, self.ui.as_mut());
        }
    }

    pub fn fail_pending_request(&mut self) {
        if let Some(board) = self.board.as_mut() {
            board.fail_pending_request(self.ui.as_mut());
        }
    }

    fn abort_session(&mut self, message: &str) {
        self.channel.unsubscribe();
        self.channel.close();
        self.ui.alert(message);
        self.ui.redirect_home();
    }

    // Builds the board once both participants are known; before that the
    // session just shows the room info and waits for the join broadcast.
    fn init_game(&mut self, game: &GameResponse) {
        if game.host.id.is_some() && game.guest.id.is_some() {
            let role = Role::of(self.viewer_id, game.host.id, game.guest.id);
            self.board = Some(Board::new(
                &game.pieces,
                game.turn,
                role,
                self.requests_tx.clone(),
                self.ui.as_mut(),
            ));
        }
        self.ui.show_game_info(&game.name, game.host.name.as_deref(), game.guest.name.as_deref());
    }
}
