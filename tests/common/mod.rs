use std::sync::mpsc;

use chess_client::event::{ClientRequest, GameId, GameResponse, UserId};
use chess_client::session::GameSession;
use chess_client::test_util::{FakeTransport, RecordingUi};


pub const GAME_ID: &str = "42";

pub fn game_id() -> GameId {
    GameId::new(GAME_ID)
}

pub struct TestClient {
    pub session: GameSession,
    pub ui: RecordingUi,
    pub transport: FakeTransport,
    pub requests_rx: mpsc::Receiver<ClientRequest>,
}

impl TestClient {
    // Boots a session and applies the initial game state, as the page driver
    // would once the fetch resolves.
    pub fn connect(viewer_id: u64, game: &GameResponse) -> Self {
        let (requests_tx, requests_rx) = mpsc::channel();
        let ui = RecordingUi::new();
        let transport = FakeTransport::new();
        let mut session = GameSession::start(
            game_id(),
            UserId::new(viewer_id),
            Box::new(transport.clone()),
            Box::new(ui.clone()),
            requests_tx,
        );
        session.apply_game_state(Some(game.clone()));
        let client = TestClient { session, ui, transport, requests_rx };
        client.drain_requests();
        client.ui.drain_effects();
        client
    }

    pub fn drain_requests(&self) -> Vec<ClientRequest> {
        self.requests_rx.try_iter().collect()
    }
}
