mod common;

use chess_client::channel::{join_topic, move_topic};
use chess_client::coord::Coord;
use chess_client::event::{
    CheckResponse, ClientRequest, MoveBroadcast, MoveCommand, MoveOutcome,
};
use chess_client::force::Force;
use chess_client::role::Role;
use chess_client::test_util::{sample_game, TransportCall, UiEffect};
use chess_client::tile::TileId;
use chess_client::ui::ElementId;
use common::TestClient;
use pretty_assertions::assert_eq;


fn tile(name: &str) -> TileId {
    TileId::from_name(name).unwrap()
}

fn pawn_push() -> MoveCommand {
    MoveCommand { source: tile("b2"), target: tile("b3"), color: Force::White }
}

fn broadcast_frame(command: MoveCommand, finished: bool) -> String {
    let broadcast = MoveBroadcast {
        source: command.source,
        target: command.target,
        color: command.color,
        finished,
    };
    serde_json::to_string(&broadcast).unwrap()
}


// The happy path, end to end: the host drags b2 onto b3, the server
// approves and executes, and the broadcast brings the guest's board in sync
// while the host's own echo is skipped.
#[test]
fn a_move_propagates_to_both_clients() {
    let game = sample_game(Force::White);
    let mut host = TestClient::connect(1, &game);
    let mut guest = TestClient::connect(2, &game);
    assert_eq!(host.session.board().unwrap().role(), Role::Host);
    assert_eq!(guest.session.board().unwrap().role(), Role::Guest);

    host.session.start_drag(&ElementId::new("p1"));
    host.session.hover_enter(&ElementId::new("b3"));
    assert_eq!(host.drain_requests(), vec![ClientRequest::CheckMove(pawn_push())]);
    host.session.apply_check_verdict(CheckResponse { movable: true });

    host.session.drop_piece("22", &ElementId::new("b3"));
    assert_eq!(host.drain_requests(), vec![ClientRequest::CheckMove(pawn_push())]);
    host.session.apply_check_verdict(CheckResponse { movable: true });
    assert_eq!(host.drain_requests(), vec![ClientRequest::ExecuteMove(pawn_push())]);
    host.session.apply_move_outcome(Some(MoveOutcome { finished: false }));

    let host_board = host.session.board().unwrap();
    assert_eq!(host_board.pieces().occupant(Coord::new(2, 3)).force(), Force::White);
    assert!(host_board.pieces().at(Coord::new(2, 2)).is_none());
    assert_eq!(host_board.turn(), Force::Black);

    let frame = broadcast_frame(pawn_push(), false);
    let topic = move_topic(&common::game_id());
    host.session.handle_frame(&topic, &frame);
    guest.session.handle_frame(&topic, &frame);

    // One flip each: the echo must not double-apply on the mover's side.
    assert_eq!(host.session.board().unwrap().turn(), Force::Black);
    let guest_board = guest.session.board().unwrap();
    assert_eq!(guest_board.turn(), Force::Black);
    assert_eq!(guest_board.pieces().occupant(Coord::new(2, 3)).force(), Force::White);
    assert!(guest_board.pieces().at(Coord::new(2, 2)).is_none());
    assert_eq!(guest.drain_requests(), vec![]);
}

#[test]
fn the_guest_cannot_act_out_of_turn() {
    let mut guest = TestClient::connect(2, &sample_game(Force::White));
    // p4 is the guest's own pawn on b7.
    guest.session.start_drag(&ElementId::new("p4"));
    guest.session.hover_enter(&ElementId::new("b6"));
    guest.session.drop_piece("27", &ElementId::new("b6"));
    assert_eq!(guest.drain_requests(), vec![]);
    assert_eq!(guest.session.board().unwrap().turn(), Force::White);
}

#[test]
fn a_negative_verdict_never_reaches_the_execute_endpoint() {
    let mut host = TestClient::connect(1, &sample_game(Force::White));
    host.session.start_drag(&ElementId::new("p1"));
    host.session.drop_piece("22", &ElementId::new("b5"));
    host.drain_requests();
    host.session.apply_check_verdict(CheckResponse { movable: false });
    assert_eq!(host.drain_requests(), vec![]);

    let board = host.session.board().unwrap();
    assert!(board.pieces().at(Coord::new(2, 2)).is_some());
    assert_eq!(board.turn(), Force::White);
}

#[test]
fn the_waiting_host_activates_on_the_join_broadcast() {
    let mut game = sample_game(Force::White);
    game.guest = Default::default();
    let mut host = TestClient::connect(1, &game);
    assert!(host.session.board().is_none());

    // Gestures before the opponent arrives go nowhere.
    host.session.start_drag(&ElementId::new("p1"));
    assert_eq!(host.drain_requests(), vec![]);

    let frame = serde_json::to_string(&sample_game(Force::White)).unwrap();
    host.session.handle_frame(&join_topic(&common::game_id()), &frame);
    assert_eq!(host.session.board().unwrap().role(), Role::Host);

    host.session.start_drag(&ElementId::new("p1"));
    host.session.hover_enter(&ElementId::new("b3"));
    assert_eq!(host.drain_requests(), vec![ClientRequest::CheckMove(pawn_push())]);
}

#[test]
fn game_completion_flows_to_the_other_client() {
    let game = sample_game(Force::White);
    let mut host = TestClient::connect(1, &game);
    let mut guest = TestClient::connect(2, &game);

    host.session.start_drag(&ElementId::new("p1"));
    host.session.drop_piece("22", &ElementId::new("b3"));
    host.drain_requests();
    host.session.apply_check_verdict(CheckResponse { movable: true });
    host.drain_requests();
    host.session.apply_move_outcome(Some(MoveOutcome { finished: true }));
    let host_effects = host.ui.drain_effects();
    assert!(host_effects.iter().any(|e| matches!(e, UiEffect::Confirm(_))));
    assert!(host_effects.contains(&UiEffect::RedirectHome));

    let frame = broadcast_frame(pawn_push(), true);
    guest.session.handle_frame(&move_topic(&common::game_id()), &frame);
    assert!(!guest.session.is_subscribed());
    assert!(guest.transport.calls().contains(&TransportCall::Unsubscribe));
    assert_eq!(guest.session.board().unwrap().turn(), Force::Black);
    let guest_effects = guest.ui.drain_effects();
    assert!(guest_effects.iter().any(|e| matches!(e, UiEffect::Alert(_))));
    assert!(matches!(guest_effects.last(), Some(UiEffect::RedirectHomeLater(_))));
}
