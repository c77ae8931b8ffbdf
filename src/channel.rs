use std::mem;

use crate::event::{GameId, GameResponse, MoveBroadcast};


// Pub/sub socket seam. The embedding driver owns the actual connection and
// pushes inbound frames into `GameSession::handle_frame`; subscription
// lifecycle goes the other way, through this trait.
pub trait RealtimeTransport {
    fn subscribe(&mut self, topic: &str);
    fn unsubscribe(&mut self);
    fn close(&mut self);
}


pub fn move_topic(game_id: &GameId) -> String {
    format!("/topic/games/{game_id}/move")
}

pub fn join_topic(game_id: &GameId) -> String {
    format!("/topic/games/{game_id}/join")
}


#[derive(Debug)]
pub enum ChannelError {
    UnknownTopic(String),
    Payload(serde_json::Error),
}

#[derive(Clone, Debug)]
pub enum ChannelMessage {
    Move(MoveBroadcast),
    // Sent when the second participant becomes known; carries the full game
    // state so a waiting client can initialize its board.
    Join(Box<GameResponse>),
}


// The two per-game topics plus payload decoding. One per session.
pub struct RealtimeChannel {
    transport: Box<dyn RealtimeTransport>,
    game_id: GameId,
    subscribed: bool,
}

impl RealtimeChannel {
    pub fn connect(mut transport: Box<dyn RealtimeTransport>, game_id: GameId) -> Self {
        transport.subscribe(&move_topic(&game_id));
        transport.subscribe(&join_topic(&game_id));
        RealtimeChannel { transport, game_id, subscribed: true }
    }

    pub fn game_id(&self) -> &GameId { &self.game_id }
    pub fn is_subscribed(&self) -> bool { self.subscribed }

    pub fn decode(&self, topic: &str, body: &str) -> Result<ChannelMessage, ChannelError> {
        if topic == move_topic(&self.game_id) {
            serde_json::from_str(body).map(ChannelMessage::Move).map_err(ChannelError::Payload)
        } else if topic == join_topic(&self.game_id) {
            serde_json::from_str(body)
                .map(|game| ChannelMessage::Join(Box::new(game)))
                .map_err(ChannelError::Payload)
        } else {
            Err(ChannelError::UnknownTopic(topic.to_owned()))
        }
    }

    pub fn unsubscribe(&mut self) {
        if mem::take(&mut self.subscribed) {
            self.transport.unsubscribe();
        }
    }

    pub fn close(&mut self) {
        self.transport.close();
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::coord::Coord;
    use crate::force::Force;
    use crate::test_util::{sample_game, FakeTransport, TransportCall};

    fn game_id() -> GameId { GameId::new("42") }

    #[test]
    fn topics_are_scoped_to_the_game() {
        assert_eq!(move_topic(&game_id()), "/topic/games/42/move");
        assert_eq!(join_topic(&game_id()), "/topic/games/42/join");
    }

    #[test]
    fn connect_subscribes_both_topics() {
        let transport = FakeTransport::new();
        let channel = RealtimeChannel::connect(Box::new(transport.clone()), game_id());
        assert!(channel.is_subscribed());
        assert_eq!(transport.calls(), vec![
            TransportCall::Subscribe("/topic/games/42/move".to_owned()),
            TransportCall::Subscribe("/topic/games/42/join".to_owned()),
        ]);
    }

    #[test]
    fn decodes_move_frames() {
        let channel = RealtimeChannel::connect(Box::new(FakeTransport::new()), game_id());
        let body = r#"{"source": "b7", "target": "b6", "color": "black", "finished": false}"#;
        let broadcast = match channel.decode("/topic/games/42/move", body).unwrap() {
            ChannelMessage::Move(broadcast) => broadcast,
            other => panic!("expected a move, got {other:?}"),
        };
        assert_eq!(broadcast.source.coord(), Coord::new(2, 7));
        assert_eq!(broadcast.color, Force::Black);
    }

    #[test]
    fn decodes_join_frames() {
        let channel = RealtimeChannel::connect(Box::new(FakeTransport::new()), game_id());
        let body = serde_json::to_string(&sample_game(Force::White)).unwrap();
        let game = match channel.decode("/topic/games/42/join", &body).unwrap() {
            ChannelMessage::Join(game) => game,
            other => panic!("expected a join, got {other:?}"),
        };
        assert_eq!(game.name, "room 1");
    }

    #[test]
    fn rejects_foreign_topics_and_bad_payloads() {
        let channel = RealtimeChannel::connect(Box::new(FakeTransport::new()), game_id());
        assert!(matches!(
            channel.decode("/topic/games/43/move", "{}"),
            Err(ChannelError::UnknownTopic(_))
        ));
        assert!(matches!(
            channel.decode("/topic/games/42/move", "not json"),
            Err(ChannelError::Payload(_))
        ));
    }

    #[test]
    fn unsubscribe_reaches_the_transport_once() {
        let transport = FakeTransport::new();
        let mut channel = RealtimeChannel::connect(Box::new(transport.clone()), game_id());
        channel.unsubscribe();
        channel.unsubscribe();
        channel.close();
        let calls = transport.calls();
        assert_eq!(calls.iter().filter(|call| **call == TransportCall::Unsubscribe).count(), 1);
        assert_eq!(calls.last(), Some(&TransportCall::Close));
        assert!(!channel.is_subscribed());
    }
}
