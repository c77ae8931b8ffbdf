use std::fmt;

use serde::{Deserialize, Serialize};

use crate::force::Force;
use crate::piece::PieceKind;
use crate::tile::TileId;


#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self { GameId(id.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}


// The server reports numeric user ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self { UserId(id) }
}


#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ParticipantResponse {
    // Absent until the corresponding participant has joined.
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PieceResponse {
    pub x: u8,
    pub y: u8,
    pub color: Force,
    pub shape: PieceKind,
}

// GET /api/games/{game_id}. Also the payload of the per-game join broadcast.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameResponse {
    pub name: String,
    pub host: ParticipantResponse,
    pub guest: ParticipantResponse,
    pub turn: Force,
    pub finished: bool,
    #[serde(rename = "pieceResponseDtos", default)]
    pub pieces: Vec<PieceResponse>,
}

// Request body shared by the legality check and the move itself. `color` is
// the team of the piece standing on the source tile.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveCommand {
    pub source: TileId,
    pub target: TileId,
    pub color: Force,
}

// GET /api/games/{game_id}/move/check
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub movable: bool,
}

// PUT /api/games/{game_id}/move
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub finished: bool,
}

// /topic/games/{game_id}/move
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveBroadcast {
    pub source: TileId,
    pub target: TileId,
    pub color: Force,
    #[serde(default)]
    pub finished: bool,
}


// Outgoing REST calls, performed by the embedding driver. Results come back
// through `GameSession::apply_game_state`, `apply_check_verdict` and
// `apply_move_outcome`; transport failures through `fail_pending_request`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ClientRequest {
    // GET /api/games/{game_id}
    FetchGame,
    // GET /api/games/{game_id}/move/check
    CheckMove(MoveCommand),
    // PUT /api/games/{game_id}/move
    ExecuteMove(MoveCommand),
}
