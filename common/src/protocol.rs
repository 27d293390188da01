use serde::{Deserialize, Serialize};

use crate::models::{AI_PLAYER, Difficulty, GameState, Mode};

/// Body of `POST /start`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StartRequest {
    pub mode: Mode,
    pub player1: String,
    pub player2: String,
    pub difficulty: Difficulty,
}

impl StartRequest {
    /// Build a start request. In AI mode the second seat always belongs to
    /// the server's opponent, whatever name was supplied.
    pub fn new(
        mode: Mode,
        player1: impl Into<String>,
        player2: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        let player2 = match mode {
            Mode::Ai => AI_PLAYER.to_string(),
            Mode::Pvp => player2.into(),
        };
        Self {
            mode,
            player1: player1.into(),
            player2,
            difficulty,
        }
    }
}

/// Body of `POST /move`
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveRequest {
    pub game_id: String,
    pub column: usize,
}

/// Body of `POST /ai-move`
#[derive(Debug, Deserialize, Serialize)]
pub struct AiMoveRequest {
    pub game_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StartResponse {
    pub game_id: String,
    pub state: GameState,
}

/// Response to `/move` and `/ai-move`. `result` is the server's verdict on
/// the move ("Move accepted", "Column full", ...) and is informational only.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateResponse {
    pub state: GameState,
    #[serde(default)]
    pub result: Option<String>,
}

/// `GET /state` answers either with a wrapped or a bare snapshot.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StateEnvelope {
    Wrapped { state: GameState },
    Bare(GameState),
}

impl StateEnvelope {
    pub fn into_state(self) -> GameState {
        match self {
            StateEnvelope::Wrapped { state } | StateEnvelope::Bare(state) => state,
        }
    }
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
