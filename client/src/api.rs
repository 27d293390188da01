use async_trait::async_trait;
use connect4_common::{
    models::GameState,
    protocol::{StartRequest, StartResponse, StateResponse},
};

use crate::Result;

/// The four operations the game server exposes.
///
/// `SessionController` only talks to the server through this trait, so it can
/// be driven by the HTTP client or by an in-memory implementation.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// Create a new game and return its id with the initial snapshot
    async fn start(&self, request: StartRequest) -> Result<StartResponse>;

    /// Drop a token for the player whose turn it is
    async fn make_move(&self, game_id: &str, column: usize) -> Result<StateResponse>;

    /// Let the server's opponent play its turn
    async fn ai_move(&self, game_id: &str) -> Result<StateResponse>;

    /// Read the current snapshot without changing anything
    async fn fetch_state(&self, game_id: &str) -> Result<GameState>;
}
