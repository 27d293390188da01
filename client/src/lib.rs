//! Connect Four Client Library
//!
//! This library talks to a Connect Four game server over HTTP. The server owns
//! the rules, the AI opponent and the timing; the client keeps the latest
//! snapshot of one game and decides when to ask for what.
//!
//! ## Usage
//!
//! ### High-Level Interface (Recommended)
//!
//! `SessionController` owns the live game, guards against illegal requests and
//! plays the AI's turns automatically:
//!
//! ```rust,no_run
//! use connect4_client::{Connect4Client, Difficulty, Mode, SessionController, Transition};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let client = Connect4Client::new("http://localhost:5000")?;
//!     let mut session = SessionController::new(client);
//!
//!     session.begin_session(Mode::Ai, "Alice", "", Difficulty::Easy);
//!     session.settle().await;
//!
//!     session.submit_move(3);
//!     while session.is_awaiting_response() {
//!         if let Some(Transition::Failed(error)) = session.settle().await {
//!             return Err(error.into());
//!         }
//!     }
//!
//!     if let Some(board) = session.board_view() {
//!         println!("{}", board);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Low-Level Interface
//!
//! For more control, call the server directly through `Connect4Client` and the
//! `GameApi` trait:
//!
//! ```rust,no_run
//! use connect4_client::{Connect4Client, Difficulty, GameApi, Mode, StartRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let client = Connect4Client::new("http://localhost:5000")?;
//!     let request = StartRequest::new(Mode::Pvp, "Alice", "Bob", Difficulty::Hard);
//!     let started = client.start(request).await?;
//!
//!     let moved = client.make_move(&started.game_id, 3).await?;
//!     println!("{} to play", moved.state.current_player);
//!     Ok(())
//! }
//! ```

mod api;
mod board;
mod client;
mod config;
mod error;
mod session;

pub use api::GameApi;
pub use board::{BoardView, CellView};
pub use client::Connect4Client;
pub use config::{ClientConfig, DEFAULT_SERVER_URL, LOG_FILE_VAR, SERVER_URL_VAR};
pub use error::ClientError;
pub use session::{Session, SessionController, Transition};

// Re-export common types for convenience
pub use connect4_common::{models::*, protocol::*};

pub type Result<T> = std::result::Result<T, ClientError>;
