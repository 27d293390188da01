use std::sync::Arc;

use connect4_common::{
    models::{AI_PLAYER, Difficulty, GameState, Mode},
    protocol::{StartRequest, StartResponse, StateResponse},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{BoardView, ClientError, GameApi, Result};

/// One game on the server. Replaced as a whole when a new game starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub player1: String,
    pub player2: String,
}

impl Session {
    pub fn is_ai(&self) -> bool {
        self.mode == Mode::Ai
    }

    pub fn players(&self) -> [&str; 2] {
        [&self.player1, &self.player2]
    }
}

/// What the controller did with a completed request
#[derive(Debug)]
pub enum Transition {
    /// A new session and its first snapshot are live
    Started,
    /// The snapshot was replaced and the game goes on
    Updated,
    /// The snapshot was replaced and the game is over; `None` means a draw
    Finished { winner: Option<String> },
    /// The response belonged to a superseded request and was dropped
    Stale,
    /// The request failed, the previous snapshot is still live
    Failed(ClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Move { column: usize },
    AiMove,
    Fetch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    game_id: String,
    kind: RequestKind,
}

enum Outcome {
    Started {
        request: StartRequest,
        result: Result<StartResponse>,
    },
    State {
        game_id: String,
        kind: RequestKind,
        result: Result<StateResponse>,
    },
}

/// A finished request, tagged with the epoch it was issued in
struct Completion {
    epoch: u64,
    outcome: Outcome,
}

/// Owns the live session and snapshot and sequences every request to the
/// server, including the automatic turns of the AI opponent.
///
/// Requests run as spawned tasks and report back over a channel; nothing
/// changes until [`SessionController::settle`] applies a completion. Each
/// `begin_session` bumps the epoch, so responses issued for an older session
/// are recognised and dropped. Within a session at most one request is
/// outstanding. Must be used from within a tokio runtime.
pub struct SessionController<A> {
    api: Arc<A>,
    session: Option<Session>,
    state: Option<GameState>,
    loading: bool,
    last_error: Option<String>,
    epoch: u64,
    pending: Option<Pending>,
    completion_sender: mpsc::UnboundedSender<Completion>,
    completion_receiver: mpsc::UnboundedReceiver<Completion>,
}

impl<A: GameApi + 'static> SessionController<A> {
    pub fn new(api: A) -> Self {
        let (completion_sender, completion_receiver) = mpsc::unbounded_channel();
        Self {
            api: Arc::new(api),
            session: None,
            state: None,
            loading: false,
            last_error: None,
            epoch: 0,
            pending: None,
            completion_sender,
            completion_receiver,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// True while a start request is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True while any request issued by this controller is still current
    pub fn is_awaiting_response(&self) -> bool {
        self.loading || self.pending.is_some()
    }

    pub fn board_view(&self) -> Option<BoardView> {
        self.state.as_ref().map(BoardView::from_state)
    }

    /// Start a new game. Anything still in flight for the previous session
    /// becomes stale.
    pub fn begin_session(
        &mut self,
        mode: Mode,
        player1: &str,
        player2: &str,
        difficulty: Difficulty,
    ) {
        let request = StartRequest::new(mode, player1, player2, difficulty);
        info!(
            "Starting {} game: {} vs {} ({})",
            request.mode, request.player1, request.player2, request.difficulty
        );

        self.invalidate_inflight();
        self.loading = true;
        self.last_error = None;

        let api = Arc::clone(&self.api);
        let sender = self.completion_sender.clone();
        let epoch = self.epoch;
        tokio::spawn(async move {
            let result = api.start(request.clone()).await;
            let completion = Completion {
                epoch,
                outcome: Outcome::Started { request, result },
            };
            if sender.send(completion).is_err() {
                debug!("Controller dropped before the start request completed");
            }
        });
    }

    /// Play a column for the human whose turn it is.
    ///
    /// Moves that cannot be legal right now are ignored without contacting
    /// the server. Returns whether a request was dispatched.
    pub fn submit_move(&mut self, column: usize) -> bool {
        let (Some(session), Some(state)) = (&self.session, &self.state) else {
            debug!("Ignoring move in column {}: no active game", column);
            return false;
        };
        if self.loading {
            debug!("Ignoring move in column {}: a new game is starting", column);
            return false;
        }
        if state.game_over {
            debug!("Ignoring move in column {}: game is over", column);
            return false;
        }
        if self.pending.is_some() {
            debug!("Ignoring move in column {}: request outstanding", column);
            return false;
        }
        if session.is_ai() && state.is_turn_of(AI_PLAYER) {
            debug!("Ignoring move in column {}: waiting for the AI", column);
            return false;
        }
        if column >= state.columns() {
            debug!("Ignoring move in column {}: outside the board", column);
            return false;
        }

        let game_id = session.id.clone();
        self.dispatch(game_id, RequestKind::Move { column });
        true
    }

    /// Re-read the snapshot of the active game. Used to recover after a
    /// failed request; the fetched state goes through the turn sequencer
    /// like any other.
    pub fn resync(&mut self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        if self.loading || self.pending.is_some() {
            debug!("Skipping resync: request outstanding");
            return false;
        }

        let game_id = session.id.clone();
        self.dispatch(game_id, RequestKind::Fetch);
        true
    }

    /// Wait for the next completed request and apply it
    pub async fn settle(&mut self) -> Option<Transition> {
        let completion = self.completion_receiver.recv().await?;
        Some(self.apply(completion))
    }

    /// Apply a completed request if one is ready, without waiting
    pub fn try_settle(&mut self) -> Option<Transition> {
        let completion = self.completion_receiver.try_recv().ok()?;
        Some(self.apply(completion))
    }

    fn apply(&mut self, completion: Completion) -> Transition {
        if completion.epoch != self.epoch {
            warn!(
                "Discarding response from superseded session (epoch {} < {})",
                completion.epoch, self.epoch
            );
            return Transition::Stale;
        }

        match completion.outcome {
            Outcome::Started { request, result } => self.apply_start(request, result),
            Outcome::State {
                game_id,
                kind,
                result,
            } => self.apply_state(game_id, kind, result),
        }
    }

    fn apply_start(
        &mut self,
        request: StartRequest,
        result: Result<StartResponse>,
    ) -> Transition {
        self.loading = false;

        match result {
            Ok(response) => {
                info!("Game {} started", response.game_id);
                let session = Session {
                    id: response.game_id,
                    mode: request.mode,
                    difficulty: request.difficulty,
                    player1: request.player1,
                    player2: request.player2,
                };
                self.replace_session(session, response.state);
                self.evaluate_turn();
                Transition::Started
            }
            Err(error) => {
                // The previous game stays live, but its in-flight requests
                // were dropped when this start was issued
                let transition = self.fail(error);
                self.evaluate_turn();
                transition
            }
        }
    }

    fn apply_state(
        &mut self,
        game_id: String,
        kind: RequestKind,
        result: Result<StateResponse>,
    ) -> Transition {
        let current = Pending { game_id, kind };
        if self.pending.as_ref() != Some(&current) {
            warn!(
                "Discarding {:?} response for game {}: no longer pending",
                current.kind, current.game_id
            );
            return Transition::Stale;
        }
        self.pending = None;

        let response = match result {
            Ok(response) => response,
            Err(error) => return self.fail(error),
        };
        if let Some(verdict) = &response.result {
            debug!("Server verdict for {:?}: {}", kind, verdict);
        }

        self.last_error = None;
        let state = response.state;
        let transition = if state.game_over {
            match &state.winner {
                Some(winner) => info!("Game {} won by {}", current.game_id, winner),
                None => info!("Game {} ended in a draw", current.game_id),
            }
            Transition::Finished {
                winner: state.winner.clone(),
            }
        } else {
            debug!("Game {}: {} to play", current.game_id, state.current_player);
            Transition::Updated
        };

        self.state = Some(state);
        self.evaluate_turn();
        transition
    }

    fn fail(&mut self, error: ClientError) -> Transition {
        warn!("Request failed: {}", error);
        self.last_error = Some(error.to_string());
        Transition::Failed(error)
    }

    /// Swap in a new session together with its first snapshot
    fn replace_session(&mut self, session: Session, state: GameState) {
        self.pending = None;
        self.session = Some(session);
        self.state = Some(state);
    }

    fn invalidate_inflight(&mut self) {
        self.epoch += 1;
        self.pending = None;
    }

    /// Request the AI's move if the live snapshot says it is its turn
    fn evaluate_turn(&mut self) {
        let (Some(session), Some(state)) = (&self.session, &self.state) else {
            return;
        };
        if !session.is_ai() || state.game_over || !state.is_turn_of(AI_PLAYER) {
            return;
        }
        if self.pending.is_some() {
            debug!("AI move for game {} already requested", session.id);
            return;
        }

        let game_id = session.id.clone();
        debug!("Requesting AI move for game {}", game_id);
        self.dispatch(game_id, RequestKind::AiMove);
    }

    fn dispatch(&mut self, game_id: String, kind: RequestKind) {
        self.pending = Some(Pending {
            game_id: game_id.clone(),
            kind,
        });

        let api = Arc::clone(&self.api);
        let sender = self.completion_sender.clone();
        let epoch = self.epoch;
        tokio::spawn(async move {
            let result = match kind {
                RequestKind::Move { column } => api.make_move(&game_id, column).await,
                RequestKind::AiMove => api.ai_move(&game_id).await,
                RequestKind::Fetch => api
                    .fetch_state(&game_id)
                    .await
                    .map(|state| StateResponse {
                        state,
                        result: None,
                    }),
            };
            let completion = Completion {
                epoch,
                outcome: Outcome::State {
                    game_id,
                    kind,
                    result,
                },
            };
            if sender.send(completion).is_err() {
                debug!("Controller dropped before the {:?} request completed", kind);
            }
        });
    }
}
