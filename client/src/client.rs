use async_trait::async_trait;
use connect4_common::{
    models::GameState,
    protocol::{
        AiMoveRequest, ErrorResponse, MoveRequest, StartRequest, StartResponse, StateEnvelope,
        StateResponse,
    },
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::{ClientError, GameApi, Result};

/// HTTP client for the Connect Four server API
#[derive(Debug)]
pub struct Connect4Client {
    client: Client,
    base_url: Url,
}

impl Connect4Client {
    /// Create a new client connecting to the specified server URL
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Routes are joined relative to the base, which needs a trailing slash
        // to keep any path prefix the server is mounted under.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::new();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn route(&self, route: &str) -> Result<Url> {
        Ok(self.base_url.join(route)?)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Server answered {} with {} bytes", status, body.len());
        decode(status, &body)
    }
}

/// Turn a raw HTTP exchange into a typed payload or a server error
fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|response| response.error)
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(ClientError::Server { status, message });
    }

    Ok(serde_json::from_str(body)?)
}

#[async_trait]
impl GameApi for Connect4Client {
    #[instrument(level = "debug", skip(self), fields(mode = %request.mode, difficulty = %request.difficulty))]
    async fn start(&self, request: StartRequest) -> Result<StartResponse> {
        let url = self.route("start")?;
        self.send(self.client.post(url).json(&request)).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn make_move(&self, game_id: &str, column: usize) -> Result<StateResponse> {
        let url = self.route("move")?;
        let body = MoveRequest {
            game_id: game_id.to_string(),
            column,
        };
        self.send(self.client.post(url).json(&body)).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn ai_move(&self, game_id: &str) -> Result<StateResponse> {
        let url = self.route("ai-move")?;
        let body = AiMoveRequest {
            game_id: game_id.to_string(),
        };
        self.send(self.client.post(url).json(&body)).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn fetch_state(&self, game_id: &str) -> Result<GameState> {
        let mut url = self.route("state")?;
        url.query_pairs_mut().append_pair("game_id", game_id);
        let envelope: StateEnvelope = self.send(self.client.get(url)).await?;
        Ok(envelope.into_state())
    }
}
