use reqwest::StatusCode;

/// Errors returned by the game server client.
///
/// Two classes matter to callers: transport failures, where the request never
/// produced a usable HTTP exchange, and server failures, where the server
/// answered but not with something we can apply.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server rejected request ({status}): {message}")]
    Server { status: StatusCode, message: String },

    #[error("malformed response payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// Non-success statuses and undecodable bodies both count as server errors
    pub fn is_server(&self) -> bool {
        matches!(
            self,
            ClientError::Server { .. } | ClientError::MalformedPayload(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_display() {
        let err = ClientError::Server {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid or missing game_id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "server rejected request (400 Bad Request): Invalid or missing game_id"
        );
        assert!(err.is_server());
        assert!(!err.is_transport());
    }

    #[test]
    fn malformed_payload_is_a_server_error() {
        let err: ClientError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(err.is_server());
    }

    #[test]
    fn invalid_url_is_neither_class() {
        let err: ClientError = url::Url::parse("not a url").unwrap_err().into();
        assert!(!err.is_server());
        assert!(!err.is_transport());
    }
}
