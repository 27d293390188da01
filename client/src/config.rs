use std::{env, path::PathBuf};

use tracing::debug;

pub const SERVER_URL_VAR: &str = "CONNECT4_SERVER_URL";
pub const LOG_FILE_VAR: &str = "CONNECT4_LOG_FILE";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Runtime settings of the client, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,
    /// Where the front end writes its log; no logging when unset
    pub log_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            log_file: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let server_url = lookup(SERVER_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let log_file = lookup(LOG_FILE_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        debug!("Using game server at {}", server_url);

        Self {
            server_url,
            log_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_variables() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn reads_server_url_and_log_file() {
        let config = ClientConfig::from_lookup(|key| match key {
            SERVER_URL_VAR => Some("https://power4.example.com".to_string()),
            LOG_FILE_VAR => Some("/tmp/connect4.log".to_string()),
            _ => None,
        });
        assert_eq!(config.server_url, "https://power4.example.com");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/connect4.log")));
    }

    #[test]
    fn blank_values_fall_back() {
        let config = ClientConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert!(config.log_file.is_none());
    }
}
