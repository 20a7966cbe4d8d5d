//! Client configuration

use std::path::PathBuf;

use crate::error::{ClientError, ClientResult};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Flashy Cards API, without a trailing slash
    pub api_base_url: String,
    /// Path of the persisted credential file
    pub credential_path: PathBuf,
    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl ClientConfig {
    /// Create a new ClientConfig from environment variables
    ///
    /// # Environment Variables
    /// - `FLASHY_API_URL`: base URL of the API (required)
    /// - `FLASHY_CREDENTIAL_FILE`: credential file path
    ///   (default: `$HOME/.flashy/credential`)
    /// - `FLASHY_REQUEST_TIMEOUT`: request timeout in seconds (default: 30)
    pub fn from_env() -> ClientResult<Self> {
        let api_base_url = std::env::var("FLASHY_API_URL").map_err(|_| {
            ClientError::Config("FLASHY_API_URL environment variable not set".to_string())
        })?;

        let credential_path = std::env::var("FLASHY_CREDENTIAL_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_credential_path());

        let request_timeout = std::env::var("FLASHY_REQUEST_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(ClientConfig {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            credential_path,
            request_timeout,
        })
    }

    /// Build a configuration directly, mainly for tests
    pub fn new(api_base_url: impl Into<String>, credential_path: impl Into<PathBuf>) -> Self {
        let api_base_url: String = api_base_url.into();
        ClientConfig {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            credential_path: credential_path.into(),
            request_timeout: 30,
        }
    }

    fn default_credential_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".flashy").join("credential")
    }
}
