//! Custom error types for the client library
//!
//! This module defines the error taxonomy shared by every layer of the
//! client: transport failures, non-success HTTP statuses, credential
//! problems, client-side validation failures, and credential-file I/O.

use reqwest::StatusCode;
use thiserror::Error;

/// Custom error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network or protocol failure before a response was obtained
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status other than the expected one
    #[error("{message} ({status})")]
    Status { status: StatusCode, message: String },

    /// The bearer credential could not be decoded
    #[error("Invalid credential: {0}")]
    Token(String),

    /// A required form field is missing or malformed, caught before any
    /// network call
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The client configuration is incomplete
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing the persisted credential failed
    #[error("Credential storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    /// Build a `Status` error from a response status, carrying the status
    /// text the way the server would phrase it
    pub fn from_status(status: StatusCode) -> Self {
        let message = status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string();
        ClientError::Status { status, message }
    }

    /// True when the server reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::Status {
                status: StatusCode::NOT_FOUND,
                ..
            }
        )
    }
}

/// Type alias for Result with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
