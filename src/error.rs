//! Errors raised by a [`RepoService`](crate::RepoService) lookup.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the repository API.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("username not found")]
    NotFound,

    #[error("not a valid GitHub username: '{0}'")]
    InvalidUsername(String),

    #[error("API error: {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(reqwest::Error),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// How a failed page lookup is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The username does not exist; the user can fix this.
    NotFound,
    /// Anything else (network, server, decoding).
    Other,
}

impl ServiceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ServiceError::NotFound | ServiceError::InvalidUsername(_) => FailureKind::NotFound,
            ServiceError::Status(status) if *status == StatusCode::NOT_FOUND => {
                FailureKind::NotFound
            }
            _ => FailureKind::Other,
        }
    }
}
