//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{FailureKind, ImageRefError, QuestionError};

/// Errors emitted by the question and image providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("provider request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("provider rejected the request with response code {0}")]
    ResponseCode(u8),
    #[error("malformed provider payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Image(#[from] ImageRefError),
}

impl ProviderError {
    /// Collapse into the failure kind recorded on the session snapshot.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderError::Transport(_) => FailureKind::Transport,
            ProviderError::HttpStatus(_) | ProviderError::ResponseCode(_) => FailureKind::Protocol,
            ProviderError::Decode(_) | ProviderError::Question(_) | ProviderError::Image(_) => {
                FailureKind::Parse
            }
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
