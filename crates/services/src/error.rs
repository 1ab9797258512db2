//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuizDataError;

/// Errors emitted while retrieving a quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("quiz request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Payload(#[from] QuizDataError),
}

/// Errors emitted by a running session driver.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session driver is no longer running")]
    Closed,
    #[error("tick period must be > 0")]
    InvalidTickPeriod,
}
