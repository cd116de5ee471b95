//! Console error types

use heron_client::ClientError;
use thiserror::Error;

/// Errors surfaced by console commands
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
