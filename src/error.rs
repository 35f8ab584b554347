//! Error types for TinyQueue.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed request input. Never reaches the store.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No message could be claimed within the wait budget.
    #[error("No message available")]
    NotAvailable,

    /// A claimed message could not be written back to the caller.
    /// The message is gone at this point; it is not requeued.
    #[error("Transport write error: {0}")]
    TransportWrite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
