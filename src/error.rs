//! Typed failures surfaced by the protocol codec and the client driver.

use thiserror::Error;

/// Failure to make sense of raw message bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("message is empty")]
    Empty,

    #[error("malformed status line: {0:?}")]
    MalformedStatusLine(String),

    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
}

/// Failure of a single client request. Nothing is retried.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection failed: {0}")]
    Connection(#[source] std::io::Error),

    #[error("timed out after {0} seconds")]
    Timeout(u64),

    #[error("empty response received")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    MalformedResponse(#[from] DecodeError),

    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
