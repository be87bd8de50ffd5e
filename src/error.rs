//! Error types for Docker Engine API operations.
//!
//! The taxonomy separates the three ways a call can fail: the caller passed
//! contradictory arguments (no I/O happens), the daemon answered with a
//! non-2xx status, or the exchange itself broke down in the transport.

use thiserror::Error;

/// Errors that can occur while talking to the Docker daemon.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Caller-supplied arguments were contradictory. Raised before any
    /// network call is made.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The daemon answered with a non-2xx status. `message` carries the
    /// `message` field of the daemon's JSON error body, or the raw body
    /// verbatim if it was not in the documented shape.
    #[error("daemon returned {status}: {message}")]
    Daemon { status: u16, message: String },

    /// The HTTP exchange failed below the API layer (connection refused,
    /// DNS failure, protocol error).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response body could not be decoded into the expected shape.
    #[error("failed to decode daemon response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl EngineError {
    /// Status code of a daemon-reported error, if that is what this is.
    pub fn daemon_status(&self) -> Option<u16> {
        match self {
            EngineError::Daemon { status, .. } => Some(*status),
            _ => None,
        }
    }
}
