use thiserror::Error;

use crate::{CancelAck, WireEvent};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("stream ended without a terminal event")]
    StreamEnded,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ApiError::Timeout(err.to_string());
        }
        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }
        ApiError::Transport(err.to_string())
    }
}

/// Results reported back by the engine thread, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JobStarted {
        session_id: String,
    },
    JobStartFailed {
        error: ApiError,
    },
    Stream {
        session_id: String,
        event: WireEvent,
    },
    StreamFailed {
        session_id: String,
        error: ApiError,
    },
    CancelCompleted {
        session_id: String,
        result: Result<CancelAck, ApiError>,
    },
    Health {
        reachable: bool,
    },
}
