//! Error types for the messaging API client.
//!
//! # Design
//! A non-2xx response whose body parses as a `ServerError` surfaces as
//! `Server`, displayed as the server's reason text and nothing else. The
//! status code is not kept. Transport and decode failures pass the
//! underlying error through unchanged.

use std::error::Error as StdError;

use thiserror::Error;

use crate::types::ServerError;

/// Errors returned by `MessageClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be read.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The response body is not valid JSON for the expected entity.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The outgoing payload could not be serialized.
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// The server answered with a non-2xx status and an error payload.
    #[error(transparent)]
    Server(#[from] ServerError),
}

impl ApiError {
    pub fn transport(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        ApiError::Transport(err.into())
    }

    /// The server-supplied reason, if this is a `Server` error.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ApiError::Server(err) => Some(&err.reason),
            _ => None,
        }
    }
}
