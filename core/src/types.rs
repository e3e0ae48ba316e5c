//! Wire entities of the messaging API.
//!
//! # Design
//! These are flat value records with no references between them. Absent
//! string fields decode to empty strings; an absent or null `created_at`
//! decodes to `None` and `None` is never written to the wire.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timestamp::Timestamp;

/// JSON encode/decode shared by every wire entity.
pub trait WireEntity: Serialize + DeserializeOwned {
    fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Like `encode`, for callers where a failure means a broken invariant.
    ///
    /// # Panics
    /// Panics if the value cannot be represented as JSON.
    fn encode_or_abort(&self) -> Vec<u8> {
        self.encode()
            .unwrap_or_else(|e| panic!("wire entity failed to encode: {e}"))
    }

    fn decode(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw)
    }
}

/// A message posted under a subject.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Message {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Message {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            created_at: None,
        }
    }

    /// Same message stamped with `created_at`.
    pub fn with_created_at(mut self, at: Timestamp) -> Self {
        self.created_at = Some(at);
        self
    }
}

/// Identifier the server hands back after a message is created.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct Ticket {
    pub id: String,
}

/// Failure payload sent by the server with a non-2xx status.
///
/// Displays as the bare reason text. Any JSON object decodes; a missing
/// field leaves the reason empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Error)]
#[error("{reason}")]
#[serde(default)]
pub struct ServerError {
    #[serde(rename = "error", alias = "reason")]
    pub reason: String,
}

impl WireEntity for Message {}
impl WireEntity for Ticket {}
impl WireEntity for ServerError {}
