//! Synchronous client for the palantir messaging API.
//!
//! # Overview
//! Fetches and creates messages addressed by a subject path segment under
//! `http://<host>/api/<API_VERSION>/`. Creating a message yields a `Ticket`;
//! failures reported by the server come back as a typed `ServerError`.
//!
//! # Design
//! - `MessageClient` holds only its base URL and a `Transport`.
//! - Each operation is also available as a pure `build_*` / `parse_*` pair,
//!   so the I/O boundary stays explicit and the protocol logic is testable
//!   without a network.
//! - `UreqTransport` is the default blocking transport.
//! - Timestamps travel as RFC 3339 strings with nanosecond precision and are
//!   parsed strictly.

pub mod client;
pub mod error;
pub mod http;
pub mod timestamp;
pub mod transport;
pub mod types;

pub use client::{MessageClient, API_VERSION};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use timestamp::{Timestamp, TimestampError};
pub use transport::{UreqTransport, DEFAULT_BODY_LIMIT};
pub use types::{Message, ServerError, Ticket, WireEntity};
