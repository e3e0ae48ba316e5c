//! Client for the messaging API.
//!
//! # Design
//! `MessageClient` holds only its base URL and a transport, and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`; `get_message` and `create_message` glue the
//! two together through the transport.
//!
//! Responses are first decoded into a `Reply` chosen by status class (2xx
//! decodes the success entity, anything else decodes a `ServerError`), and
//! only then flattened into a `Result`.

use tracing::warn;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::transport::UreqTransport;
use crate::types::{Message, ServerError, Ticket, WireEntity};

/// API revision compiled into every request path.
pub const API_VERSION: &str = "v1";

/// Synchronous client for `http://<host>/api/<API_VERSION>/<subject>`.
///
/// Safe to share between threads when the transport is; the default
/// `UreqTransport` is.
#[derive(Debug, Clone)]
pub struct MessageClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl MessageClient {
    /// Client for `host` (e.g. `"localhost:8080"`) over the default transport.
    ///
    /// The host is not validated; a bad one fails on the first request.
    pub fn new(host: &str) -> Self {
        Self::with_transport(host, UreqTransport::new())
    }
}

impl<T> MessageClient<T> {
    pub fn with_transport(host: &str, transport: T) -> Self {
        Self {
            base_url: format!("http://{host}/api/{API_VERSION}"),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, subject: &str) -> String {
        format!("{}/{subject}", self.base_url)
    }

    pub fn build_get_message(&self, subject: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(subject),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_message(
        &self,
        subject: &str,
        message: &Message,
    ) -> Result<HttpRequest, ApiError> {
        let body = message.encode().map_err(ApiError::Encode)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url(subject),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_get_message(&self, response: HttpResponse) -> Result<Message, ApiError> {
        decode_reply(&response)?.into_result()
    }

    pub fn parse_create_message(&self, response: HttpResponse) -> Result<Ticket, ApiError> {
        decode_reply(&response)?.into_result()
    }
}

impl<T: Transport> MessageClient<T> {
    /// Fetch the message stored under `subject`.
    pub fn get_message(&self, subject: &str) -> Result<Message, ApiError> {
        let response = self.transport.execute(self.build_get_message(subject))?;
        self.parse_get_message(response)
    }

    /// Post `message` under `subject` and return the server's ticket.
    pub fn create_message(&self, subject: &str, message: &Message) -> Result<Ticket, ApiError> {
        let request = self.build_create_message(subject, message)?;
        let response = self.transport.execute(request)?;
        self.parse_create_message(response)
    }
}

/// A response body decoded according to its status class.
#[derive(Debug)]
enum Reply<T> {
    Success(T),
    Failure(ServerError),
}

impl<T> Reply<T> {
    fn into_result(self) -> Result<T, ApiError> {
        match self {
            Reply::Success(value) => Ok(value),
            Reply::Failure(err) => Err(ApiError::Server(err)),
        }
    }
}

fn decode_reply<T: WireEntity>(response: &HttpResponse) -> Result<Reply<T>, ApiError> {
    if response.is_success() {
        return T::decode(&response.body)
            .map(Reply::Success)
            .map_err(ApiError::Decode);
    }
    warn!(status = response.status, "server returned an error status");
    ServerError::decode(&response.body)
        .map(Reply::Failure)
        .map_err(ApiError::Decode)
}
