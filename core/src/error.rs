//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because deleting or patching an id the
//! server no longer knows is the most common failure the page sees. All
//! other non-2xx responses land in `HttpError` with the raw status code and
//! body for the log line. `Transport` covers failures before any response
//! arrived (connection refused, reset, TLS).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}
