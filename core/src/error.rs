//! Error types for the management API client and the repository on top of it.
//!
//! # Design
//! `NotFound` and `Unauthorized` get dedicated variants because callers
//! distinguish "no such process model" and "the endpoint rejected the token"
//! from other unexpected statuses. Everything else that comes back non-2xx
//! lands in `HttpError` with the raw status and body. The repository never
//! wraps these; whatever the client returns reaches the caller as-is.

use thiserror::Error;

/// Errors returned by `ManagementClient` and the repository operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested process model does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 401 or 403 for the supplied context.
    #[error("unauthorized (HTTP {status})")]
    Unauthorized { status: u16 },

    /// The server returned a non-2xx status not covered above.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The transport could not complete the round-trip (endpoint unreachable,
    /// connection reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
