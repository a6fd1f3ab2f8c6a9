//! Error types for the category API client.
//!
//! # Design
//! Every non-2xx response lands in `HttpError` with the raw status and body;
//! callers surface all request failures the same way, so no status gets a
//! dedicated variant. Client-side form problems are `ValidationError`s and
//! never reach the network.

use thiserror::Error;

use crate::validation::ValidationError;

/// Failure to complete an HTTP round-trip at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// Errors returned by `CategoryClient` parse methods and session lookups.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// An authenticated call was attempted without a stored token.
    #[error("not signed in")]
    NotSignedIn,

    /// A text id that cannot be placed in a URL path as-is.
    #[error("invalid category id: {0:?}")]
    InvalidId(String),

    #[error("invalid input: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<Vec<ValidationError>> for ApiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ApiError::Validation(errors)
    }
}

/// Errors from a `SessionStore` backend.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage unavailable: {0}")]
    Storage(String),

    #[error("session storage is corrupt: {0}")]
    Corrupt(String),

    #[error("refusing to store a blank session token")]
    BlankToken,
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
