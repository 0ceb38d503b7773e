use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure surface of the client.
///
/// Network and protocol failures collapse into the single
/// [`Error::Request`] kind: at this layer a caller cannot distinguish "bad
/// credentials" from "network down", and the provider's envelope carries the
/// diagnostic detail either way.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied identifier failed its format check. No request was
    /// sent; this is never retried.
    #[error("invalid {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    /// An opaque token string or token payload could not be decoded.
    #[error("token decode failed: {0}")]
    TokenDecode(String),

    /// Terminal request failure: a non-200 response after at most one
    /// refresh-retry, or any transport/JSON error, with the original
    /// cause's message preserved.
    #[error("api request failed: {message}")]
    Request {
        message: String,
        track_id: Option<String>,
    },

    /// The operation needed a piece of client configuration that the
    /// builder was never given.
    #[error("missing client configuration: {0}")]
    Config(&'static str),
}
