//! Error types for body accumulation.

use thiserror::Error;

/// A boxed transport error, kept intact so callers can downcast to the
/// concrete failure reported by the underlying client.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for accumulation operations.
pub type BodyResult<T> = Result<T, Error>;

/// Errors that can settle a pending body result.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport failed before the body completed. The cause is carried
    /// unchanged from the delivery mechanism.
    #[error("body delivery failed: {0}")]
    Stream(BoxError),

    /// The accumulated body is not valid JSON.
    #[error("body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The accumulated body contains byte sequences that are invalid in the
    /// selected text encoding.
    #[error("body is not valid {charset} text")]
    TextDecode { charset: String },

    /// A consumer was registered after the body had already been handed to
    /// another consumer.
    #[error("body was already delivered to another consumer")]
    AlreadyDelivered,

    /// The transport discarded the consumer without a terminal signal.
    #[error("body delivery ended without completion or failure")]
    Abandoned,
}

impl Error {
    /// Wrap a transport failure, preserving it for downcasting.
    pub fn stream(cause: impl Into<BoxError>) -> Self {
        Error::Stream(cause.into())
    }
}
