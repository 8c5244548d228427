//! Failure type shared by every translation backend.

use thiserror::Error;

/// A final, already-retried failure to produce a schema-conforming value.
///
/// The request loop treats all variants the same way: the failure is
/// reported for the current line and the session moves on.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// The endpoint could not be reached or the connection broke mid-stream.
    #[error("failed to reach {url}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// The endpoint answered with a non-success status.
    #[error("API request failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The model produced no text at all.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// The reply never validated against the target schema.
    #[error("response did not match {type_name} after {attempts} attempt(s): {message}")]
    Validation {
        /// Target schema type name.
        type_name: &'static str,
        /// Number of completions that were validated.
        attempts: usize,
        /// Last validation error.
        message: String,
    },
}

impl TranslationError {
    /// Returns `true` when retrying the same request may succeed.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::EmptyResponse | Self::Validation { .. } => false,
        }
    }
}
