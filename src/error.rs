//! Crate-wide error taxonomy.
//!
//! Three families, handled differently by shells: validation errors are
//! caught before anything reaches the network, API errors carry the
//! server's own payload for display, and aborted calls are silent (the
//! view that asked is already gone).

use crate::api::ApiError;
use crate::storage::StorageError;
use crate::validate::ValidationError;

/// Stable machine-readable error codes for shell-side dispatch.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Errors produced by client flows.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Client-side validation rejected the input before submission.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The API gateway call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Durable token storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The call was cancelled by its owning view.
    #[error("request aborted by caller")]
    Aborted,
}

impl ErrorCode for ClientError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::Api(e) => e.error_code(),
            Self::Storage(_) => "E_STORAGE",
            Self::Aborted => "E_ABORTED",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.retryable(),
            Self::Validation(_) | Self::Storage(_) | Self::Aborted => false,
        }
    }
}

impl ClientError {
    /// Server-provided message for user-facing display, when one exists.
    ///
    /// Validation errors report the first field issue; API errors surface
    /// the backend's `message` payload untouched.
    #[must_use]
    pub fn display_message(&self) -> Option<String> {
        match self {
            Self::Validation(e) => e.issues.first().map(|i| i.message.clone()),
            Self::Api(e) => e.server_message(),
            Self::Storage(_) | Self::Aborted => None,
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
