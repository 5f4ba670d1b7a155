//! Client error types.

use thiserror::Error;

/// Message shown when the API cannot be reached at all.
pub const FETCH_FAILURE_MESSAGE: &str =
    "Unable to reach the API. Check that the backend is running and VITE_API_BASE is correct.";

/// Display text of a transport failure.
const TRANSPORT_MESSAGE: &str = "Failed to fetch";

/// Client result alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Everything that can go wrong talking to the API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got a response.
    #[error("Failed to fetch")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("{message}")]
    Http {
        /// Status code.
        status: u16,
        /// Server `error` field, or a templated fallback.
        message: String,
    },

    /// The body did not have the expected shape.
    #[error("unexpected response from {operation}: {detail}")]
    Contract {
        /// Operation name, e.g. "fetch recipes".
        operation: &'static str,
        /// What was wrong.
        detail: String,
    },

    /// Input rejected before sending.
    #[error("{0}")]
    Validation(String),

    /// Session cookie could not be read.
    #[error("{0}")]
    Session(String),
}

impl ClientError {
    pub(crate) fn contract(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::Contract {
            operation,
            detail: detail.into(),
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for inline display.
    pub fn friendly_message(&self) -> String {
        friendly_error_message(&self.to_string())
    }
}

/// Replace the bare transport failure text with an actionable message and
/// pass everything else through.
pub fn friendly_error_message(message: &str) -> String {
    if message == TRANSPORT_MESSAGE {
        FETCH_FAILURE_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}
