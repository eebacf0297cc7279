//! Error types for client operations.

use std::fmt::{self, Display, Formatter};
use std::io;

use thiserror::Error;

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Session entry an operation needed but could not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionItem {
    /// Bearer token written at login.
    Token,
    /// User snapshot written at login or profile refresh.
    User,
}

impl Display for SessionItem {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token => formatter.write_str("token"),
            Self::User => formatter.write_str("user"),
        }
    }
}

/// Primary error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never reached the server (network, DNS, TLS, timeout).
    #[error("An error occurred: {source}")]
    Transport {
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("Server error: {status} - {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Detail extracted from the response body.
        message: String,
    },
    /// Expected local session data is absent.
    #[error("session {what} not found; log in first")]
    SessionMissing {
        /// Missing session entry.
        what: SessionItem,
    },
    /// Form input was rejected before any request was issued.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Offending form field.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },
    /// A success response did not match the expected shape.
    #[error("unexpected {what} payload from server")]
    Decode {
        /// Payload being decoded.
        what: &'static str,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// Persisting or removing a session entry failed.
    #[error("session storage {operation} failed for `{key}`")]
    Storage {
        /// Storage operation identifier.
        operation: &'static str,
        /// Storage key involved.
        key: &'static str,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Client configuration was invalid.
    #[error("invalid configuration: {detail}")]
    Config {
        /// Description of the problem.
        detail: String,
    },
}

impl ClientError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Whether the failure was caused by the caller rather than the remote side.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::SessionMissing { .. })
    }

    /// HTTP status for server-side failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_message_includes_status() {
        let err = ClientError::Server {
            status: 404,
            message: "User not found".to_string(),
        };
        assert_eq!(err.to_string(), "Server error: 404 - User not found");
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_user_error());
    }

    #[test]
    fn session_missing_is_a_user_error() {
        let err = ClientError::SessionMissing {
            what: SessionItem::Token,
        };
        assert_eq!(err.to_string(), "session token not found; log in first");
        assert!(err.is_user_error());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn validation_error_names_field() {
        let err = ClientError::validation("email", "must contain '@'");
        assert_eq!(err.to_string(), "invalid email: must contain '@'");
    }
}
