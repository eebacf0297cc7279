//! Error types for telemetry operations.

use thiserror::Error;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Errors raised by telemetry helpers.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Installing the tracing subscriber failed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying tracing subscriber error.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
    /// Requested log format name is not recognised.
    #[error("unknown log format `{value}`")]
    UnknownFormat {
        /// Format name supplied by the caller.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_mentions_value() {
        let err = TelemetryError::UnknownFormat {
            value: "xml".to_string(),
        };
        assert_eq!(err.to_string(), "unknown log format `xml`");
    }
}
