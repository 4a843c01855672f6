//! Error handling for the serial scope
//!
//! This module defines the crate-wide error type and a Result alias.
//! Every error the acquisition loop can hit is recoverable by policy;
//! only configuration errors are surfaced at startup.

use thiserror::Error;

/// Main error type for scope operations
#[derive(Error, Debug)]
pub enum ScopeError {
    /// Errors raised by the serial port layer (typically at connect time)
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// Transport errors on an established connection (read timeout, EOF, ...)
    #[error("Transport error: {0}")]
    Io(#[from] std::io::Error),

    /// A read token could not be decoded as a numeric sample
    #[error("Unparseable sample token: {token:?}")]
    Parse {
        /// The offending token, trimmed
        token: String,
    },

    /// Errors related to configuration loading/validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// A read was attempted without an open port
    #[error("Serial port is not connected")]
    Disconnected,
}

/// Result type alias for scope operations
pub type Result<T> = std::result::Result<T, ScopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ScopeError::Parse {
            token: "garbage".to_string(),
        };
        assert_eq!(err.to_string(), "Unparseable sample token: \"garbage\"");
    }

    #[test]
    fn test_config_error_display() {
        let err = ScopeError::Config("sample period must be non-zero".to_string());
        assert!(err.to_string().contains("sample period"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out");
        let err: ScopeError = io.into();
        assert!(matches!(err, ScopeError::Io(_)));
    }
}
