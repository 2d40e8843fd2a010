//! Error types for DualLog
//!
//! This module defines all error types used throughout the DualLog facade.
//! Every failure of a log call is returned to the caller; nothing in the
//! dispatch path catches and re-logs its own errors.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for DualLog operations
#[derive(Error, Debug)]
pub enum DualLogError {
    /// A required argument was missing or blank
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Message template and arguments do not fit together
    #[error("Format error in template {template:?}: {reason}")]
    FormatError { template: String, reason: String },

    /// Appending to a log file failed
    #[error("Failed to write log file {}: {source}", path.display())]
    SinkWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The cause chain of an error is cyclic or deeper than allowed
    #[error("Malformed exception chain: {0}")]
    MalformedExceptionChain(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    ConfigFileMissing(String),

    /// Invalid log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Initialization errors
    #[error("Initialization error: {0}")]
    InitializationError(String),

    /// A structured sink rejected an event
    #[error("Sink error: {0}")]
    SinkError(String),

    /// I/O errors outside the file append path
    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlError {
        #[from]
        source: toml::de::Error,
    },
}

/// Result type alias for DualLog operations
pub type Result<T> = std::result::Result<T, DualLogError>;

impl DualLogError {
    /// Create a new contract violation
    pub fn contract<S: Into<String>>(msg: S) -> Self {
        Self::ContractViolation(msg.into())
    }

    /// Create a new format error for `template`
    pub fn format<T: Into<String>, R: Into<String>>(template: T, reason: R) -> Self {
        Self::FormatError {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an I/O failure that happened while appending to `path`
    pub fn sink_write<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::SinkWriteError {
            path: path.into(),
            source,
        }
    }

    /// Create a new malformed exception chain error
    pub fn malformed_chain<S: Into<String>>(msg: S) -> Self {
        Self::MalformedExceptionChain(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a new sink error
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        Self::SinkError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_error_creation() {
        let err = DualLogError::contract("message must not be blank");
        assert!(matches!(err, DualLogError::ContractViolation(_)));
        assert_eq!(
            err.to_string(),
            "Contract violation: message must not be blank"
        );

        let err = DualLogError::format("User {1}", "placeholder {1} has no argument");
        assert_eq!(
            err.to_string(),
            "Format error in template \"User {1}\": placeholder {1} has no argument"
        );
    }

    #[test]
    fn test_sink_write_keeps_source() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let err = DualLogError::sink_write("/var/log/app.log", io_error);

        let display = err.to_string();
        assert!(display.contains("/var/log/app.log"));
        assert!(display.contains("Access denied"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_from_conversions() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: DualLogError = io_error.into();
        assert!(matches!(err, DualLogError::IoError { .. }));

        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json").unwrap_err();
        let err: DualLogError = json_error.into();
        assert!(matches!(err, DualLogError::SerializationError { .. }));
    }

    #[test]
    fn test_unicode_error_message() {
        let unicode_msg = "消息不能为空 🚫";
        let err = DualLogError::contract(unicode_msg);
        assert!(err.to_string().contains(unicode_msg));
    }
}
