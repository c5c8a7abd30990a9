//! Error types for the tracker core library

use thiserror::Error;

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Main error type for tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    #[error("Unsupported export format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Invalid date {date}: {reason}")]
    InvalidDate { date: String, reason: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {message}")]
    Xml { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Failed to save artifact: {message}")]
    Sink { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Unknown error: {message}")]
    Unknown { message: String },
}

impl TrackerError {
    /// Create a malformed input error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(date: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            date: date.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an XML writer error
    pub fn xml(message: impl ToString) -> Self {
        Self::Xml {
            message: message.to_string(),
        }
    }

    /// Create an artifact sink error
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unknown error
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Whether the caller supplied bad data, as opposed to an environment failure
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput { .. } | Self::UnsupportedFormat { .. } | Self::InvalidDate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_serialization_error_from_serde() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error: TrackerError = json_error.into();

        match error {
            TrackerError::Serialization(_) => (),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_io_error_from_std() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: TrackerError = io_error.into();

        match error {
            TrackerError::Io(_) => (),
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_malformed_helper() {
        let error = TrackerError::malformed("project title is required");

        match &error {
            TrackerError::MalformedInput { message } => {
                assert_eq!(message, "project title is required");
            }
            _ => panic!("Expected MalformedInput error"),
        }
        assert!(error.to_string().contains("Malformed input"));
        assert!(error.is_input_error());
    }

    #[test]
    fn test_unsupported_format_helper() {
        let error = TrackerError::unsupported_format("pdf");
        assert_eq!(error.to_string(), "Unsupported export format: pdf");
        assert!(error.is_input_error());
    }

    #[test]
    fn test_invalid_date_helper() {
        let error = TrackerError::invalid_date("2023-13-45", "month out of range");
        assert!(error.to_string().contains("2023-13-45"));
        assert!(error.to_string().contains("month out of range"));
    }

    #[test]
    fn test_not_found_display() {
        let error = TrackerError::NotFound {
            entity: "Project",
            id: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "Project not found: abc");
        assert!(!error.is_input_error());
    }

    #[test]
    fn test_environment_errors_are_not_input_errors() {
        let errors = vec![
            TrackerError::Timeout { seconds: 5 },
            TrackerError::sink("disk full"),
            TrackerError::configuration("bad view"),
            TrackerError::xml("unexpected end"),
            TrackerError::unknown("boom"),
        ];

        for error in errors {
            assert!(!error.is_input_error());
            assert!(error.to_string().len() > 10);
        }
    }
}
