//! Error types for updateguide.
//!
//! This module defines all error types used throughout the updateguide crate.
//! Resolution failures are ordinary values here: the page layer decides whether
//! to surface them, and nothing is ever fatal past a selection event.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for updateguide operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Resolution Errors ===
    /// No board in the catalog carries the requested name.
    #[error("board not found: '{name}'")]
    BoardNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The URL carries no value for the board query parameter.
    #[error("query parameter '{param}' not present in URL")]
    MissingQueryParameter {
        /// Name of the query parameter that was looked for.
        param: String,
    },

    /// A version label was picked that the selected board does not offer.
    #[error("board '{board}' has no firmware version '{label}'")]
    UnknownFirmwareVersion {
        /// The selected board.
        board: String,
        /// The requested version label.
        label: String,
    },

    // === Catalog Errors ===
    /// A catalog record is missing required data.
    #[error("malformed record #{index} ({name}): {reason}")]
    MalformedRecord {
        /// Position of the record in the raw catalog.
        index: usize,
        /// The record's name, or `<unnamed>` when it has none.
        name: String,
        /// What is wrong with the record.
        reason: String,
    },

    /// Two records share the same name and duplicates are rejected.
    #[error("duplicate board name '{name}' at records #{first} and #{second}")]
    DuplicateBoard {
        /// The shared name.
        name: String,
        /// Index of the first occurrence.
        first: usize,
        /// Index of the repeated occurrence.
        second: usize,
    },

    /// The catalog document is structurally unusable.
    #[error("invalid catalog: {message}")]
    InvalidCatalog {
        /// Description of the problem.
        message: String,
    },

    /// Failed to read a catalog file.
    #[error("failed to read catalog at {path}: {source}")]
    CatalogRead {
        /// Path to the catalog file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for updateguide operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a board-not-found error.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::BoardNotFound { name: name.into() }
    }

    /// Create a malformed record error.
    #[must_use]
    pub fn malformed(index: usize, name: Option<&str>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            index,
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or("<unnamed>")
                .to_string(),
            reason: reason.into(),
        }
    }

    /// Create an invalid catalog error.
    #[must_use]
    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            message: message.into(),
        }
    }

    /// Check if this error is the "nothing to show" outcome of a lookup.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BoardNotFound { .. } | Self::MissingQueryParameter { .. }
        )
    }

    /// Check if this error concerns a single catalog record.
    #[must_use]
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("FRDM-K64F");
        assert_eq!(err.to_string(), "board not found: 'FRDM-K64F'");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_query_parameter_is_not_found() {
        let err = Error::MissingQueryParameter {
            param: "board".to_string(),
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("board"));
    }

    #[test]
    fn test_malformed_named() {
        let err = Error::malformed(3, Some("LPC1768"), "missing product_code");
        assert_eq!(
            err.to_string(),
            "malformed record #3 (LPC1768): missing product_code"
        );
        assert!(err.is_malformed_record());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_malformed_unnamed() {
        let err = Error::malformed(0, Some(""), "missing name");
        assert!(err.to_string().contains("<unnamed>"));

        let err = Error::malformed(1, None, "missing name");
        assert!(err.to_string().contains("<unnamed>"));
    }

    #[test]
    fn test_duplicate_board_display() {
        let err = Error::DuplicateBoard {
            name: "K20D50M".to_string(),
            first: 1,
            second: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("K20D50M"));
        assert!(msg.contains("#1"));
        assert!(msg.contains("#4"));
    }

    #[test]
    fn test_unknown_firmware_version_display() {
        let err = Error::UnknownFirmwareVersion {
            board: "micro:bit".to_string(),
            label: "9.9".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("micro:bit"));
        assert!(msg.contains("9.9"));
    }

    #[test]
    fn test_invalid_catalog() {
        let err = Error::invalid_catalog("expected an array");
        assert_eq!(err.to_string(), "invalid catalog: expected an array");
    }

    #[test]
    fn test_catalog_read_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::CatalogRead {
            path: PathBuf::from("/nonexistent/catalog.json"),
            source: io_err,
        };
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "query_param must not be empty".to_string(),
        };
        assert!(err.to_string().contains("query_param"));
    }
}
