//! Error types for the Attendance Interpretation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only genuinely missing required inputs surface as hard errors; business
//! rule edge cases degrade into [`RunWarning`](crate::models::RunWarning)
//! values instead.

use thiserror::Error;

/// The main error type for the Attendance Interpretation Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/company.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/company.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A shift rule group references an output column that is not declared
    /// in the company configuration.
    #[error("Shift group '{group}' references undeclared output column '{column}'")]
    UndeclaredColumn {
        /// The shift group (or special-column section) holding the reference.
        group: String,
        /// The column name that is not declared.
        column: String,
    },

    /// A shift rule group declares more than one catch-all overtime rule.
    #[error("Shift group '{group}' declares more than one catch-all overtime rule")]
    DuplicateCatchAll {
        /// The offending shift group.
        group: String,
    },

    /// A snapshot file could not be written.
    #[error("Failed to write snapshot '{path}': {message}")]
    SnapshotWriteError {
        /// The snapshot path.
        path: String,
        /// A description of the I/O or serialization failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/company.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/company.yaml"
        );
    }

    #[test]
    fn test_undeclared_column_displays_group_and_column() {
        let error = EngineError::UndeclaredColumn {
            group: "day-shift".to_string(),
            column: "FM-Nrml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Shift group 'day-shift' references undeclared output column 'FM-Nrml'"
        );
    }

    #[test]
    fn test_duplicate_catch_all_displays_group() {
        let error = EngineError::DuplicateCatchAll {
            group: "night-shift".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Shift group 'night-shift' declares more than one catch-all overtime rule"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
