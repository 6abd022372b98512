//! Error types for the invoice computation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building an invoice.
//!
//! Two conditions deliberately do NOT appear here: a project that cannot be
//! classified stays in the ledger under the `Unassigned` company, and a zero
//! billable-hours denominator falls back to the documented 50/50 quota. Both
//! degrade gracefully instead of aborting the run.

use thiserror::Error;

/// The main error type for the invoice computation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use invoice_engine::error::EngineError;
///
/// let error = EngineError::MissingColumn {
///     column: "Logged hours".to_string(),
/// };
/// assert_eq!(error.to_string(), "Input is missing required column: Logged hours");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required input column is absent. Raised before any computation
    /// starts; no partial ledger is produced.
    #[error("Input is missing required column: {column}")]
    MissingColumn {
        /// The column that was not found.
        column: String,
    },

    /// The period identifier could not be decoded into year/month dates.
    #[error("Cannot parse billing period '{value}': {message}")]
    UnparsablePeriod {
        /// The raw period identifier.
        value: String,
        /// A description of the parse failure.
        message: String,
    },

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

    /// A timesheet or project directory row was structurally invalid.
    #[error("Invalid input record at row {row}: {message}")]
    InvalidRecord {
        /// One-based row number within the input.
        row: usize,
        /// A description of what made the record invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_displays_column() {
        let error = EngineError::MissingColumn {
            column: "Project".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Input is missing required column: Project"
        );
    }

    #[test]
    fn test_unparsable_period_displays_value_and_message() {
        let error = EngineError::UnparsablePeriod {
            value: "sometime".to_string(),
            message: "expected YYYY-MM".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot parse billing period 'sometime': expected YYYY-MM"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/allocation.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/allocation.yaml"
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
    fn test_invalid_record_displays_row_and_message() {
        let error = EngineError::InvalidRecord {
            row: 7,
            message: "negative logged hours".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input record at row 7: negative logged hours"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "ledger row without hours".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Calculation error: ledger row without hours"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_column() -> EngineResult<()> {
            Err(EngineError::MissingColumn {
                column: "Period".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_column()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
