//! Error types for the Attendance & Payroll Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur in the engine.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::SubmissionStatus;

/// The main error type for the Attendance & Payroll Calculation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ContractNotFound {
///     contract_id: "c-missing".to_string(),
/// };
/// assert_eq!(error.to_string(), "Contract not found: c-missing");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A contract failed validation on registration.
    #[error("Invalid contract field '{field}': {message}")]
    InvalidContract {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A daily record contained inconsistent data.
    #[error("Invalid daily record for {date}: {message}")]
    InvalidRecord {
        /// The work date of the invalid record.
        date: NaiveDate,
        /// A description of what made the record invalid.
        message: String,
    },

    /// A year-month string could not be parsed.
    #[error("Invalid year-month '{value}': expected YYYY-MM")]
    InvalidYearMonth {
        /// The value that failed to parse.
        value: String,
    },

    /// A daily record already exists for the given contract and date.
    #[error("Daily record already exists for contract '{contract_id}' on {date}")]
    DuplicateDailyRecord {
        /// The contract the record belongs to.
        contract_id: String,
        /// The work date of the duplicate.
        date: NaiveDate,
    },

    /// Daily records for the month are read-only in the current status.
    #[error("Month {year_month} is not editable while {status}")]
    MonthNotEditable {
        /// The month whose records were being modified.
        year_month: String,
        /// The submission status blocking the edit.
        status: SubmissionStatus,
    },

    /// A workflow operation was attempted from an incompatible status.
    #[error("Cannot {action} a submission in status {status}")]
    InvalidTransition {
        /// The operation that was attempted (e.g. "approve").
        action: String,
        /// The status the submission was in.
        status: SubmissionStatus,
    },

    /// The referenced contract does not exist.
    #[error("Contract not found: {contract_id}")]
    ContractNotFound {
        /// The contract id that was not found.
        contract_id: String,
    },

    /// No daily record exists for the given contract and date.
    #[error("No daily record for contract '{contract_id}' on {date}")]
    RecordNotFound {
        /// The contract the record was looked up for.
        contract_id: String,
        /// The work date that was requested.
        date: NaiveDate,
    },

    /// No submission exists for the given person and month.
    #[error("No submission found for person '{person_id}' in {year_month}")]
    SubmissionNotFound {
        /// The person the submission belongs to.
        person_id: String,
        /// The month that was requested.
        year_month: String,
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
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_not_found_displays_id() {
        let error = EngineError::ContractNotFound {
            contract_id: "c-001".to_string(),
        };
        assert_eq!(error.to_string(), "Contract not found: c-001");
    }

    #[test]
    fn test_duplicate_daily_record_displays_contract_and_date() {
        let error = EngineError::DuplicateDailyRecord {
            contract_id: "c-001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 15).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Daily record already exists for contract 'c-001' on 2025-04-15"
        );
    }

    #[test]
    fn test_month_not_editable_displays_status() {
        let error = EngineError::MonthNotEditable {
            year_month: "2025-04".to_string(),
            status: SubmissionStatus::Approved,
        };
        assert_eq!(
            error.to_string(),
            "Month 2025-04 is not editable while approved"
        );
    }

    #[test]
    fn test_invalid_transition_displays_action_and_status() {
        let error = EngineError::InvalidTransition {
            action: "approve".to_string(),
            status: SubmissionStatus::Draft,
        };
        assert_eq!(error.to_string(), "Cannot approve a submission in status draft");
    }

    #[test]
    fn test_invalid_year_month_displays_value() {
        let error = EngineError::InvalidYearMonth {
            value: "2025/04".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid year-month '2025/04': expected YYYY-MM"
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
        fn returns_contract_not_found() -> EngineResult<()> {
            Err(EngineError::ContractNotFound {
                contract_id: "c-missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_contract_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
