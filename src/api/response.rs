//! Response types for the Attendance & Payroll Calculation Engine API.
//!
//! This module defines the month view body, the error response structures
//! and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::DailyRecord;
use crate::workflow::MonthStatus;

/// The response body for a month view: submission state, display
/// aggregate, capability flags, and the month's daily records.
#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    /// Submission state, aggregate and capability flags.
    #[serde(flatten)]
    pub status: MonthStatus,
    /// The month's daily records, ordered by date.
    pub days: Vec<DailyRecord>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response for a request that failed validation before
    /// reaching the engine (bad path parameter, malformed body).
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidContract { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_CONTRACT",
                    format!("Invalid contract field '{}'", field),
                    message,
                ),
            },
            EngineError::InvalidRecord { date, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_RECORD",
                    format!("Invalid daily record for {}", date),
                    message,
                ),
            },
            EngineError::InvalidYearMonth { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "INVALID_YEAR_MONTH",
                    format!("Invalid year-month '{}': expected YYYY-MM", value),
                ),
            },
            EngineError::DuplicateDailyRecord { contract_id, date } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "DUPLICATE_RECORD",
                    format!("Daily record already exists for {}", date),
                    format!("Contract '{}' already has a record on this date", contract_id),
                ),
            },
            EngineError::MonthNotEditable { year_month, status } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "MONTH_NOT_EDITABLE",
                    format!("Month {} is not editable", year_month),
                    format!("Daily records are read-only while the month is {}", status),
                ),
            },
            EngineError::InvalidTransition { action, status } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "INVALID_TRANSITION",
                    format!("Cannot {} a submission in status {}", action, status),
                    "The operation is not allowed from the current status",
                ),
            },
            EngineError::ContractNotFound { contract_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "CONTRACT_NOT_FOUND",
                    format!("Contract not found: {}", contract_id),
                ),
            },
            EngineError::RecordNotFound { contract_id, date } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "RECORD_NOT_FOUND",
                    format!("No daily record for contract '{}' on {}", contract_id, date),
                ),
            },
            EngineError::SubmissionNotFound {
                person_id,
                year_month,
            } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "SUBMISSION_NOT_FOUND",
                    format!(
                        "No submission found for person '{}' in {}",
                        person_id, year_month
                    ),
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}
