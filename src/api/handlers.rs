//! HTTP request handlers for the Attendance & Payroll Calculation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Contract, YearMonth};
use crate::workflow::{DayUpdate, NewDailyRecord};

use super::request::{
    ApproveMonthRequest, PaymentRequest, RecordDayRequest, RegisterContractRequest,
    RejectMonthRequest, SubmitMonthRequest, UpdateDayRequest,
};
use super::response::{ApiError, ApiErrorResponse, MonthView};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/contracts", post(register_contract_handler))
        .route("/contracts/:contract_id/payment", post(payment_handler))
        .route("/days", post(record_day_handler))
        .route(
            "/contracts/:contract_id/days/:date",
            patch(update_day_handler).delete(delete_day_handler),
        )
        .route(
            "/persons/:person_id/months/:year_month",
            get(month_view_handler),
        )
        .route(
            "/persons/:person_id/months/:year_month/submit",
            post(submit_month_handler),
        )
        .route(
            "/persons/:person_id/months/:year_month/approve",
            post(approve_month_handler),
        )
        .route(
            "/persons/:person_id/months/:year_month/reject",
            post(reject_month_handler),
        )
        .route(
            "/persons/:person_id/months/:year_month/withdraw",
            post(withdraw_month_handler),
        )
        .with_state(state)
}

/// Unwraps a JSON body, mapping rejections to API error responses.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse::bad_request(error))
        }
    }
}

fn parse_year_month(raw: &str) -> Result<YearMonth, ApiErrorResponse> {
    raw.parse::<YearMonth>().map_err(ApiErrorResponse::from)
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiErrorResponse> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiErrorResponse::bad_request(ApiError::validation_error(format!(
            "Invalid date '{}': expected YYYY-MM-DD",
            raw
        )))
    })
}

/// Handler for POST /contracts.
async fn register_contract_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterContractRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let contract: Contract = request.into();
    match state.engine().register_contract(contract) {
        Ok(contract) => {
            info!(
                correlation_id = %correlation_id,
                contract_id = %contract.id,
                person_id = %contract.person_id,
                "Contract registered"
            );
            (StatusCode::CREATED, Json(contract)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Contract registration failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /days.
async fn record_day_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecordDayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let new_record: NewDailyRecord = request.into();
    match state.engine().record_day(new_record) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                contract_id = %record.contract_id,
                work_date = %record.work_date,
                "Daily record created"
            );
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Daily record creation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for PATCH /contracts/{contract_id}/days/{date}.
async fn update_day_handler(
    State(state): State<AppState>,
    Path((contract_id, date)): Path<(String, String)>,
    payload: Result<Json<UpdateDayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(error) => return error.into_response(),
    };
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let update: DayUpdate = request.into();
    match state.engine().update_day(&contract_id, date, update) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                contract_id = %contract_id,
                work_date = %date,
                "Daily record updated"
            );
            Json(record).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Daily record update failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for DELETE /contracts/{contract_id}/days/{date}.
async fn delete_day_handler(
    State(state): State<AppState>,
    Path((contract_id, date)): Path<(String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(error) => return error.into_response(),
    };

    match state.engine().delete_day(&contract_id, date) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                contract_id = %contract_id,
                work_date = %date,
                "Daily record deleted"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Daily record deletion failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /persons/{person_id}/months/{year_month}.
///
/// Returns the submission state, the aggregate consumers should display
/// (snapshot when approved, live otherwise), capability flags and the
/// month's daily records.
async fn month_view_handler(
    State(state): State<AppState>,
    Path((person_id, year_month)): Path<(String, String)>,
) -> Response {
    let ym = match parse_year_month(&year_month) {
        Ok(ym) => ym,
        Err(error) => return error.into_response(),
    };

    let status = state.engine().month_status(&person_id, ym);
    let days = state.engine().month_records(&person_id, ym);
    Json(MonthView { status, days }).into_response()
}

/// Handler for POST /persons/{person_id}/months/{year_month}/submit.
async fn submit_month_handler(
    State(state): State<AppState>,
    Path((person_id, year_month)): Path<(String, String)>,
    payload: Result<Json<SubmitMonthRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let ym = match parse_year_month(&year_month) {
        Ok(ym) => ym,
        Err(error) => return error.into_response(),
    };
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    match state
        .engine()
        .submit_month(&person_id, ym, request.remark.as_deref())
    {
        Ok(submission) => {
            let total_hours = submission
                .snapshot
                .as_ref()
                .map(|s| s.total_hours)
                .unwrap_or_default();
            info!(
                correlation_id = %correlation_id,
                person_id = %person_id,
                year_month = %ym,
                total_hours = %total_hours,
                "Month submitted"
            );
            Json(submission).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Month submission failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /persons/{person_id}/months/{year_month}/approve.
async fn approve_month_handler(
    State(state): State<AppState>,
    Path((person_id, year_month)): Path<(String, String)>,
    payload: Result<Json<ApproveMonthRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let ym = match parse_year_month(&year_month) {
        Ok(ym) => ym,
        Err(error) => return error.into_response(),
    };
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    match state.engine().approve_month(
        &person_id,
        ym,
        &request.approver_id,
        request.remark.as_deref(),
    ) {
        Ok(submission) => {
            info!(
                correlation_id = %correlation_id,
                person_id = %person_id,
                year_month = %ym,
                approver_id = %request.approver_id,
                "Month approved"
            );
            Json(submission).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Month approval failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /persons/{person_id}/months/{year_month}/reject.
async fn reject_month_handler(
    State(state): State<AppState>,
    Path((person_id, year_month)): Path<(String, String)>,
    payload: Result<Json<RejectMonthRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let ym = match parse_year_month(&year_month) {
        Ok(ym) => ym,
        Err(error) => return error.into_response(),
    };
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    match state
        .engine()
        .reject_month(&person_id, ym, &request.approver_id, &request.reason)
    {
        Ok(submission) => {
            info!(
                correlation_id = %correlation_id,
                person_id = %person_id,
                year_month = %ym,
                approver_id = %request.approver_id,
                "Month rejected"
            );
            Json(submission).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Month rejection failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /persons/{person_id}/months/{year_month}/withdraw.
async fn withdraw_month_handler(
    State(state): State<AppState>,
    Path((person_id, year_month)): Path<(String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let ym = match parse_year_month(&year_month) {
        Ok(ym) => ym,
        Err(error) => return error.into_response(),
    };

    match state.engine().withdraw_month(&person_id, ym) {
        Ok(submission) => {
            info!(
                correlation_id = %correlation_id,
                person_id = %person_id,
                year_month = %ym,
                "Month withdrawn"
            );
            Json(submission).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Month withdrawal failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /contracts/{contract_id}/payment.
async fn payment_handler(
    State(state): State<AppState>,
    Path(contract_id): Path<String>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    match state
        .engine()
        .calculate_contract_payment(&contract_id, request.actual_hours)
    {
        Ok(breakdown) => {
            info!(
                correlation_id = %correlation_id,
                contract_id = %contract_id,
                actual_hours = %request.actual_hours,
                total_payment = %breakdown.total_payment,
                "Payment calculated"
            );
            Json(breakdown).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Payment calculation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}
