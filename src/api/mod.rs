//! HTTP API module for the Attendance & Payroll Calculation Engine.
//!
//! This module provides the REST endpoints the engine exposes to its host:
//! recording daily attendance, viewing and transitioning monthly
//! submissions, and previewing contract payments.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ApproveMonthRequest, PaymentRequest, RecordDayRequest, RegisterContractRequest,
    RejectMonthRequest, SubmitMonthRequest, UpdateDayRequest,
};
pub use response::{ApiError, MonthView};
pub use state::AppState;
