//! Core data models for the Attendance & Payroll Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod contract;
mod daily_record;
mod submission;
mod year_month;

pub use contract::Contract;
pub use daily_record::{AttendanceCategory, BreakMinutes, DailyRecord};
pub use submission::{MonthlyAggregate, MonthlySubmission, SubmissionStatus, TransitionEntry};
pub use year_month::YearMonth;
