//! Calculation logic for the Attendance & Payroll Calculation Engine.
//!
//! This module contains the pure calculation functions: time accounting
//! (clock times to working hours under a rounding policy), the monthly
//! payment calculation from contract terms, and the day-scoped overtime
//! signal used for display.

mod day_overtime;
mod payment;
mod working_hours;

pub use day_overtime::day_overtime;
pub use payment::{PaymentBreakdown, calculate_monthly_payment};
pub use working_hours::actual_working_hours;
