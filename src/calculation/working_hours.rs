//! Time accounting: converting one day's clock times into working hours.
//!
//! This is the leaf of the calculation stack. It is a pure function of the
//! clock-in/out times, the break minutes, and the client's rounding policy.

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;

use crate::config::RoundingPolicy;
use crate::models::BreakMinutes;

/// Computes the working hours for one day.
///
/// The algorithm:
///
/// 1. Convert clock-in/out to minute-of-day integers. A clock-out earlier
///    than the clock-in means the shift crossed midnight, so a full day is
///    added to the clock-out.
/// 2. Subtract the break minutes and divide by 60.
/// 3. Round to the policy's unit grid.
/// 4. Clamp at zero (breaks can exceed a short shift).
///
/// A missing clock-in or clock-out yields zero; no partial computation is
/// attempted.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::actual_working_hours;
/// use attendance_engine::config::RoundingPolicy;
/// use attendance_engine::models::BreakMinutes;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let hours = actual_working_hours(
///     NaiveTime::from_hms_opt(9, 0, 0),
///     NaiveTime::from_hms_opt(18, 0, 0),
///     &BreakMinutes { lunch: 60, evening: 0, other: 0 },
///     &RoundingPolicy::default(),
/// );
/// assert_eq!(hours, Decimal::new(8, 0)); // 8.0 hours
/// ```
pub fn actual_working_hours(
    clock_in: Option<NaiveTime>,
    clock_out: Option<NaiveTime>,
    breaks: &BreakMinutes,
    policy: &RoundingPolicy,
) -> Decimal {
    let (Some(clock_in), Some(clock_out)) = (clock_in, clock_out) else {
        return Decimal::ZERO;
    };

    let start = minute_of_day(clock_in);
    let mut end = minute_of_day(clock_out);

    // Shift crossing midnight
    if end < start {
        end += 24 * 60;
    }

    let raw_minutes = end - start - i64::from(breaks.total());
    let raw_hours = Decimal::from(raw_minutes) / Decimal::from(60u32);
    let rounded = policy.round(raw_hours);

    rounded.max(Decimal::ZERO)
}

fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}
