//! Day-scoped overtime signal.
//!
//! A cheap per-day figure used for display and alerts only. It has none of
//! the monthly billing logic: no guaranteed hours, no max-hours ceiling.

use rust_decimal::Decimal;

/// Returns the day's hours beyond the contract's free-overtime allowance,
/// clamped at zero.
///
/// This is informational; billable overtime is decided monthly by
/// [`calculate_monthly_payment`](crate::calculation::calculate_monthly_payment).
pub fn day_overtime(day_hours: Decimal, free_overtime_hours: Decimal) -> Decimal {
    (day_hours - free_overtime_hours).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_under_allowance_are_zero() {
        assert_eq!(
            day_overtime(Decimal::new(8, 0), Decimal::new(10, 0)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_hours_over_allowance_are_the_excess() {
        assert_eq!(
            day_overtime(Decimal::new(12, 0), Decimal::new(10, 0)),
            Decimal::new(2, 0)
        );
    }

    #[test]
    fn test_hours_at_allowance_are_zero() {
        assert_eq!(
            day_overtime(Decimal::new(10, 0), Decimal::new(10, 0)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_zero_allowance_passes_hours_through() {
        assert_eq!(
            day_overtime(Decimal::new(9, 0), Decimal::ZERO),
            Decimal::new(9, 0)
        );
    }
}
