//! Rounding policy types.
//!
//! Clients bill attendance in fixed minute units (commonly 15) and choose
//! how a partial unit is treated. The policy is a value object so tests and
//! callers can supply it deterministically instead of fetching it ad hoc.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// How a partial billing unit is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round to the nearest unit, halves away from zero.
    #[default]
    Nearest,
    /// Truncate down to the last full unit.
    Floor,
    /// Round up to the next full unit.
    Ceiling,
}

/// A client's attendance rounding policy: a unit size in minutes and a
/// rounding mode.
///
/// The default — 15-minute units, round to nearest — is what applies when a
/// client has no configured policy.
///
/// # Example
///
/// ```
/// use attendance_engine::config::{RoundingMode, RoundingPolicy};
/// use rust_decimal::Decimal;
///
/// let policy = RoundingPolicy { unit_minutes: 15, mode: RoundingMode::Floor };
/// // 7.9 hours floors to 7.75 (31 quarter-hour units)
/// assert_eq!(policy.round(Decimal::new(79, 1)), Decimal::new(775, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    /// The billing unit size in minutes. Zero means no rounding.
    pub unit_minutes: u32,
    /// How partial units are treated.
    #[serde(default)]
    pub mode: RoundingMode,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            unit_minutes: 15,
            mode: RoundingMode::Nearest,
        }
    }
}

impl RoundingPolicy {
    /// Rounds an hours figure to this policy's unit grid.
    ///
    /// The value is expressed as a count of units, the mode is applied to
    /// produce an integer count, and the count is multiplied back to hours.
    /// Rounding is idempotent: a value already on the grid is returned
    /// unchanged.
    pub fn round(&self, hours: Decimal) -> Decimal {
        if self.unit_minutes == 0 {
            return hours;
        }
        let unit_hours = Decimal::from(self.unit_minutes) / Decimal::from(60u32);
        let units = hours / unit_hours;
        let whole_units = match self.mode {
            RoundingMode::Nearest => {
                units.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            }
            RoundingMode::Floor => units.floor(),
            RoundingMode::Ceiling => units.ceil(),
        };
        (whole_units * unit_hours).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_policy_is_15_minute_nearest() {
        let policy = RoundingPolicy::default();
        assert_eq!(policy.unit_minutes, 15);
        assert_eq!(policy.mode, RoundingMode::Nearest);
    }

    #[test]
    fn test_nearest_rounds_to_quarter_hours() {
        let policy = RoundingPolicy::default();
        assert_eq!(policy.round(dec("8.0")), dec("8"));
        assert_eq!(policy.round(dec("8.1")), dec("8"));
        assert_eq!(policy.round(dec("8.2")), dec("8.25"));
        // 8.125 is exactly between 8.0 and 8.25; halves round away from zero
        assert_eq!(policy.round(dec("8.125")), dec("8.25"));
    }

    #[test]
    fn test_floor_truncates_partial_units() {
        let policy = RoundingPolicy {
            unit_minutes: 15,
            mode: RoundingMode::Floor,
        };
        assert_eq!(policy.round(dec("8.24")), dec("8"));
        assert_eq!(policy.round(dec("8.25")), dec("8.25"));
    }

    #[test]
    fn test_ceiling_rounds_up_partial_units() {
        let policy = RoundingPolicy {
            unit_minutes: 15,
            mode: RoundingMode::Ceiling,
        };
        assert_eq!(policy.round(dec("8.01")), dec("8.25"));
        assert_eq!(policy.round(dec("8.25")), dec("8.25"));
    }

    #[test]
    fn test_thirty_minute_units() {
        let policy = RoundingPolicy {
            unit_minutes: 30,
            mode: RoundingMode::Nearest,
        };
        assert_eq!(policy.round(dec("7.7")), dec("7.5"));
        assert_eq!(policy.round(dec("7.8")), dec("8"));
    }

    #[test]
    fn test_six_minute_units() {
        let policy = RoundingPolicy {
            unit_minutes: 6,
            mode: RoundingMode::Floor,
        };
        assert_eq!(policy.round(dec("7.95")), dec("7.9"));
    }

    #[test]
    fn test_zero_unit_disables_rounding() {
        let policy = RoundingPolicy {
            unit_minutes: 0,
            mode: RoundingMode::Nearest,
        };
        assert_eq!(policy.round(dec("7.9833")), dec("7.9833"));
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let policy = RoundingPolicy::default();
        let once = policy.round(dec("7.37"));
        assert_eq!(policy.round(once), once);
    }

    #[test]
    fn test_mode_wire_format() {
        assert_eq!(
            serde_json::to_string(&RoundingMode::Ceiling).unwrap(),
            "\"ceiling\""
        );
        let mode: RoundingMode = serde_json::from_str("\"floor\"").unwrap();
        assert_eq!(mode, RoundingMode::Floor);
    }

    proptest::proptest! {
        /// Rounding any value twice under the same policy equals rounding once.
        #[test]
        fn prop_round_is_idempotent(minutes in 0i64..1440, unit in proptest::sample::select(vec![6u32, 15, 30, 60])) {
            for mode in [RoundingMode::Nearest, RoundingMode::Floor, RoundingMode::Ceiling] {
                let policy = RoundingPolicy { unit_minutes: unit, mode };
                let hours = Decimal::new(minutes, 0) / Decimal::from(60u32);
                let once = policy.round(hours);
                proptest::prop_assert_eq!(policy.round(once), once);
            }
        }
    }
}
