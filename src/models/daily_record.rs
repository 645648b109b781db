//! Daily attendance record model and related types.
//!
//! This module defines the [`DailyRecord`] struct representing one calendar
//! day of attendance for one contract, along with the attendance category
//! and break-time types.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// The attendance category of a daily record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceCategory {
    /// A normal working day.
    Normal,
    /// Paid leave.
    PaidLeave,
    /// Sick leave.
    SickLeave,
    /// An unexcused absence.
    Absence,
    /// A late arrival.
    Late,
    /// An early departure.
    EarlyLeave,
}

/// Break durations taken during a day, in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakMinutes {
    /// Lunch break in minutes.
    #[serde(default)]
    pub lunch: u32,
    /// Evening break in minutes.
    #[serde(default)]
    pub evening: u32,
    /// Any other break in minutes.
    #[serde(default)]
    pub other: u32,
}

impl BreakMinutes {
    /// Returns the sum of all break durations in minutes.
    pub fn total(&self) -> u32 {
        self.lunch + self.evening + self.other
    }
}

/// One calendar day of attendance for one contract.
///
/// At most one record exists per (contract, work date). Working hours are
/// derived on demand (see [`crate::calculation::actual_working_hours`]),
/// never stored, so edits to times or breaks always change the effective
/// hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// The contract this record belongs to.
    pub contract_id: String,
    /// The person the contract engages.
    pub person_id: String,
    /// The work date (unique per contract).
    pub work_date: NaiveDate,
    /// Clock-in time, if recorded.
    pub clock_in: Option<NaiveTime>,
    /// Clock-out time, if recorded.
    pub clock_out: Option<NaiveTime>,
    /// Break durations for the day.
    #[serde(default)]
    pub breaks: BreakMinutes,
    /// The attendance category.
    pub category: AttendanceCategory,
    /// Free-text remark (late or early-leave reasons and the like).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_break_minutes_total() {
        let breaks = BreakMinutes {
            lunch: 60,
            evening: 30,
            other: 15,
        };
        assert_eq!(breaks.total(), 105);
    }

    #[test]
    fn test_break_minutes_default_is_zero() {
        assert_eq!(BreakMinutes::default().total(), 0);
    }

    #[test]
    fn test_daily_record_serialization_round_trip() {
        let record = DailyRecord {
            contract_id: "c-001".to_string(),
            person_id: "p-001".to_string(),
            work_date: NaiveDate::from_ymd_opt(2025, 4, 15).unwrap(),
            clock_in: Some(time(9, 0)),
            clock_out: Some(time(18, 0)),
            breaks: BreakMinutes {
                lunch: 60,
                ..BreakMinutes::default()
            },
            category: AttendanceCategory::Normal,
            remark: None,
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: DailyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_category_wire_format_is_snake_case() {
        let json = serde_json::to_string(&AttendanceCategory::PaidLeave).unwrap();
        assert_eq!(json, "\"paid_leave\"");

        let back: AttendanceCategory = serde_json::from_str("\"early_leave\"").unwrap();
        assert_eq!(back, AttendanceCategory::EarlyLeave);
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let json = r#"{
            "contract_id": "c-001",
            "person_id": "p-001",
            "work_date": "2025-04-15",
            "clock_in": null,
            "clock_out": null,
            "category": "absence"
        }"#;

        let record: DailyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, AttendanceCategory::Absence);
        assert!(record.clock_in.is_none());
        assert_eq!(record.breaks.total(), 0);
        assert!(record.remark.is_none());
    }
}
