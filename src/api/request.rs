//! Request types for the Attendance & Payroll Calculation Engine API.
//!
//! This module defines the JSON request structures for the HTTP endpoints.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceCategory, BreakMinutes, Contract};
use crate::workflow::{DayUpdate, NewDailyRecord};

/// Request body for registering a contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterContractRequest {
    /// Unique identifier for the contract.
    pub id: String,
    /// The person engaged under this contract.
    pub person_id: String,
    /// The client whose rounding policy applies, if any.
    #[serde(default)]
    pub client_id: Option<String>,
    /// Monthly base amount.
    pub unit_price: Decimal,
    /// Standard working hours per month.
    pub standard_working_hours: Decimal,
    /// Monthly floor for the shortfall deduction.
    #[serde(default)]
    pub min_working_hours: Option<Decimal>,
    /// Monthly ceiling for the overtime tier.
    #[serde(default)]
    pub max_working_hours: Option<Decimal>,
    /// Guaranteed-hours threshold.
    #[serde(default)]
    pub min_guaranteed_hours: Option<Decimal>,
    /// Hours of overage not billed as overtime.
    #[serde(default)]
    pub free_overtime_hours: Decimal,
    /// Overtime rate multiplier.
    #[serde(default = "default_rate")]
    pub overtime_rate: Decimal,
    /// Shortfall rate multiplier.
    #[serde(default = "default_rate")]
    pub shortage_rate: Decimal,
}

fn default_rate() -> Decimal {
    Decimal::ONE
}

/// Request body for recording one day of attendance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDayRequest {
    /// The contract the day belongs to.
    pub contract_id: String,
    /// The work date.
    pub work_date: NaiveDate,
    /// Clock-in time.
    #[serde(default)]
    pub clock_in: Option<NaiveTime>,
    /// Clock-out time.
    #[serde(default)]
    pub clock_out: Option<NaiveTime>,
    /// Break durations.
    #[serde(default)]
    pub breaks: BreakMinutes,
    /// Attendance category.
    pub category: AttendanceCategory,
    /// Free-text remark.
    #[serde(default)]
    pub remark: Option<String>,
}

/// Request body for replacing the mutable fields of a daily record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDayRequest {
    /// New clock-in time.
    #[serde(default)]
    pub clock_in: Option<NaiveTime>,
    /// New clock-out time.
    #[serde(default)]
    pub clock_out: Option<NaiveTime>,
    /// New break durations.
    #[serde(default)]
    pub breaks: BreakMinutes,
    /// New attendance category.
    pub category: AttendanceCategory,
    /// New remark.
    #[serde(default)]
    pub remark: Option<String>,
}

/// Request body for submitting a month.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitMonthRequest {
    /// Remark to attach to the submission.
    #[serde(default)]
    pub remark: Option<String>,
}

/// Request body for approving a month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveMonthRequest {
    /// The approver performing the action.
    pub approver_id: String,
    /// Remark to attach to the approval.
    #[serde(default)]
    pub remark: Option<String>,
}

/// Request body for rejecting a month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectMonthRequest {
    /// The approver performing the action.
    pub approver_id: String,
    /// Why the month was sent back.
    pub reason: String,
}

/// Request body for a contract payment calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// The month's actual working hours.
    pub actual_hours: Decimal,
}

impl From<RegisterContractRequest> for Contract {
    fn from(req: RegisterContractRequest) -> Self {
        Contract {
            id: req.id,
            person_id: req.person_id,
            client_id: req.client_id,
            unit_price: req.unit_price,
            standard_working_hours: req.standard_working_hours,
            min_working_hours: req.min_working_hours,
            max_working_hours: req.max_working_hours,
            min_guaranteed_hours: req.min_guaranteed_hours,
            free_overtime_hours: req.free_overtime_hours,
            overtime_rate: req.overtime_rate,
            shortage_rate: req.shortage_rate,
        }
    }
}

impl From<RecordDayRequest> for NewDailyRecord {
    fn from(req: RecordDayRequest) -> Self {
        NewDailyRecord {
            contract_id: req.contract_id,
            work_date: req.work_date,
            clock_in: req.clock_in,
            clock_out: req.clock_out,
            breaks: req.breaks,
            category: req.category,
            remark: req.remark,
        }
    }
}

impl From<UpdateDayRequest> for DayUpdate {
    fn from(req: UpdateDayRequest) -> Self {
        DayUpdate {
            clock_in: req.clock_in,
            clock_out: req.clock_out,
            breaks: req.breaks,
            category: req.category,
            remark: req.remark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_record_day_request() {
        let json = r#"{
            "contract_id": "c-001",
            "work_date": "2025-04-15",
            "clock_in": "09:00:00",
            "clock_out": "18:00:00",
            "breaks": {"lunch": 60},
            "category": "normal",
            "remark": "client visit"
        }"#;

        let request: RecordDayRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.contract_id, "c-001");
        assert_eq!(request.breaks.lunch, 60);
        assert_eq!(request.breaks.evening, 0);
        assert_eq!(request.category, AttendanceCategory::Normal);
    }

    #[test]
    fn test_deserialize_record_day_without_clock_times() {
        let json = r#"{
            "contract_id": "c-001",
            "work_date": "2025-04-15",
            "category": "paid_leave"
        }"#;

        let request: RecordDayRequest = serde_json::from_str(json).unwrap();
        assert!(request.clock_in.is_none());
        assert!(request.clock_out.is_none());
        assert_eq!(request.breaks.total(), 0);
    }

    #[test]
    fn test_deserialize_contract_request_with_defaults() {
        let json = r#"{
            "id": "c-001",
            "person_id": "p-001",
            "unit_price": "800000",
            "standard_working_hours": "160"
        }"#;

        let request: RegisterContractRequest = serde_json::from_str(json).unwrap();
        let contract: Contract = request.into();
        assert_eq!(contract.overtime_rate, Decimal::ONE);
        assert_eq!(contract.free_overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_empty_submit_request() {
        let request: SubmitMonthRequest = serde_json::from_str("{}").unwrap();
        assert!(request.remark.is_none());
    }

    #[test]
    fn test_deserialize_reject_requires_reason() {
        let json = r#"{"approver_id": "mgr-1"}"#;
        let result: Result<RejectMonthRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
