//! Monthly submission model and the approval state machine.
//!
//! A [`MonthlySubmission`] is the unit of approval: one record per
//! (person, year-month). It aggregates a read-only view over the daily
//! records of that period and freezes the aggregate as a snapshot when the
//! month is submitted.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::YearMonth;

/// The status of a monthly submission.
///
/// Transitions are driven exclusively by [`MonthlySubmission::submit`],
/// [`MonthlySubmission::approve`], [`MonthlySubmission::reject`] and
/// [`MonthlySubmission::withdraw`]; every guard violation fails before any
/// field is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Initial state; daily records are editable.
    Draft,
    /// Submitted and awaiting a decision; daily records are read-only.
    Pending,
    /// Terminal state; the snapshot is the authoritative aggregate.
    Approved,
    /// Sent back by an approver; editable again, snapshot kept for audit.
    Rejected,
    /// Pulled back by the owner; editable again, snapshot cleared.
    Withdrawn,
}

impl SubmissionStatus {
    /// Whether daily records of the month may be created or edited.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected | Self::Withdrawn)
    }

    /// Whether the month can be submitted from this status.
    pub fn can_submit(&self) -> bool {
        self.is_editable()
    }

    /// Whether an approver can decide (approve or reject) from this status.
    pub fn can_decide(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        };
        f.write_str(s)
    }
}

/// The typed monthly aggregate computed over a month's daily records.
///
/// Produced only inside the submission workflow so that submit-time and
/// display-time figures can never drift apart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// Total working hours for the month, after per-day rounding.
    pub total_hours: Decimal,
    /// Days with a normal-attendance record.
    pub working_days: u32,
    /// Paid-leave days.
    pub paid_leave_days: u32,
    /// Sick-leave days.
    pub sick_leave_days: u32,
    /// Absence days.
    pub absence_days: u32,
    /// Late arrivals.
    pub late_count: u32,
    /// Early departures.
    pub early_leave_count: u32,
}

/// One entry in a submission's transition history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEntry {
    /// The operation performed ("submit", "approve", "reject", "withdraw").
    pub operation: String,
    /// The actor who performed it.
    pub actor_id: String,
    /// The status before the transition.
    pub from_status: SubmissionStatus,
    /// The status after the transition.
    pub to_status: SubmissionStatus,
    /// Remark supplied with the operation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// When the transition happened.
    pub at: DateTime<Utc>,
}

/// The unit of approval: one record per (person, year-month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySubmission {
    /// The person whose timesheet this is.
    pub person_id: String,
    /// The month covered.
    pub year_month: YearMonth,
    /// Current state-machine status.
    pub status: SubmissionStatus,
    /// When the month was last submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// When the month was approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// Who approved or rejected the month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<String>,
    /// Remark supplied on submit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_remark: Option<String>,
    /// Remark supplied on approve or reject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approve_remark: Option<String>,
    /// The frozen monthly aggregate. Non-null once submitted; authoritative
    /// only while `status` is [`SubmissionStatus::Approved`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<MonthlyAggregate>,
    /// Transition history, oldest first.
    #[serde(default)]
    pub history: Vec<TransitionEntry>,
}

impl MonthlySubmission {
    /// Creates a new submission in `Draft` with no snapshot.
    pub fn new(person_id: impl Into<String>, year_month: YearMonth) -> Self {
        Self {
            person_id: person_id.into(),
            year_month,
            status: SubmissionStatus::Draft,
            submitted_at: None,
            approved_at: None,
            approver_id: None,
            submit_remark: None,
            approve_remark: None,
            snapshot: None,
            history: Vec::new(),
        }
    }

    fn record(&mut self, operation: &str, actor_id: &str, from: SubmissionStatus, remark: Option<&str>, at: DateTime<Utc>) {
        self.history.push(TransitionEntry {
            operation: operation.to_string(),
            actor_id: actor_id.to_string(),
            from_status: from,
            to_status: self.status,
            remark: remark.map(str::to_string),
            at,
        });
    }

    /// Submits the month, freezing `aggregate` as the snapshot.
    ///
    /// Allowed from `Draft`, `Rejected` and `Withdrawn`. The snapshot is
    /// overwritten wholesale on every submit; stale values from a rejected
    /// submission never survive into the next one.
    pub fn submit(
        &mut self,
        aggregate: MonthlyAggregate,
        remark: Option<&str>,
        at: DateTime<Utc>,
    ) -> EngineResult<()> {
        if !self.status.can_submit() {
            return Err(EngineError::InvalidTransition {
                action: "submit".to_string(),
                status: self.status,
            });
        }
        let from = self.status;
        self.status = SubmissionStatus::Pending;
        self.submitted_at = Some(at);
        self.submit_remark = remark.map(str::to_string);
        self.snapshot = Some(aggregate);
        let actor = self.person_id.clone();
        self.record("submit", &actor, from, remark, at);
        Ok(())
    }

    /// Approves the month. Allowed only from `Pending`.
    ///
    /// The snapshot is retained unchanged; from this point it is what
    /// reporting must read.
    pub fn approve(
        &mut self,
        approver_id: &str,
        remark: Option<&str>,
        at: DateTime<Utc>,
    ) -> EngineResult<()> {
        if !self.status.can_decide() {
            return Err(EngineError::InvalidTransition {
                action: "approve".to_string(),
                status: self.status,
            });
        }
        let from = self.status;
        self.status = SubmissionStatus::Approved;
        self.approved_at = Some(at);
        self.approver_id = Some(approver_id.to_string());
        self.approve_remark = remark.map(str::to_string);
        self.record("approve", approver_id, from, remark, at);
        Ok(())
    }

    /// Rejects the month. Allowed only from `Pending`.
    ///
    /// The snapshot is retained as an audit trail of what was rejected but
    /// is no longer authoritative for display.
    pub fn reject(
        &mut self,
        approver_id: &str,
        reason: &str,
        at: DateTime<Utc>,
    ) -> EngineResult<()> {
        if !self.status.can_decide() {
            return Err(EngineError::InvalidTransition {
                action: "reject".to_string(),
                status: self.status,
            });
        }
        let from = self.status;
        self.status = SubmissionStatus::Rejected;
        self.approver_id = Some(approver_id.to_string());
        self.approve_remark = Some(reason.to_string());
        self.record("reject", approver_id, from, Some(reason), at);
        Ok(())
    }

    /// Withdraws the month. Allowed only from `Pending`.
    ///
    /// Clears the snapshot, so display reverts to live recomputation.
    pub fn withdraw(&mut self, at: DateTime<Utc>) -> EngineResult<()> {
        if self.status != SubmissionStatus::Pending {
            return Err(EngineError::InvalidTransition {
                action: "withdraw".to_string(),
                status: self.status,
            });
        }
        let from = self.status;
        self.status = SubmissionStatus::Withdrawn;
        self.snapshot = None;
        let actor = self.person_id.clone();
        self.record("withdraw", &actor, from, None, at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym() -> YearMonth {
        YearMonth::new(2025, 4).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn aggregate(hours: i64) -> MonthlyAggregate {
        MonthlyAggregate {
            total_hours: Decimal::new(hours, 0),
            working_days: 20,
            ..MonthlyAggregate::default()
        }
    }

    #[test]
    fn test_new_submission_is_draft_without_snapshot() {
        let submission = MonthlySubmission::new("p-001", ym());
        assert_eq!(submission.status, SubmissionStatus::Draft);
        assert!(submission.snapshot.is_none());
        assert!(submission.history.is_empty());
    }

    #[test]
    fn test_submit_from_draft_sets_pending_and_snapshot() {
        let mut submission = MonthlySubmission::new("p-001", ym());
        submission
            .submit(aggregate(160), Some("april"), now())
            .unwrap();

        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert!(submission.submitted_at.is_some());
        assert_eq!(submission.submit_remark.as_deref(), Some("april"));
        assert_eq!(
            submission.snapshot.as_ref().unwrap().total_hours,
            Decimal::new(160, 0)
        );
        assert_eq!(submission.history.len(), 1);
        assert_eq!(submission.history[0].operation, "submit");
        assert_eq!(submission.history[0].from_status, SubmissionStatus::Draft);
        assert_eq!(submission.history[0].to_status, SubmissionStatus::Pending);
    }

    #[test]
    fn test_submit_fails_while_pending() {
        let mut submission = MonthlySubmission::new("p-001", ym());
        submission.submit(aggregate(160), None, now()).unwrap();

        let err = submission.submit(aggregate(170), None, now()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidTransition { status: SubmissionStatus::Pending, .. }
        ));
        // Failed submit leaves the snapshot untouched
        assert_eq!(
            submission.snapshot.as_ref().unwrap().total_hours,
            Decimal::new(160, 0)
        );
    }

    #[test]
    fn test_submit_fails_when_approved() {
        let mut submission = MonthlySubmission::new("p-001", ym());
        submission.submit(aggregate(160), None, now()).unwrap();
        submission.approve("mgr-1", None, now()).unwrap();

        assert!(submission.submit(aggregate(170), None, now()).is_err());
    }

    #[test]
    fn test_resubmit_after_reject_overwrites_snapshot() {
        let mut submission = MonthlySubmission::new("p-001", ym());
        submission.submit(aggregate(160), None, now()).unwrap();
        submission.reject("mgr-1", "missing days", now()).unwrap();
        assert_eq!(submission.status, SubmissionStatus::Rejected);
        // Rejected keeps the old snapshot for audit
        assert!(submission.snapshot.is_some());

        submission.submit(aggregate(172), None, now()).unwrap();
        assert_eq!(
            submission.snapshot.as_ref().unwrap().total_hours,
            Decimal::new(172, 0)
        );
    }

    #[test]
    fn test_approve_only_from_pending() {
        let mut submission = MonthlySubmission::new("p-001", ym());
        assert!(submission.approve("mgr-1", None, now()).is_err());

        submission.submit(aggregate(160), None, now()).unwrap();
        submission.approve("mgr-1", Some("ok"), now()).unwrap();
        assert_eq!(submission.status, SubmissionStatus::Approved);
        assert_eq!(submission.approver_id.as_deref(), Some("mgr-1"));
        assert!(submission.approved_at.is_some());

        // Approved is terminal for approve/reject/withdraw
        assert!(submission.approve("mgr-1", None, now()).is_err());
        assert!(submission.reject("mgr-1", "no", now()).is_err());
        assert!(submission.withdraw(now()).is_err());
    }

    #[test]
    fn test_reject_only_from_pending() {
        let mut submission = MonthlySubmission::new("p-001", ym());
        assert!(submission.reject("mgr-1", "nope", now()).is_err());

        submission.submit(aggregate(160), None, now()).unwrap();
        submission.reject("mgr-1", "nope", now()).unwrap();
        assert_eq!(submission.status, SubmissionStatus::Rejected);
        assert_eq!(submission.approve_remark.as_deref(), Some("nope"));
    }

    #[test]
    fn test_withdraw_clears_snapshot() {
        let mut submission = MonthlySubmission::new("p-001", ym());
        submission.submit(aggregate(160), None, now()).unwrap();
        submission.withdraw(now()).unwrap();

        assert_eq!(submission.status, SubmissionStatus::Withdrawn);
        assert!(submission.snapshot.is_none());
    }

    #[test]
    fn test_withdraw_only_from_pending() {
        let mut submission = MonthlySubmission::new("p-001", ym());
        assert!(submission.withdraw(now()).is_err());
    }

    #[test]
    fn test_editability_by_status() {
        assert!(SubmissionStatus::Draft.is_editable());
        assert!(SubmissionStatus::Rejected.is_editable());
        assert!(SubmissionStatus::Withdrawn.is_editable());
        assert!(!SubmissionStatus::Pending.is_editable());
        assert!(!SubmissionStatus::Approved.is_editable());
    }

    #[test]
    fn test_status_display_is_lowercase() {
        assert_eq!(SubmissionStatus::Approved.to_string(), "approved");
        assert_eq!(SubmissionStatus::Draft.to_string(), "draft");
    }

    #[test]
    fn test_history_accumulates_across_cycle() {
        let mut submission = MonthlySubmission::new("p-001", ym());
        submission.submit(aggregate(160), None, now()).unwrap();
        submission.reject("mgr-1", "fix day 3", now()).unwrap();
        submission.submit(aggregate(168), None, now()).unwrap();
        submission.approve("mgr-1", None, now()).unwrap();

        let ops: Vec<&str> = submission
            .history
            .iter()
            .map(|e| e.operation.as_str())
            .collect();
        assert_eq!(ops, vec!["submit", "reject", "submit", "approve"]);
    }

    #[test]
    fn test_submission_serialization_round_trip() {
        let mut submission = MonthlySubmission::new("p-001", ym());
        submission.submit(aggregate(160), Some("done"), now()).unwrap();

        let json = serde_json::to_string(&submission).unwrap();
        let back: MonthlySubmission = serde_json::from_str(&json).unwrap();
        assert_eq!(submission, back);
    }
}
