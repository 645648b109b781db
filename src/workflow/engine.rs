//! The submission workflow engine.
//!
//! [`AttendanceEngine`] is the facade the host's controllers call. It owns
//! the store and the rounding configuration, enforces the editability and
//! transition rules, and is the only place the monthly aggregate is
//! produced, so submit-time and display-time figures cannot drift apart.

use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    PaymentBreakdown, actual_working_hours, calculate_monthly_payment, day_overtime,
};
use crate::config::RoundingConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceCategory, BreakMinutes, Contract, DailyRecord, MonthlyAggregate, MonthlySubmission,
    SubmissionStatus, YearMonth,
};

use super::store::{EngineStore, StoreInner};

/// Input for recording one day of attendance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDailyRecord {
    /// The contract the day belongs to.
    pub contract_id: String,
    /// The work date.
    pub work_date: NaiveDate,
    /// Clock-in time, if any.
    pub clock_in: Option<NaiveTime>,
    /// Clock-out time, if any.
    pub clock_out: Option<NaiveTime>,
    /// Break durations.
    #[serde(default)]
    pub breaks: BreakMinutes,
    /// Attendance category.
    pub category: AttendanceCategory,
    /// Free-text remark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// Replacement values for the mutable fields of a daily record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayUpdate {
    /// New clock-in time, if any.
    pub clock_in: Option<NaiveTime>,
    /// New clock-out time, if any.
    pub clock_out: Option<NaiveTime>,
    /// New break durations.
    #[serde(default)]
    pub breaks: BreakMinutes,
    /// New attendance category.
    pub category: AttendanceCategory,
    /// New remark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// The state of a person's month: submission fields, the aggregate a
/// consumer should display, and what the owner can currently do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthStatus {
    /// The submission record (a virtual `Draft` one if the month was never
    /// submitted).
    pub submission: MonthlySubmission,
    /// The aggregate to display: the snapshot when approved, a live
    /// recomputation otherwise.
    pub aggregate: MonthlyAggregate,
    /// Whether daily records may currently be created or edited.
    pub can_edit: bool,
    /// Whether the month can currently be submitted.
    pub can_submit: bool,
    /// Whether the month can currently be withdrawn.
    pub can_withdraw: bool,
}

/// The attendance and payroll engine.
///
/// Every public operation runs inside one store lock, which is the
/// transaction boundary: guards are checked and the full outcome computed
/// before anything is written, so a failed operation leaves no partial
/// state.
#[derive(Debug, Default)]
pub struct AttendanceEngine {
    store: EngineStore,
    rounding: RoundingConfig,
}

impl AttendanceEngine {
    /// Creates an engine with the given rounding configuration.
    pub fn new(rounding: RoundingConfig) -> Self {
        Self {
            store: EngineStore::default(),
            rounding,
        }
    }

    /// Registers a contract. Contracts are read-only afterwards.
    pub fn register_contract(&self, contract: Contract) -> EngineResult<Contract> {
        contract.validate()?;
        let mut inner = self.store.lock();
        if inner.contracts.contains_key(&contract.id) {
            return Err(EngineError::InvalidContract {
                field: "id".to_string(),
                message: format!("contract '{}' is already registered", contract.id),
            });
        }
        inner.contracts.insert(contract.id.clone(), contract.clone());
        Ok(contract)
    }

    /// Returns a registered contract.
    pub fn contract(&self, contract_id: &str) -> EngineResult<Contract> {
        let inner = self.store.lock();
        inner
            .contracts
            .get(contract_id)
            .cloned()
            .ok_or_else(|| EngineError::ContractNotFound {
                contract_id: contract_id.to_string(),
            })
    }

    /// Records one day of attendance.
    ///
    /// Fails if the contract is unknown, a record already exists for the
    /// (contract, date) pair, or the month is not in an editable status.
    pub fn record_day(&self, new: NewDailyRecord) -> EngineResult<DailyRecord> {
        let mut inner = self.store.lock();

        let contract = inner.contracts.get(&new.contract_id).ok_or_else(|| {
            EngineError::ContractNotFound {
                contract_id: new.contract_id.clone(),
            }
        })?;
        let person_id = contract.person_id.clone();

        let ym = YearMonth::from_date(new.work_date);
        ensure_month_editable(&inner, &person_id, ym)?;
        validate_breaks(&new.breaks, new.work_date)?;

        let key = (new.contract_id.clone(), new.work_date);
        if inner.daily.contains_key(&key) {
            return Err(EngineError::DuplicateDailyRecord {
                contract_id: new.contract_id,
                date: new.work_date,
            });
        }

        let record = DailyRecord {
            contract_id: new.contract_id,
            person_id,
            work_date: new.work_date,
            clock_in: new.clock_in,
            clock_out: new.clock_out,
            breaks: new.breaks,
            category: new.category,
            remark: new.remark,
        };
        inner.daily.insert(key, record.clone());
        Ok(record)
    }

    /// Replaces the mutable fields of an existing daily record.
    ///
    /// Subject to the same editability rule as [`record_day`](Self::record_day).
    pub fn update_day(
        &self,
        contract_id: &str,
        date: NaiveDate,
        update: DayUpdate,
    ) -> EngineResult<DailyRecord> {
        let mut inner = self.store.lock();

        let key = (contract_id.to_string(), date);
        let person_id = match inner.daily.get(&key) {
            Some(record) => record.person_id.clone(),
            None => {
                return Err(EngineError::RecordNotFound {
                    contract_id: contract_id.to_string(),
                    date,
                });
            }
        };

        ensure_month_editable(&inner, &person_id, YearMonth::from_date(date))?;
        validate_breaks(&update.breaks, date)?;

        // The lookup above proved the key exists
        let record = inner.daily.get_mut(&key).ok_or_else(|| {
            EngineError::RecordNotFound {
                contract_id: contract_id.to_string(),
                date,
            }
        })?;
        record.clock_in = update.clock_in;
        record.clock_out = update.clock_out;
        record.breaks = update.breaks;
        record.category = update.category;
        record.remark = update.remark;
        Ok(record.clone())
    }

    /// Deletes a daily record.
    ///
    /// Refused while the month is pending or approved, which is what makes
    /// approved months immune to hard deletes.
    pub fn delete_day(&self, contract_id: &str, date: NaiveDate) -> EngineResult<()> {
        let mut inner = self.store.lock();

        let key = (contract_id.to_string(), date);
        let person_id = match inner.daily.get(&key) {
            Some(record) => record.person_id.clone(),
            None => {
                return Err(EngineError::RecordNotFound {
                    contract_id: contract_id.to_string(),
                    date,
                });
            }
        };

        ensure_month_editable(&inner, &person_id, YearMonth::from_date(date))?;
        inner.daily.remove(&key);
        Ok(())
    }

    /// Returns the day's hours beyond the contract's free-overtime
    /// allowance. Display-only; monthly billing overtime is decided by
    /// [`calculate_contract_payment`](Self::calculate_contract_payment).
    pub fn day_overtime(&self, contract_id: &str, date: NaiveDate) -> EngineResult<Decimal> {
        let inner = self.store.lock();

        let contract = inner.contracts.get(contract_id).ok_or_else(|| {
            EngineError::ContractNotFound {
                contract_id: contract_id.to_string(),
            }
        })?;
        let record = inner
            .daily
            .get(&(contract_id.to_string(), date))
            .ok_or_else(|| EngineError::RecordNotFound {
                contract_id: contract_id.to_string(),
                date,
            })?;

        let policy = self.rounding.policy_for(contract.client_id.as_deref());
        let hours = actual_working_hours(record.clock_in, record.clock_out, &record.breaks, &policy);
        Ok(day_overtime(hours, contract.free_overtime_hours))
    }

    /// Returns the aggregate consumers should display for a month: the
    /// frozen snapshot when the month is approved, a live recomputation
    /// over the current daily records otherwise.
    pub fn month_aggregate(&self, person_id: &str, ym: YearMonth) -> MonthlyAggregate {
        let inner = self.store.lock();

        if let Some(submission) = inner.submissions.get(&(person_id.to_string(), ym)) {
            if submission.status == SubmissionStatus::Approved {
                if let Some(snapshot) = &submission.snapshot {
                    return snapshot.clone();
                }
            }
        }

        self.aggregate_live(&inner, person_id, ym)
    }

    /// Returns the daily records of a person's month, ordered by date.
    pub fn month_records(&self, person_id: &str, ym: YearMonth) -> Vec<DailyRecord> {
        let inner = self.store.lock();
        inner
            .records_for_month(person_id, ym)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns the month's submission state, display aggregate, and what
    /// the owner can currently do. A month that was never submitted is
    /// reported as a draft.
    pub fn month_status(&self, person_id: &str, ym: YearMonth) -> MonthStatus {
        let inner = self.store.lock();

        let submission = inner
            .submissions
            .get(&(person_id.to_string(), ym))
            .cloned()
            .unwrap_or_else(|| MonthlySubmission::new(person_id, ym));

        let aggregate = match (&submission.status, &submission.snapshot) {
            (SubmissionStatus::Approved, Some(snapshot)) => snapshot.clone(),
            _ => self.aggregate_live(&inner, person_id, ym),
        };

        let status = submission.status;
        MonthStatus {
            submission,
            aggregate,
            can_edit: status.is_editable(),
            can_submit: status.can_submit(),
            can_withdraw: status == SubmissionStatus::Pending,
        }
    }

    /// Submits a person's month for approval.
    ///
    /// Creates the submission lazily on first use. Recomputes the monthly
    /// aggregate over every daily record of the month and freezes it as
    /// the snapshot — overwritten wholesale, never merged — then moves the
    /// submission to pending.
    pub fn submit_month(
        &self,
        person_id: &str,
        ym: YearMonth,
        remark: Option<&str>,
    ) -> EngineResult<MonthlySubmission> {
        let mut inner = self.store.lock();

        // Aggregate first: the transition only commits together with the
        // snapshot it freezes.
        let aggregate = self.aggregate_live(&inner, person_id, ym);

        let submission = inner
            .submissions
            .entry((person_id.to_string(), ym))
            .or_insert_with(|| MonthlySubmission::new(person_id, ym));
        submission.submit(aggregate, remark, Utc::now())?;
        Ok(submission.clone())
    }

    /// Approves a pending month. The snapshot becomes the authoritative
    /// aggregate for all subsequent reads.
    pub fn approve_month(
        &self,
        person_id: &str,
        ym: YearMonth,
        approver_id: &str,
        remark: Option<&str>,
    ) -> EngineResult<MonthlySubmission> {
        let mut inner = self.store.lock();
        let submission = get_submission_mut(&mut inner, person_id, ym)?;
        submission.approve(approver_id, remark, Utc::now())?;
        Ok(submission.clone())
    }

    /// Rejects a pending month. The snapshot is kept for audit but stops
    /// being authoritative; the owner may edit daily records and resubmit.
    pub fn reject_month(
        &self,
        person_id: &str,
        ym: YearMonth,
        approver_id: &str,
        reason: &str,
    ) -> EngineResult<MonthlySubmission> {
        let mut inner = self.store.lock();
        let submission = get_submission_mut(&mut inner, person_id, ym)?;
        submission.reject(approver_id, reason, Utc::now())?;
        Ok(submission.clone())
    }

    /// Withdraws a pending month, clearing the snapshot.
    pub fn withdraw_month(
        &self,
        person_id: &str,
        ym: YearMonth,
    ) -> EngineResult<MonthlySubmission> {
        let mut inner = self.store.lock();
        let submission = get_submission_mut(&mut inner, person_id, ym)?;
        submission.withdraw(Utc::now())?;
        Ok(submission.clone())
    }

    /// Calculates the billable amount for a contract and an actual-hours
    /// figure, without touching any stored state.
    pub fn calculate_contract_payment(
        &self,
        contract_id: &str,
        actual_hours: Decimal,
    ) -> EngineResult<PaymentBreakdown> {
        let contract = self.contract(contract_id)?;
        calculate_monthly_payment(&contract, actual_hours)
    }

    /// Computes the aggregate from the month's current daily records.
    ///
    /// Hours come from time accounting under the rounding policy of each
    /// record's client; day counts come from the attendance categories.
    fn aggregate_live(&self, inner: &StoreInner, person_id: &str, ym: YearMonth) -> MonthlyAggregate {
        let mut aggregate = MonthlyAggregate::default();

        for record in inner.records_for_month(person_id, ym) {
            let client_id = inner
                .contracts
                .get(&record.contract_id)
                .and_then(|c| c.client_id.as_deref());
            let policy = self.rounding.policy_for(client_id);

            aggregate.total_hours +=
                actual_working_hours(record.clock_in, record.clock_out, &record.breaks, &policy);

            match record.category {
                AttendanceCategory::Normal => aggregate.working_days += 1,
                AttendanceCategory::PaidLeave => aggregate.paid_leave_days += 1,
                AttendanceCategory::SickLeave => aggregate.sick_leave_days += 1,
                AttendanceCategory::Absence => aggregate.absence_days += 1,
                AttendanceCategory::Late => aggregate.late_count += 1,
                AttendanceCategory::EarlyLeave => aggregate.early_leave_count += 1,
            }
        }

        aggregate
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &EngineStore {
        &self.store
    }
}

fn validate_breaks(breaks: &BreakMinutes, date: NaiveDate) -> EngineResult<()> {
    if breaks.total() >= 24 * 60 {
        return Err(EngineError::InvalidRecord {
            date,
            message: format!("break minutes ({}) exceed a full day", breaks.total()),
        });
    }
    Ok(())
}

fn ensure_month_editable(inner: &StoreInner, person_id: &str, ym: YearMonth) -> EngineResult<()> {
    if let Some(submission) = inner.submissions.get(&(person_id.to_string(), ym)) {
        if !submission.status.is_editable() {
            return Err(EngineError::MonthNotEditable {
                year_month: ym.to_string(),
                status: submission.status,
            });
        }
    }
    Ok(())
}

fn get_submission_mut<'a>(
    inner: &'a mut StoreInner,
    person_id: &str,
    ym: YearMonth,
) -> EngineResult<&'a mut MonthlySubmission> {
    inner
        .submissions
        .get_mut(&(person_id.to_string(), ym))
        .ok_or_else(|| EngineError::SubmissionNotFound {
            person_id: person_id.to_string(),
            year_month: ym.to_string(),
        })
}
