//! In-memory persistence for the engine.
//!
//! The store stands in for the external persistence layer: daily records
//! keyed by (contract, work date), submissions keyed by (person,
//! year-month), and the contract registry. A single mutex serializes every
//! operation, which is what gives submit/approve/reject/withdraw for the
//! same month their mutual exclusion, the way row-level locking would in a
//! relational store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::models::{Contract, DailyRecord, MonthlySubmission, YearMonth};

/// The engine's tables.
#[derive(Debug, Default)]
pub(crate) struct StoreInner {
    /// Contracts by id.
    pub(crate) contracts: HashMap<String, Contract>,
    /// Daily records by (contract id, work date).
    pub(crate) daily: BTreeMap<(String, NaiveDate), DailyRecord>,
    /// Submissions by (person id, year-month).
    pub(crate) submissions: HashMap<(String, YearMonth), MonthlySubmission>,
}

impl StoreInner {
    /// All daily records for a person within a month, ordered by date.
    pub(crate) fn records_for_month(&self, person_id: &str, ym: YearMonth) -> Vec<&DailyRecord> {
        self.daily
            .values()
            .filter(|r| r.person_id == person_id && ym.contains(r.work_date))
            .collect()
    }
}

/// Mutex-guarded storage. One lock scope is one transaction boundary:
/// callers compute the full outcome of an operation before mutating, so a
/// guard failure partway never leaves a submission whose status does not
/// match its snapshot.
#[derive(Debug, Default)]
pub(crate) struct EngineStore {
    inner: Mutex<StoreInner>,
}

impl EngineStore {
    /// Locks the store for one operation. A poisoned lock is recovered:
    /// the engine never mutates behind a panic, so the data is intact.
    pub(crate) fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
