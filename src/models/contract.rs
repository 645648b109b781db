//! Contract model.
//!
//! A [`Contract`] is the billing agreement governing a person's engagement.
//! The engine treats contracts as read-only once registered; amendments are
//! an external collaborator's concern.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The billing agreement for one engagement.
///
/// All hour thresholds are monthly figures. A contract with none of the
/// optional thresholds set is a flat monthly fee: the hours worked are
/// informational only and the billed amount is always `unit_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique identifier for the contract.
    pub id: String,
    /// The person engaged under this contract.
    pub person_id: String,
    /// The client whose rounding policy applies to this contract's
    /// attendance, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Monthly base amount.
    pub unit_price: Decimal,
    /// Standard working hours per month. Divisor for the implied hourly
    /// rate, so it must be positive.
    pub standard_working_hours: Decimal,
    /// Monthly floor below which the shortfall deduction applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_working_hours: Option<Decimal>,
    /// Monthly ceiling above which overtime is billed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_working_hours: Option<Decimal>,
    /// Threshold below which full base pay is still owed and no shortfall
    /// deduction is taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_guaranteed_hours: Option<Decimal>,
    /// Hours of overage not billed as overtime.
    #[serde(default)]
    pub free_overtime_hours: Decimal,
    /// Multiplier applied to the hourly rate for billable overtime.
    #[serde(default = "default_rate")]
    pub overtime_rate: Decimal,
    /// Multiplier governing the shortfall deduction.
    #[serde(default = "default_rate")]
    pub shortage_rate: Decimal,
}

fn default_rate() -> Decimal {
    Decimal::ONE
}

impl Contract {
    /// Validates the contract's invariants.
    ///
    /// `standard_working_hours` must be positive: it is the divisor for the
    /// implied hourly rate.
    pub fn validate(&self) -> EngineResult<()> {
        if self.standard_working_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidContract {
                field: "standard_working_hours".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.unit_price < Decimal::ZERO {
            return Err(EngineError::InvalidContract {
                field: "unit_price".to_string(),
                message: "cannot be negative".to_string(),
            });
        }
        if self.free_overtime_hours < Decimal::ZERO {
            return Err(EngineError::InvalidContract {
                field: "free_overtime_hours".to_string(),
                message: "cannot be negative".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the implied hourly rate, `unit_price / standard_working_hours`.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::Contract;
    /// use rust_decimal::Decimal;
    ///
    /// let contract = Contract {
    ///     id: "c-001".to_string(),
    ///     person_id: "p-001".to_string(),
    ///     client_id: None,
    ///     unit_price: Decimal::new(800_000, 0),
    ///     standard_working_hours: Decimal::new(160, 0),
    ///     min_working_hours: None,
    ///     max_working_hours: None,
    ///     min_guaranteed_hours: None,
    ///     free_overtime_hours: Decimal::ZERO,
    ///     overtime_rate: Decimal::ONE,
    ///     shortage_rate: Decimal::ONE,
    /// };
    /// assert_eq!(contract.hourly_rate(), Decimal::new(5_000, 0));
    /// ```
    pub fn hourly_rate(&self) -> Decimal {
        self.unit_price / self.standard_working_hours
    }
}
