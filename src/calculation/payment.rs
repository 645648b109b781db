//! Monthly payment calculation from contract terms.
//!
//! Converts a month's actual working hours into a billable amount using the
//! contract's guaranteed/overtime/shortfall rules. All rates are applied to
//! the implied hourly rate, `unit_price / standard_working_hours`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::Contract;

/// The result of a monthly payment calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    /// The contract's monthly base amount, always owed in full.
    pub base_payment: Decimal,
    /// Billable overtime amount, zero unless the overtime tier fired.
    pub overtime_payment: Decimal,
    /// Shortfall deduction, zero unless the shortfall tier fired.
    pub shortage_deduction: Decimal,
    /// `base_payment + overtime_payment - shortage_deduction`.
    pub total_payment: Decimal,
    /// Billable overtime hours behind `overtime_payment`.
    pub overtime_hours: Decimal,
    /// Shortfall hours behind `shortage_deduction`.
    pub shortage_hours: Decimal,
}

/// Calculates the billable amount for a month of actual hours.
///
/// Tiers are evaluated in order:
///
/// 1. **Guaranteed hours** — actual hours under `min_guaranteed_hours`
///    still earn the full base payment and suppress the shortfall tier.
/// 2. **Overtime** — hours above `max_working_hours` are billable once the
///    free-overtime allowance is used up, at
///    `hourly_rate * overtime_rate`.
/// 3. **Shortfall** — hours below `min_working_hours` are deducted at
///    `hourly_rate * (1 - shortage_rate)`, unless tier 1 applied.
///
/// A contract with no thresholds set is a flat monthly fee: the result is
/// always the base payment regardless of hours.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::calculate_monthly_payment;
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
///     max_working_hours: Some(Decimal::new(180, 0)),
///     min_guaranteed_hours: None,
///     free_overtime_hours: Decimal::new(10, 0),
///     overtime_rate: Decimal::new(125, 2),
///     shortage_rate: Decimal::ONE,
/// };
///
/// let breakdown = calculate_monthly_payment(&contract, Decimal::new(200, 0)).unwrap();
/// assert_eq!(breakdown.overtime_payment, Decimal::new(62_500, 0));
/// assert_eq!(breakdown.total_payment, Decimal::new(862_500, 0));
/// ```
pub fn calculate_monthly_payment(
    contract: &Contract,
    actual_hours: Decimal,
) -> EngineResult<PaymentBreakdown> {
    contract.validate()?;

    let hourly_rate = contract.hourly_rate();
    let base_payment = contract.unit_price;

    // Guaranteed-hours tier: full base pay, shortfall suppressed.
    let guaranteed = contract
        .min_guaranteed_hours
        .is_some_and(|guaranteed| actual_hours < guaranteed);

    // Overtime tier.
    let mut overtime_hours = Decimal::ZERO;
    let mut overtime_payment = Decimal::ZERO;
    if let Some(max_hours) = contract.max_working_hours {
        if actual_hours > max_hours {
            let billable = actual_hours - max_hours - contract.free_overtime_hours;
            if billable > Decimal::ZERO {
                overtime_hours = billable;
                overtime_payment = hourly_rate * billable * contract.overtime_rate;
            }
        }
    }

    // Shortfall tier.
    let mut shortage_hours = Decimal::ZERO;
    let mut shortage_deduction = Decimal::ZERO;
    if !guaranteed {
        if let Some(min_hours) = contract.min_working_hours {
            if actual_hours < min_hours {
                shortage_hours = min_hours - actual_hours;
                shortage_deduction =
                    hourly_rate * shortage_hours * (Decimal::ONE - contract.shortage_rate);
            }
        }
    }

    let total_payment = base_payment + overtime_payment - shortage_deduction;

    // Normalized so amounts serialize without trailing zeros from the
    // intermediate multiplications
    Ok(PaymentBreakdown {
        base_payment: base_payment.normalize(),
        overtime_payment: overtime_payment.normalize(),
        shortage_deduction: shortage_deduction.normalize(),
        total_payment: total_payment.normalize(),
        overtime_hours: overtime_hours.normalize(),
        shortage_hours: shortage_hours.normalize(),
    })
}
