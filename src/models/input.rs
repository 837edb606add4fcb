//! Compensation input model.
//!
//! This module defines the caller-supplied parameters of a calculation and
//! their validation rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest accepted monetary input (one quadrillion).
///
/// Keeps every intermediate product and sum well inside `Decimal`'s range so
/// the calculation never overflows.
pub const MAX_MONETARY_INPUT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Compensation parameters for a single employee.
///
/// All monetary fields are in the same currency unit. Defaults for missing
/// values are the caller's concern; every field here is required.
///
/// # Example
///
/// ```
/// use tax_cost_engine::models::CompensationInput;
/// use rust_decimal::Decimal;
///
/// let input = CompensationInput::new(
///     Decimal::from(30000),
///     13,
///     Decimal::from(4812),
///     Decimal::from(30000),
///     Decimal::ZERO,
/// );
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationInput {
    /// Gross contractual monthly pay.
    pub monthly_salary: Decimal,
    /// Number of salary payments per year (e.g. 13 for a "13th month" package).
    pub annual_months: u32,
    /// Wage base for pension, medical, unemployment and work injury insurance.
    pub social_insurance_base: Decimal,
    /// Wage base for the housing provident fund.
    pub housing_fund_base: Decimal,
    /// Annual special additional deduction (专项附加扣除).
    pub special_deduction: Decimal,
}

impl CompensationInput {
    /// Creates a new input without validating it.
    pub fn new(
        monthly_salary: Decimal,
        annual_months: u32,
        social_insurance_base: Decimal,
        housing_fund_base: Decimal,
        special_deduction: Decimal,
    ) -> Self {
        Self {
            monthly_salary,
            annual_months,
            social_insurance_base,
            housing_fund_base,
            special_deduction,
        }
    }

    /// Checks every field, returning the first violation found.
    ///
    /// Monetary fields must lie in `[0, MAX_MONETARY_INPUT]` and
    /// `annual_months` must be at least one.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in self.monetary_fields() {
            if value < Decimal::ZERO {
                return Err(EngineError::invalid_input(
                    field,
                    format!("must not be negative (got {})", value),
                ));
            }
            if value > MAX_MONETARY_INPUT {
                return Err(EngineError::invalid_input(
                    field,
                    format!("must not exceed {} (got {})", MAX_MONETARY_INPUT, value),
                ));
            }
        }

        if self.annual_months == 0 {
            return Err(EngineError::invalid_input(
                "annual_months",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    fn monetary_fields(&self) -> [(&'static str, Decimal); 4] {
        [
            ("monthly_salary", self.monthly_salary),
            ("social_insurance_base", self.social_insurance_base),
            ("housing_fund_base", self.housing_fund_base),
            ("special_deduction", self.special_deduction),
        ]
    }
}
