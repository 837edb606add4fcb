//! Request types for the calculation API.
//!
//! This module defines the JSON request structure for the `/api/calculate`
//! endpoint. Every field is optional; missing fields take the form defaults
//! below before the request reaches the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{EngineError, EngineResult};
use crate::models::CompensationInput;

/// Default monthly salary when the request omits it.
pub const DEFAULT_MONTHLY_SALARY: Decimal = Decimal::from_parts(30000, 0, 0, false, 0);
/// Default number of salary payments per year.
pub const DEFAULT_ANNUAL_MONTHS: i64 = 13;
/// Default social insurance base (Hangzhou minimum).
pub const DEFAULT_SOCIAL_INSURANCE_BASE: Decimal = Decimal::from_parts(4812, 0, 0, false, 0);
/// Default housing fund base.
pub const DEFAULT_HOUSING_FUND_BASE: Decimal = Decimal::from_parts(30000, 0, 0, false, 0);

/// Request body for the `/api/calculate` endpoint.
///
/// Amounts accept JSON numbers or numeric strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Gross monthly salary.
    #[serde(default)]
    pub monthly_salary: Option<Decimal>,
    /// Salary payments per year, as a whole number or a whole-number string.
    /// Signed so negative values reach validation.
    #[serde(default, deserialize_with = "deserialize_months")]
    pub annual_months: Option<i64>,
    /// Social insurance contribution base.
    #[serde(default)]
    pub social_insurance_base: Option<Decimal>,
    /// Housing fund contribution base.
    #[serde(default)]
    pub housing_fund_base: Option<Decimal>,
    /// Annual special additional deduction.
    #[serde(default)]
    pub special_deduction: Option<Decimal>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WholeNumber {
    Number(i64),
    Text(String),
}

fn deserialize_months<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<WholeNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(WholeNumber::Number(months)) => Ok(Some(months)),
        Some(WholeNumber::Text(text)) => text.trim().parse().map(Some).map_err(|_| {
            de::Error::custom(format!(
                "annual_months must be a whole number (got {:?})",
                text
            ))
        }),
    }
}

impl TryFrom<CalculationRequest> for CompensationInput {
    type Error = EngineError;

    fn try_from(req: CalculationRequest) -> EngineResult<Self> {
        let months = req.annual_months.unwrap_or(DEFAULT_ANNUAL_MONTHS);
        let annual_months = u32::try_from(months).map_err(|_| {
            EngineError::invalid_input(
                "annual_months",
                format!("must be a positive whole number (got {})", months),
            )
        })?;

        Ok(CompensationInput {
            monthly_salary: req.monthly_salary.unwrap_or(DEFAULT_MONTHLY_SALARY),
            annual_months,
            social_insurance_base: req
                .social_insurance_base
                .unwrap_or(DEFAULT_SOCIAL_INSURANCE_BASE),
            housing_fund_base: req.housing_fund_base.unwrap_or(DEFAULT_HOUSING_FUND_BASE),
            special_deduction: req.special_deduction.unwrap_or(Decimal::ZERO),
        })
    }
}
