//! Annual income and taxable income calculation.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The result of the annual income calculation.
#[derive(Debug, Clone)]
pub struct AnnualIncomeResult {
    /// Gross annual income.
    pub annual_income: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of the taxable income calculation.
#[derive(Debug, Clone)]
pub struct TaxableIncomeResult {
    /// Taxable income, floored at zero.
    pub taxable_income: Decimal,
    /// Whether deductions exceeded income and the result was floored.
    pub floored: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates gross annual income as `monthly_salary * annual_months`.
///
/// The number of salary payments is independent of the twelve-month
/// contribution cycle.
pub fn calculate_annual_income(
    monthly_salary: Decimal,
    annual_months: u32,
    step_number: u32,
) -> AnnualIncomeResult {
    let annual_income = monthly_salary * Decimal::from(annual_months);

    AnnualIncomeResult {
        annual_income,
        audit_step: AuditStep {
            step_number,
            rule_id: "annual_income".to_string(),
            rule_name: "Annual Income".to_string(),
            input: serde_json::json!({
                "monthly_salary": monthly_salary.normalize().to_string(),
                "annual_months": annual_months
            }),
            output: serde_json::json!({
                "annual_income": annual_income.normalize().to_string()
            }),
            reasoning: format!(
                "{} x {} months = {}",
                monthly_salary.normalize(),
                annual_months,
                annual_income.normalize()
            ),
        },
    }
}

/// Calculates annual taxable income.
///
/// `taxable = annual_income - basic_deduction - personal_contributions -
/// special_deduction`, floored at zero. Deductions exceeding income are not an
/// error; the employee simply owes no tax.
///
/// # Examples
///
/// ```
/// use tax_cost_engine::calculation::calculate_taxable_income;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_taxable_income(
///     Decimal::from(390000),
///     Decimal::from(60000),
///     Decimal::from_str("49263.12").unwrap(),
///     Decimal::ZERO,
///     3,
/// );
/// assert_eq!(result.taxable_income, Decimal::from_str("280736.88").unwrap());
/// assert!(!result.floored);
/// ```
pub fn calculate_taxable_income(
    annual_income: Decimal,
    basic_deduction: Decimal,
    personal_contributions: Decimal,
    special_deduction: Decimal,
    step_number: u32,
) -> TaxableIncomeResult {
    let raw = annual_income - basic_deduction - personal_contributions - special_deduction;
    let floored = raw < Decimal::ZERO;
    let taxable_income = raw.max(Decimal::ZERO);

    let reasoning = if floored {
        format!(
            "Deductions exceed income ({} - {} - {} - {} = {}); taxable income is 0",
            annual_income.normalize(),
            basic_deduction.normalize(),
            personal_contributions.normalize(),
            special_deduction.normalize(),
            raw.normalize()
        )
    } else {
        format!(
            "{} - {} - {} - {} = {}",
            annual_income.normalize(),
            basic_deduction.normalize(),
            personal_contributions.normalize(),
            special_deduction.normalize(),
            taxable_income.normalize()
        )
    };

    TaxableIncomeResult {
        taxable_income,
        floored,
        audit_step: AuditStep {
            step_number,
            rule_id: "taxable_income".to_string(),
            rule_name: "Taxable Income".to_string(),
            input: serde_json::json!({
                "annual_income": annual_income.normalize().to_string(),
                "basic_deduction": basic_deduction.normalize().to_string(),
                "personal_contributions": personal_contributions.normalize().to_string(),
                "special_deduction": special_deduction.normalize().to_string()
            }),
            output: serde_json::json!({
                "taxable_income": taxable_income.normalize().to_string(),
                "floored": floored
            }),
            reasoning,
        },
    }
}
