//! The tax and employment cost calculation.
//!
//! [`calculate_tax_and_cost`] is the single entry point every presentation
//! layer goes through. It validates the input, then runs each rule in order,
//! numbering their audit steps.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PolicyConfig;
use crate::error::EngineResult;
use crate::models::{AuditTrace, CompensationInput, TaxCostBreakdown};

use super::aggregates::{calculate_after_tax_income, calculate_employer_cost, summarize};
use super::contributions::{calculate_employee_contributions, calculate_employer_contributions};
use super::tax_bracket::calculate_annual_tax;
use super::taxable_income::{calculate_annual_income, calculate_taxable_income};

/// Computes the full breakdown for `input` under `policy`.
///
/// # Errors
///
/// Returns `InvalidInput` before any arithmetic if a field is negative, out
/// of range, or `annual_months` is zero, and `InvalidPolicy` if `policy`
/// fails [`PolicyConfig::validate`]. Returns `CalculationError` if the
/// policy's tax table has no bracket for the taxable income.
///
/// # Examples
///
/// ```
/// use tax_cost_engine::calculation::calculate_tax_and_cost;
/// use tax_cost_engine::config::PolicyConfig;
/// use tax_cost_engine::models::CompensationInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = CompensationInput::new(
///     Decimal::from(30000),
///     13,
///     Decimal::from(4812),
///     Decimal::from(30000),
///     Decimal::ZERO,
/// );
/// let breakdown = calculate_tax_and_cost(&input, &PolicyConfig::default()).unwrap();
/// assert_eq!(
///     breakdown.final_results.after_tax_income,
///     Decimal::from_str("301509.504").unwrap()
/// );
/// ```
pub fn calculate_tax_and_cost(
    input: &CompensationInput,
    policy: &PolicyConfig,
) -> EngineResult<TaxCostBreakdown> {
    input.validate()?;
    policy.validate()?;

    let mut trace = AuditTrace::default();
    let mut step_number: u32 = 1;

    let employee = calculate_employee_contributions(
        input.social_insurance_base,
        input.housing_fund_base,
        &policy.employee,
        step_number,
    );
    trace.steps.push(employee.audit_step);
    step_number += 1;
    let employee = employee.contributions;

    let income = calculate_annual_income(input.monthly_salary, input.annual_months, step_number);
    trace.steps.push(income.audit_step);
    step_number += 1;
    let annual_income = income.annual_income;

    let taxable = calculate_taxable_income(
        annual_income,
        policy.basic_deduction,
        employee.annual_total,
        input.special_deduction,
        step_number,
    );
    trace.steps.push(taxable.audit_step);
    step_number += 1;

    let tax = calculate_annual_tax(taxable.taxable_income, &policy.tax_brackets, step_number)?;
    trace.steps.push(tax.audit_step);
    step_number += 1;
    let tax_calculation = tax.calculation;

    let after_tax = calculate_after_tax_income(
        annual_income,
        employee.annual_total,
        tax_calculation.annual_tax,
        step_number,
    );
    trace.steps.push(after_tax.audit_step);
    step_number += 1;

    let employer = calculate_employer_contributions(
        input.social_insurance_base,
        input.housing_fund_base,
        &policy.employer,
        step_number,
    );
    trace.steps.push(employer.audit_step);
    step_number += 1;
    let employer = employer.contributions;

    let cost = calculate_employer_cost(annual_income, &employer, step_number);
    trace.steps.push(cost.audit_step);

    let final_results = summarize(
        after_tax.after_tax_income,
        cost.annual_company_cost,
        &employee,
        &employer,
    );

    debug!(
        policy = %policy.name,
        taxable_income = %tax_calculation.taxable_income,
        annual_tax = %tax_calculation.annual_tax,
        after_tax_income = %final_results.after_tax_income,
        annual_company_cost = %final_results.annual_company_cost,
        "Calculated tax and employment cost"
    );

    Ok(TaxCostBreakdown {
        policy: policy.name.clone(),
        monthly_salary: input.monthly_salary,
        annual_months: input.annual_months,
        annual_income,
        basic_deduction: policy.basic_deduction,
        special_deduction: input.special_deduction,
        employee,
        employer,
        tax_calculation,
        final_results,
        audit: trace,
    })
}

/// Computes the breakdown for the five raw parameters under the built-in policy.
pub fn compute(
    monthly_salary: Decimal,
    annual_months: u32,
    social_insurance_base: Decimal,
    housing_fund_base: Decimal,
    special_deduction: Decimal,
) -> EngineResult<TaxCostBreakdown> {
    let input = CompensationInput::new(
        monthly_salary,
        annual_months,
        social_insurance_base,
        housing_fund_base,
        special_deduction,
    );
    calculate_tax_and_cost(&input, &PolicyConfig::default())
}
