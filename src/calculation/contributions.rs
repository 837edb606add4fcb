//! Social insurance and housing fund contribution calculation.
//!
//! This module computes the monthly and annual contributions withheld from the
//! employee and paid by the employer. Insurance categories are charged on the
//! social insurance base, the housing fund on its own base.

use rust_decimal::Decimal;

use crate::config::ContributionRates;
use crate::models::{AuditStep, ContributionAmount, EmployeeContributions, EmployerContributions};

/// The result of the employee contribution calculation.
#[derive(Debug, Clone)]
pub struct EmployeeContributionResult {
    /// The itemized employee contributions.
    pub contributions: EmployeeContributions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of the employer contribution calculation.
#[derive(Debug, Clone)]
pub struct EmployerContributionResult {
    /// The itemized employer contributions.
    pub contributions: EmployerContributions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the contributions withheld from the employee.
///
/// Pension, medical and unemployment are charged on `social_insurance_base`
/// and the housing fund on `housing_fund_base`. The employee work injury rate
/// is ignored: only employers pay that premium. The annual total is the
/// special deduction (专项扣除) used when computing taxable income.
///
/// # Examples
///
/// ```
/// use tax_cost_engine::calculation::calculate_employee_contributions;
/// use tax_cost_engine::config::HANGZHOU_EMPLOYEE_RATES;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_employee_contributions(
///     Decimal::from(4812),
///     Decimal::from(30000),
///     &HANGZHOU_EMPLOYEE_RATES,
///     1,
/// );
/// assert_eq!(result.contributions.annual_total, Decimal::from_str("49263.12").unwrap());
/// ```
pub fn calculate_employee_contributions(
    social_insurance_base: Decimal,
    housing_fund_base: Decimal,
    rates: &ContributionRates,
    step_number: u32,
) -> EmployeeContributionResult {
    let pension = ContributionAmount::from_monthly(social_insurance_base * rates.pension);
    let medical = ContributionAmount::from_monthly(social_insurance_base * rates.medical);
    let unemployment =
        ContributionAmount::from_monthly(social_insurance_base * rates.unemployment);
    let housing_fund = ContributionAmount::from_monthly(housing_fund_base * rates.housing_fund);

    let monthly_social_insurance = pension.monthly + medical.monthly + unemployment.monthly;
    let monthly_total = monthly_social_insurance + housing_fund.monthly;
    let annual_total = monthly_total * Decimal::from(ContributionAmount::MONTHS);

    let audit_step = AuditStep {
        step_number,
        rule_id: "employee_contributions".to_string(),
        rule_name: "Employee Contributions".to_string(),
        input: serde_json::json!({
            "social_insurance_base": social_insurance_base.normalize().to_string(),
            "housing_fund_base": housing_fund_base.normalize().to_string(),
            "pension_rate": rates.pension.normalize().to_string(),
            "medical_rate": rates.medical.normalize().to_string(),
            "unemployment_rate": rates.unemployment.normalize().to_string(),
            "housing_fund_rate": rates.housing_fund.normalize().to_string()
        }),
        output: serde_json::json!({
            "monthly_social_insurance": monthly_social_insurance.normalize().to_string(),
            "monthly_housing_fund": housing_fund.monthly.normalize().to_string(),
            "monthly_total": monthly_total.normalize().to_string(),
            "annual_total": annual_total.normalize().to_string()
        }),
        reasoning: format!(
            "({} insurance + {} housing fund) x 12 = {} withheld per year",
            monthly_social_insurance.normalize(),
            housing_fund.monthly.normalize(),
            annual_total.normalize()
        ),
    };

    EmployeeContributionResult {
        contributions: EmployeeContributions {
            pension,
            medical,
            unemployment,
            housing_fund,
            monthly_social_insurance,
            monthly_total,
            annual_total,
        },
        audit_step,
    }
}

/// Calculates the contributions paid by the employer.
///
/// Mirrors [`calculate_employee_contributions`] with the employer rates and
/// adds the work injury premium, which is charged on the social insurance base.
pub fn calculate_employer_contributions(
    social_insurance_base: Decimal,
    housing_fund_base: Decimal,
    rates: &ContributionRates,
    step_number: u32,
) -> EmployerContributionResult {
    let pension = ContributionAmount::from_monthly(social_insurance_base * rates.pension);
    let medical = ContributionAmount::from_monthly(social_insurance_base * rates.medical);
    let unemployment =
        ContributionAmount::from_monthly(social_insurance_base * rates.unemployment);
    let injury = ContributionAmount::from_monthly(social_insurance_base * rates.work_injury);
    let housing_fund = ContributionAmount::from_monthly(housing_fund_base * rates.housing_fund);

    let monthly_social_insurance =
        pension.monthly + medical.monthly + unemployment.monthly + injury.monthly;
    let monthly_total = monthly_social_insurance + housing_fund.monthly;
    let annual_total = monthly_total * Decimal::from(ContributionAmount::MONTHS);

    let audit_step = AuditStep {
        step_number,
        rule_id: "employer_contributions".to_string(),
        rule_name: "Employer Contributions".to_string(),
        input: serde_json::json!({
            "social_insurance_base": social_insurance_base.normalize().to_string(),
            "housing_fund_base": housing_fund_base.normalize().to_string(),
            "pension_rate": rates.pension.normalize().to_string(),
            "medical_rate": rates.medical.normalize().to_string(),
            "unemployment_rate": rates.unemployment.normalize().to_string(),
            "work_injury_rate": rates.work_injury.normalize().to_string(),
            "housing_fund_rate": rates.housing_fund.normalize().to_string()
        }),
        output: serde_json::json!({
            "monthly_social_insurance": monthly_social_insurance.normalize().to_string(),
            "monthly_housing_fund": housing_fund.monthly.normalize().to_string(),
            "monthly_total": monthly_total.normalize().to_string(),
            "annual_total": annual_total.normalize().to_string()
        }),
        reasoning: format!(
            "({} insurance + {} housing fund) x 12 = {} paid by the employer per year",
            monthly_social_insurance.normalize(),
            housing_fund.monthly.normalize(),
            annual_total.normalize()
        ),
    };

    EmployerContributionResult {
        contributions: EmployerContributions {
            pension,
            medical,
            unemployment,
            injury,
            housing_fund,
            monthly_social_insurance,
            monthly_total,
            annual_total,
        },
        audit_step,
    }
}
