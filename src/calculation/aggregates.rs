//! After-tax income, employer cost and the combined reporting figures.
//!
//! Contribution and tax figures feed in here; every aggregate is derived so
//! that `annual_company_cost == employer.monthly_total * 12 + annual_income`
//! and `total_cash_benefit == after_tax_income + total_housing_fund` hold
//! exactly.

use rust_decimal::Decimal;

use crate::models::{
    AuditStep, CombinedInsurance, ContributionAmount, EmployeeContributions,
    EmployerContributions, FinalResults,
};

/// The result of the after-tax income calculation.
#[derive(Debug, Clone)]
pub struct AfterTaxIncomeResult {
    /// Gross income minus employee contributions and tax.
    pub after_tax_income: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of the employer cost calculation.
#[derive(Debug, Clone)]
pub struct EmployerCostResult {
    /// Gross income plus all employer contributions over the year.
    pub annual_company_cost: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates after-tax income.
///
/// Employee contributions are a cash outflow of their own: they reduce the
/// tax base and are also withheld from pay, so they are subtracted here
/// alongside the tax.
pub fn calculate_after_tax_income(
    annual_income: Decimal,
    personal_contributions: Decimal,
    annual_tax: Decimal,
    step_number: u32,
) -> AfterTaxIncomeResult {
    let after_tax_income = annual_income - personal_contributions - annual_tax;

    AfterTaxIncomeResult {
        after_tax_income,
        audit_step: AuditStep {
            step_number,
            rule_id: "after_tax_income".to_string(),
            rule_name: "After-Tax Income".to_string(),
            input: serde_json::json!({
                "annual_income": annual_income.normalize().to_string(),
                "personal_contributions": personal_contributions.normalize().to_string(),
                "annual_tax": annual_tax.normalize().to_string()
            }),
            output: serde_json::json!({
                "after_tax_income": after_tax_income.normalize().to_string()
            }),
            reasoning: format!(
                "{} - {} - {} = {}",
                annual_income.normalize(),
                personal_contributions.normalize(),
                annual_tax.normalize(),
                after_tax_income.normalize()
            ),
        },
    }
}

/// Calculates the fully loaded annual cost of employment.
///
/// `annual_company_cost = employer monthly contributions * 12 + annual_income`.
pub fn calculate_employer_cost(
    annual_income: Decimal,
    employer: &EmployerContributions,
    step_number: u32,
) -> EmployerCostResult {
    let annual_company_cost =
        employer.monthly_total * Decimal::from(ContributionAmount::MONTHS) + annual_income;

    EmployerCostResult {
        annual_company_cost,
        audit_step: AuditStep {
            step_number,
            rule_id: "employer_cost".to_string(),
            rule_name: "Employer Cost".to_string(),
            input: serde_json::json!({
                "annual_income": annual_income.normalize().to_string(),
                "monthly_contributions": employer.monthly_total.normalize().to_string()
            }),
            output: serde_json::json!({
                "annual_company_cost": annual_company_cost.normalize().to_string()
            }),
            reasoning: format!(
                "{} x 12 + {} = {}",
                employer.monthly_total.normalize(),
                annual_income.normalize(),
                annual_company_cost.normalize()
            ),
        },
    }
}

/// Combines both sides' figures into the final results.
pub fn summarize(
    after_tax_income: Decimal,
    annual_company_cost: Decimal,
    employee: &EmployeeContributions,
    employer: &EmployerContributions,
) -> FinalResults {
    let months = Decimal::from(ContributionAmount::MONTHS);

    let total_social_insurance =
        (employee.monthly_social_insurance + employer.monthly_social_insurance) * months;
    let total_housing_fund = (employee.housing_fund.monthly + employer.housing_fund.monthly) * months;

    FinalResults {
        after_tax_income,
        monthly_after_tax: after_tax_income / months,
        annual_company_cost,
        monthly_company_cost: annual_company_cost / months,
        total_social_insurance,
        social_insurance_by_category: CombinedInsurance {
            pension: employee.pension.annual + employer.pension.annual,
            medical: employee.medical.annual + employer.medical.annual,
            unemployment: employee.unemployment.annual + employer.unemployment.annual,
            injury: employer.injury.annual,
        },
        total_housing_fund,
        total_cash_benefit: after_tax_income + total_housing_fund,
    }
}
