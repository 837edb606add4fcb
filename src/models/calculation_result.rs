//! Calculation result models for the tax and employment cost engine.
//!
//! This module contains the [`TaxCostBreakdown`] type and its associated
//! structures that capture every output of a calculation: per-category
//! contributions for both sides, the tax computation, the final aggregates and
//! an audit trace of the steps that produced them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A contribution amount expressed monthly and annually.
///
/// Contributions are paid every calendar month, so the annual figure is
/// always twelve times the monthly one regardless of the number of salary
/// payments.
///
/// # Example
///
/// ```
/// use tax_cost_engine::models::ContributionAmount;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = ContributionAmount::from_monthly(Decimal::from_str("384.96").unwrap());
/// assert_eq!(amount.annual, Decimal::from_str("4619.52").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionAmount {
    /// Amount paid each month.
    pub monthly: Decimal,
    /// Amount paid over twelve months.
    pub annual: Decimal,
}

impl ContributionAmount {
    /// Number of contribution months per year.
    pub const MONTHS: u32 = 12;

    /// Builds an amount from its monthly value.
    pub fn from_monthly(monthly: Decimal) -> Self {
        Self {
            monthly,
            annual: monthly * Decimal::from(Self::MONTHS),
        }
    }
}

/// Contributions withheld from the employee's salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeContributions {
    /// Pension insurance.
    pub pension: ContributionAmount,
    /// Medical insurance.
    pub medical: ContributionAmount,
    /// Unemployment insurance.
    pub unemployment: ContributionAmount,
    /// Housing provident fund.
    pub housing_fund: ContributionAmount,
    /// Pension + medical + unemployment, per month.
    pub monthly_social_insurance: Decimal,
    /// Social insurance plus housing fund, per month.
    pub monthly_total: Decimal,
    /// Social insurance plus housing fund over the year (专项扣除).
    pub annual_total: Decimal,
}

/// Contributions paid by the employer on top of salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Pension insurance.
    pub pension: ContributionAmount,
    /// Medical insurance (including maternity).
    pub medical: ContributionAmount,
    /// Unemployment insurance.
    pub unemployment: ContributionAmount,
    /// Work injury insurance, employer only.
    pub injury: ContributionAmount,
    /// Housing provident fund.
    pub housing_fund: ContributionAmount,
    /// Pension + medical + unemployment + injury, per month.
    pub monthly_social_insurance: Decimal,
    /// Social insurance plus housing fund, per month.
    pub monthly_total: Decimal,
    /// Social insurance plus housing fund over the year.
    pub annual_total: Decimal,
}

/// The income tax computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculation {
    /// Annual taxable income, floored at zero.
    pub taxable_income: Decimal,
    /// Marginal rate of the matched bracket.
    pub applied_rate: Decimal,
    /// Quick deduction of the matched bracket.
    pub deduction_amount: Decimal,
    /// Annual income tax owed.
    pub annual_tax: Decimal,
}

/// Employee and employer insurance combined per category, annually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedInsurance {
    /// Pension, both sides.
    pub pension: Decimal,
    /// Medical, both sides.
    pub medical: Decimal,
    /// Unemployment, both sides.
    pub unemployment: Decimal,
    /// Work injury, employer only.
    pub injury: Decimal,
}

/// Final figures for the employee and the employer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResults {
    /// Gross income minus the employee's contributions and tax.
    pub after_tax_income: Decimal,
    /// `after_tax_income / 12`.
    pub monthly_after_tax: Decimal,
    /// Gross income plus all employer contributions.
    pub annual_company_cost: Decimal,
    /// `annual_company_cost / 12`.
    pub monthly_company_cost: Decimal,
    /// Social insurance paid by both sides over the year.
    pub total_social_insurance: Decimal,
    /// `total_social_insurance` split by category.
    pub social_insurance_by_category: CombinedInsurance,
    /// Housing fund paid by both sides over the year.
    pub total_housing_fund: Decimal,
    /// After-tax income plus both sides' housing fund.
    pub total_cash_benefit: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

/// The complete result of a tax and employment cost calculation.
///
/// Serializes with the keys `personal_insurance`, `company_insurance`,
/// `tax_calculation` and `final_results` so that JSON consumers see the same
/// grouping as the text report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCostBreakdown {
    /// Name of the policy the figures were computed under.
    pub policy: String,
    /// Gross monthly salary, echoed from the input.
    pub monthly_salary: Decimal,
    /// Number of salary payments, echoed from the input.
    pub annual_months: u32,
    /// `monthly_salary * annual_months`.
    pub annual_income: Decimal,
    /// Annual basic deduction of the policy.
    pub basic_deduction: Decimal,
    /// Caller-supplied special additional deduction.
    pub special_deduction: Decimal,
    /// Employee-side contributions.
    #[serde(rename = "personal_insurance")]
    pub employee: EmployeeContributions,
    /// Employer-side contributions.
    #[serde(rename = "company_insurance")]
    pub employer: EmployerContributions,
    /// Income tax computation.
    pub tax_calculation: TaxCalculation,
    /// Aggregates for both sides.
    pub final_results: FinalResults,
    /// Steps taken to produce this breakdown.
    pub audit: AuditTrace,
}
