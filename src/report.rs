//! Human-readable text rendering of a breakdown.
//!
//! The report is grouped the same way as [`TaxCostBreakdown`]: income and
//! deductions, employee contributions, the tax computation, the employee's
//! total benefit and the employer's cost. Amounts are rounded half away from
//! zero to two decimal places; the breakdown itself stays unrounded.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{ContributionAmount, TaxCostBreakdown};

const RULE: &str = "=========================";

/// Formats an amount with two decimal places.
pub fn money(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Formats a rate as a whole or fractional percentage, e.g. `0.20` as `20%`.
pub fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// A [`fmt::Display`] adapter that renders a breakdown as an itemized report.
///
/// # Example
///
/// ```
/// use tax_cost_engine::calculation::compute;
/// use tax_cost_engine::report::TextReport;
/// use rust_decimal::Decimal;
///
/// let breakdown = compute(
///     Decimal::from(30000),
///     13,
///     Decimal::from(4812),
///     Decimal::from(30000),
///     Decimal::ZERO,
/// )
/// .unwrap();
/// let text = TextReport(&breakdown).to_string();
/// assert!(text.contains("Annual income tax: 39227.38"));
/// ```
pub struct TextReport<'a>(pub &'a TaxCostBreakdown);

impl TextReport<'_> {
    fn contribution_line(
        f: &mut fmt::Formatter<'_>,
        label: &str,
        amount: &ContributionAmount,
    ) -> fmt::Result {
        writeln!(
            f,
            "{}: {}/month x 12 = {}/year",
            label,
            money(amount.monthly),
            money(amount.annual)
        )
    }

    fn combined_line(
        f: &mut fmt::Formatter<'_>,
        label: &str,
        total: Decimal,
        employee_monthly: Decimal,
        employer_monthly: Decimal,
    ) -> fmt::Result {
        writeln!(
            f,
            "{}: {}/year = ({} x 12 + {} x 12)",
            label,
            money(total),
            money(employee_monthly),
            money(employer_monthly)
        )
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        let employee = &b.employee;
        let employer = &b.employer;
        let tax = &b.tax_calculation;
        let totals = &b.final_results;

        writeln!(f, "{} Annual Income and Deductions ({}) {}", RULE, b.policy, RULE)?;
        writeln!(
            f,
            "Gross annual income: {} = {} x {} months",
            money(b.annual_income),
            money(b.monthly_salary),
            b.annual_months
        )?;
        writeln!(f, "Basic deduction: {}", money(b.basic_deduction))?;
        writeln!(f, "Special additional deduction: {}", money(b.special_deduction))?;

        writeln!(f)?;
        writeln!(f, "{} Employee Contributions {}", RULE, RULE)?;
        Self::contribution_line(f, "Pension (employee)", &employee.pension)?;
        Self::contribution_line(f, "Medical (employee)", &employee.medical)?;
        Self::contribution_line(f, "Unemployment (employee)", &employee.unemployment)?;
        Self::contribution_line(f, "Housing fund (employee)", &employee.housing_fund)?;
        writeln!(
            f,
            "Total employee contributions: {}/year",
            money(employee.annual_total)
        )?;

        writeln!(f)?;
        writeln!(f, "[Tax]")?;
        writeln!(
            f,
            "Taxable income: {} = ({} - {} - {} - {})",
            money(tax.taxable_income),
            money(b.annual_income),
            money(b.basic_deduction),
            money(employee.annual_total),
            money(b.special_deduction)
        )?;
        writeln!(f, "Applied rate: {}", percent(tax.applied_rate))?;
        writeln!(f, "Quick deduction: {}", money(tax.deduction_amount))?;
        writeln!(f, "Annual income tax: {}", money(tax.annual_tax))?;

        writeln!(f)?;
        writeln!(f, "[Employee Benefit]")?;
        writeln!(
            f,
            "After-tax annual income: {} = ({} - {} - {})",
            money(totals.after_tax_income),
            money(b.annual_income),
            money(employee.annual_total),
            money(tax.annual_tax)
        )?;
        writeln!(
            f,
            "Monthly after-tax income: {}",
            money(totals.monthly_after_tax)
        )?;
        writeln!(f)?;
        Self::combined_line(
            f,
            "Social insurance total",
            totals.total_social_insurance,
            employee.monthly_social_insurance,
            employer.monthly_social_insurance,
        )?;
        let by_category = &totals.social_insurance_by_category;
        Self::combined_line(
            f,
            "    Pension",
            by_category.pension,
            employee.pension.monthly,
            employer.pension.monthly,
        )?;
        Self::combined_line(
            f,
            "    Medical",
            by_category.medical,
            employee.medical.monthly,
            employer.medical.monthly,
        )?;
        Self::combined_line(
            f,
            "    Unemployment",
            by_category.unemployment,
            employee.unemployment.monthly,
            employer.unemployment.monthly,
        )?;
        writeln!(
            f,
            "    Work injury: {}/year = ({} x 12, employer only)",
            money(by_category.injury),
            money(employer.injury.monthly)
        )?;
        Self::combined_line(
            f,
            "Housing fund",
            totals.total_housing_fund,
            employee.housing_fund.monthly,
            employer.housing_fund.monthly,
        )?;
        writeln!(
            f,
            "Total cash benefit: {} = {} + {}",
            money(totals.total_cash_benefit),
            money(totals.after_tax_income),
            money(totals.total_housing_fund)
        )?;

        writeln!(f)?;
        writeln!(f, "{} Employer Cost {}", RULE, RULE)?;
        writeln!(
            f,
            "Employer social insurance: {}/month x 12 = {}/year",
            money(employer.monthly_social_insurance),
            money(employer.monthly_social_insurance * Decimal::from(ContributionAmount::MONTHS))
        )?;
        Self::contribution_line(f, "Employer housing fund", &employer.housing_fund)?;
        writeln!(
            f,
            "Annual employment cost: {} = {}/month x 12 + {}",
            money(totals.annual_company_cost),
            money(employer.monthly_total),
            money(b.annual_income)
        )?;
        writeln!(
            f,
            "Monthly employment cost: {} = {} / 12",
            money(totals.monthly_company_cost),
            money(totals.annual_company_cost)
        )
    }
}

/// Renders `breakdown` as an itemized text report.
pub fn render_text(breakdown: &TaxCostBreakdown) -> String {
    TextReport(breakdown).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::compute;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scenario_report() -> String {
        let breakdown = compute(dec("30000"), 13, dec("4812"), dec("30000"), dec("0")).unwrap();
        render_text(&breakdown)
    }

    #[test]
    fn test_money_rounds_half_away_from_zero() {
        assert_eq!(money(dec("39227.376")), "39227.38");
        assert_eq!(money(dec("0.125")), "0.13");
        assert_eq!(money(dec("60000")), "60000.00");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(dec("0.20")), "20%");
        assert_eq!(percent(dec("0.03")), "3%");
        assert_eq!(percent(dec("0.095")), "9.5%");
    }

    #[test]
    fn test_report_income_section() {
        let report = scenario_report();
        assert!(report.contains("Annual Income and Deductions (Hangzhou)"));
        assert!(report.contains("Gross annual income: 390000.00 = 30000.00 x 13 months"));
        assert!(report.contains("Basic deduction: 60000.00"));
    }

    #[test]
    fn test_report_contribution_lines() {
        let report = scenario_report();
        assert!(report.contains("Pension (employee): 384.96/month x 12 = 4619.52/year"));
        assert!(report.contains("Housing fund (employee): 3600.00/month x 12 = 43200.00/year"));
        assert!(report.contains("Total employee contributions: 49263.12/year"));
    }

    #[test]
    fn test_report_tax_section() {
        let report = scenario_report();
        assert!(report.contains(
            "Taxable income: 280736.88 = (390000.00 - 60000.00 - 49263.12 - 0.00)"
        ));
        assert!(report.contains("Applied rate: 20%"));
        assert!(report.contains("Quick deduction: 16920.00"));
    }

    #[test]
    fn test_report_totals() {
        let report = scenario_report();
        assert!(report.contains("After-tax annual income: 301509.50"));
        assert!(report.contains("Monthly after-tax income: 25125.79"));
        assert!(report.contains("Housing fund: 86400.00/year = (3600.00 x 12 + 3600.00 x 12)"));
        assert!(report.contains("Total cash benefit: 387909.50 = 301509.50 + 86400.00"));
        assert!(report.contains("Annual employment cost: 447174.05 = 4764.50/month x 12 + 390000.00"));
        assert!(report.contains("Monthly employment cost: 37264.50 = 447174.05 / 12"));
    }
}
