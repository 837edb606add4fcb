//! Progressive income tax lookup.
//!
//! This module selects the tax bracket for an annual taxable income and
//! applies the quick deduction method: `tax = income * rate - quick_deduction`
//! with the matched bracket's rate. [`progressive_tax`] computes the same
//! figure slice by slice and is used to check that a table's quick deductions
//! are calibrated.

use rust_decimal::Decimal;

use crate::config::TaxBracket;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, TaxCalculation};

/// The result of the tax lookup, including the computation and audit step.
#[derive(Debug, Clone)]
pub struct TaxLookupResult {
    /// Taxable income, the applied bracket and the tax owed.
    pub calculation: TaxCalculation,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Returns the first bracket whose upper bound is at or above `taxable_income`.
///
/// # Errors
///
/// Returns `CalculationError` if no bracket covers the income, which can only
/// happen for a table without an unbounded top tier.
pub fn find_bracket(brackets: &[TaxBracket], taxable_income: Decimal) -> EngineResult<&TaxBracket> {
    brackets
        .iter()
        .find(|bracket| bracket.covers(taxable_income))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("no tax bracket covers taxable income {}", taxable_income),
        })
}

/// Calculates annual income tax with the quick deduction method.
///
/// The tax is clamped at zero so a miscalibrated table can never produce a
/// negative liability.
///
/// # Examples
///
/// ```
/// use tax_cost_engine::calculation::calculate_annual_tax;
/// use tax_cost_engine::config::CHINA_ANNUAL_TAX_BRACKETS;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let taxable = Decimal::from_str("280736.88").unwrap();
/// let result = calculate_annual_tax(taxable, &CHINA_ANNUAL_TAX_BRACKETS, 1).unwrap();
/// assert_eq!(result.calculation.annual_tax, Decimal::from_str("39227.376").unwrap());
/// assert_eq!(result.calculation.applied_rate, Decimal::from_str("0.20").unwrap());
/// ```
pub fn calculate_annual_tax(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
    step_number: u32,
) -> EngineResult<TaxLookupResult> {
    let bracket = find_bracket(brackets, taxable_income)?;
    let annual_tax = (taxable_income * bracket.rate - bracket.quick_deduction).max(Decimal::ZERO);

    let bound = bracket
        .upper_bound
        .map_or_else(|| "unbounded".to_string(), |b| b.normalize().to_string());

    let audit_step = AuditStep {
        step_number,
        rule_id: "tax_bracket_lookup".to_string(),
        rule_name: "Tax Bracket Lookup".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string()
        }),
        output: serde_json::json!({
            "upper_bound": bound,
            "rate": bracket.rate.normalize().to_string(),
            "quick_deduction": bracket.quick_deduction.normalize().to_string(),
            "annual_tax": annual_tax.normalize().to_string()
        }),
        reasoning: format!(
            "{} falls in the bracket up to {}: {} x {} - {} = {}",
            taxable_income.normalize(),
            bound,
            taxable_income.normalize(),
            bracket.rate.normalize(),
            bracket.quick_deduction.normalize(),
            annual_tax.normalize()
        ),
    };

    Ok(TaxLookupResult {
        calculation: TaxCalculation {
            taxable_income,
            applied_rate: bracket.rate,
            deduction_amount: bracket.quick_deduction,
            annual_tax,
        },
        audit_step,
    })
}

/// Calculates tax by taxing each slice of income at its own bracket's rate.
///
/// For a table whose quick deductions are calibrated this equals the quick
/// deduction result for every income.
pub fn progressive_tax(taxable_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for bracket in brackets {
        if taxable_income <= lower {
            break;
        }
        let upper = match bracket.upper_bound {
            Some(bound) => bound.min(taxable_income),
            None => taxable_income,
        };
        tax += (upper - lower) * bracket.rate;
        lower = upper;
    }

    tax
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CHINA_ANNUAL_TAX_BRACKETS;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tax_for(income: &str) -> TaxCalculation {
        calculate_annual_tax(dec(income), &CHINA_ANNUAL_TAX_BRACKETS, 1)
            .unwrap()
            .calculation
    }

    #[test]
    fn test_zero_income_uses_first_bracket() {
        let tax = tax_for("0");
        assert_eq!(tax.annual_tax, Decimal::ZERO);
        assert_eq!(tax.applied_rate, dec("0.03"));
        assert_eq!(tax.deduction_amount, Decimal::ZERO);
    }

    #[test]
    fn test_upper_bound_is_inclusive() {
        let tax = tax_for("36000");
        assert_eq!(tax.applied_rate, dec("0.03"));
        assert_eq!(tax.annual_tax, dec("1080"));

        let tax = tax_for("36000.01");
        assert_eq!(tax.applied_rate, dec("0.10"));
    }

    #[test]
    fn test_each_bracket_is_selected() {
        let cases = [
            ("20000", "0.03", "0"),
            ("100000", "0.10", "2520"),
            ("280736.88", "0.20", "16920"),
            ("400000", "0.25", "31920"),
            ("500000", "0.30", "52920"),
            ("800000", "0.35", "85920"),
            ("2000000", "0.45", "181920"),
        ];
        for (income, rate, qd) in cases {
            let tax = tax_for(income);
            assert_eq!(tax.applied_rate, dec(rate), "rate for {}", income);
            assert_eq!(tax.deduction_amount, dec(qd), "quick deduction for {}", income);
        }
    }

    #[test]
    fn test_scenario_tax_amount() {
        assert_eq!(tax_for("280736.88").annual_tax, dec("39227.376"));
    }

    #[test]
    fn test_quick_deduction_matches_progressive_sum() {
        let incomes = [
            "0", "1", "35999.99", "36000", "36000.01", "100000", "144000", "200000", "300000",
            "350000", "420000", "500000", "660000", "700000", "960000", "960000.01", "5000000",
        ];
        for income in incomes {
            let quick = tax_for(income).annual_tax;
            let summed = progressive_tax(dec(income), &CHINA_ANNUAL_TAX_BRACKETS);
            assert_eq!(quick, summed, "tax mismatch at {}", income);
        }
    }

    #[test]
    fn test_tax_is_continuous_across_boundaries() {
        let step = dec("0.01");
        for pair in CHINA_ANNUAL_TAX_BRACKETS.windows(2) {
            let boundary = pair[0].upper_bound.unwrap();
            let at = tax_for(&boundary.to_string()).annual_tax;
            let above = tax_for(&(boundary + step).to_string()).annual_tax;
            assert!(above >= at);
            assert!(
                above - at <= pair[1].rate * step,
                "jump of {} at boundary {}",
                above - at,
                boundary
            );
        }
    }

    #[test]
    fn test_negative_result_is_clamped() {
        let brackets = [TaxBracket {
            upper_bound: None,
            rate: dec("0.10"),
            quick_deduction: dec("1000"),
        }];
        let result = calculate_annual_tax(dec("500"), &brackets, 1).unwrap();
        assert_eq!(result.calculation.annual_tax, Decimal::ZERO);
    }

    #[test]
    fn test_table_without_top_tier_fails_above_last_bound() {
        let brackets = [TaxBracket {
            upper_bound: Some(dec("1000")),
            rate: dec("0.10"),
            quick_deduction: Decimal::ZERO,
        }];
        let result = calculate_annual_tax(dec("1000.5"), &brackets, 1);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_find_bracket_returns_top_tier_for_large_income() {
        let bracket = find_bracket(&CHINA_ANNUAL_TAX_BRACKETS, dec("100000000")).unwrap();
        assert_eq!(bracket.upper_bound, None);
    }

    #[test]
    fn test_audit_step() {
        let result = calculate_annual_tax(dec("280736.88"), &CHINA_ANNUAL_TAX_BRACKETS, 4).unwrap();
        let step = result.audit_step;
        assert_eq!(step.step_number, 4);
        assert_eq!(step.rule_id, "tax_bracket_lookup");
        assert_eq!(step.output["upper_bound"].as_str().unwrap(), "300000");
        assert_eq!(step.output["rate"].as_str().unwrap(), "0.2");
        assert_eq!(step.output["annual_tax"].as_str().unwrap(), "39227.376");
    }

    #[test]
    fn test_audit_step_for_top_tier() {
        let result = calculate_annual_tax(dec("1000000"), &CHINA_ANNUAL_TAX_BRACKETS, 1).unwrap();
        assert_eq!(
            result.audit_step.output["upper_bound"].as_str().unwrap(),
            "unbounded"
        );
    }
}
