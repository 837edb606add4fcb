//! Policy configuration types.
//!
//! This module contains the strongly-typed contribution and tax policy
//! structures. The built-in policy is expressed as constant data; alternative
//! policies are deserialized from YAML files by the loader.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::MAX_MONETARY_INPUT;

const fn dec(units: u32, scale: u32) -> Decimal {
    Decimal::from_parts(units, 0, 0, false, scale)
}

/// Contribution rates for one side of the employment relationship.
///
/// Each rate is a fraction of the relevant contribution base: the four
/// insurance rates apply to the social insurance base and the housing fund
/// rate applies to the housing fund base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ContributionRates {
    /// Pension insurance rate.
    pub pension: Decimal,
    /// Medical insurance rate (including maternity where it is merged).
    pub medical: Decimal,
    /// Unemployment insurance rate.
    pub unemployment: Decimal,
    /// Work injury insurance rate. Employees do not contribute in practice.
    #[serde(default)]
    pub work_injury: Decimal,
    /// Housing provident fund rate.
    pub housing_fund: Decimal,
}

impl ContributionRates {
    /// Sum of the rates applied to the social insurance base.
    pub fn social_insurance_total(&self) -> Decimal {
        self.pension + self.medical + self.unemployment + self.work_injury
    }

    fn named(&self) -> [(&'static str, Decimal); 5] {
        [
            ("pension", self.pension),
            ("medical", self.medical),
            ("unemployment", self.unemployment),
            ("work_injury", self.work_injury),
            ("housing_fund", self.housing_fund),
        ]
    }
}

/// Employee-side rates of the built-in Hangzhou policy.
pub const HANGZHOU_EMPLOYEE_RATES: ContributionRates = ContributionRates {
    pension: dec(8, 2),
    medical: dec(2, 2),
    unemployment: dec(5, 3),
    work_injury: Decimal::ZERO,
    housing_fund: dec(12, 2),
};

/// Employer-side rates of the built-in Hangzhou policy.
///
/// Medical includes the 0.6% maternity component. Work injury varies between
/// 0.2% and 1.5% by industry risk class; the lowest class is used.
pub const HANGZHOU_EMPLOYER_RATES: ContributionRates = ContributionRates {
    pension: dec(14, 2),
    medical: dec(95, 3),
    unemployment: dec(5, 3),
    work_injury: dec(2, 3),
    housing_fund: dec(12, 2),
};

/// Annual basic deduction (基本减除费用).
pub const BASIC_ANNUAL_DEDUCTION: Decimal = dec(60000, 0);

/// One tier of a progressive tax table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound of taxable income for this tier. `None` marks
    /// the unbounded top tier.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Marginal rate applied to income falling in this tier.
    pub rate: Decimal,
    /// Quick deduction (速算扣除数) subtracted from `income * rate`.
    pub quick_deduction: Decimal,
}

impl TaxBracket {
    /// Returns true if taxable income `income` falls at or below this tier's bound.
    pub fn covers(&self, income: Decimal) -> bool {
        self.upper_bound.is_none_or(|bound| income <= bound)
    }
}

/// Annual comprehensive income tax schedule for resident individuals.
pub const CHINA_ANNUAL_TAX_BRACKETS: [TaxBracket; 7] = [
    TaxBracket {
        upper_bound: Some(dec(36000, 0)),
        rate: dec(3, 2),
        quick_deduction: Decimal::ZERO,
    },
    TaxBracket {
        upper_bound: Some(dec(144000, 0)),
        rate: dec(10, 2),
        quick_deduction: dec(2520, 0),
    },
    TaxBracket {
        upper_bound: Some(dec(300000, 0)),
        rate: dec(20, 2),
        quick_deduction: dec(16920, 0),
    },
    TaxBracket {
        upper_bound: Some(dec(420000, 0)),
        rate: dec(25, 2),
        quick_deduction: dec(31920, 0),
    },
    TaxBracket {
        upper_bound: Some(dec(660000, 0)),
        rate: dec(30, 2),
        quick_deduction: dec(52920, 0),
    },
    TaxBracket {
        upper_bound: Some(dec(960000, 0)),
        rate: dec(35, 2),
        quick_deduction: dec(85920, 0),
    },
    TaxBracket {
        upper_bound: None,
        rate: dec(45, 2),
        quick_deduction: dec(181920, 0),
    },
];

/// A complete contribution and income tax policy.
///
/// The policy is immutable once built; calculations borrow it.
///
/// # Example
///
/// ```
/// use tax_cost_engine::config::PolicyConfig;
///
/// let policy = PolicyConfig::default();
/// assert_eq!(policy.tax_brackets.len(), 7);
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolicyConfig {
    /// Human-readable policy name.
    pub name: String,
    /// Annual basic deduction subtracted before tax.
    pub basic_deduction: Decimal,
    /// Rates paid by the employee, withheld from salary.
    pub employee: ContributionRates,
    /// Rates paid by the employer on top of salary.
    pub employer: ContributionRates,
    /// Progressive tax table, ordered by increasing upper bound.
    pub tax_brackets: Vec<TaxBracket>,
}

impl PolicyConfig {
    /// The built-in Hangzhou example policy.
    pub fn hangzhou() -> Self {
        Self {
            name: "Hangzhou".to_string(),
            basic_deduction: BASIC_ANNUAL_DEDUCTION,
            employee: HANGZHOU_EMPLOYEE_RATES,
            employer: HANGZHOU_EMPLOYER_RATES,
            tax_brackets: CHINA_ANNUAL_TAX_BRACKETS.to_vec(),
        }
    }

    /// Checks rates and the tax table for internal consistency.
    ///
    /// Every rate must lie in `[0, 1]`; the basic deduction, bounds and quick
    /// deductions must lie in `[0, MAX_MONETARY_INPUT]`. The tax table must be non-empty with strictly increasing
    /// bounds, end in a single unbounded tier, start with a zero quick
    /// deduction, and each quick deduction must make the tier's formula agree
    /// with the tier below at their shared boundary.
    pub fn validate(&self) -> EngineResult<()> {
        if self.basic_deduction < Decimal::ZERO {
            return Err(invalid_policy(format!(
                "basic deduction must not be negative (got {})",
                self.basic_deduction
            )));
        }
        if self.basic_deduction > MAX_MONETARY_INPUT {
            return Err(invalid_policy(format!(
                "basic deduction must not exceed {} (got {})",
                MAX_MONETARY_INPUT, self.basic_deduction
            )));
        }

        for (side, rates) in [("employee", &self.employee), ("employer", &self.employer)] {
            for (category, rate) in rates.named() {
                if rate < Decimal::ZERO || rate > Decimal::ONE {
                    return Err(invalid_policy(format!(
                        "{} {} rate must be between 0 and 1 (got {})",
                        side, category, rate
                    )));
                }
            }
        }

        let Some(first) = self.tax_brackets.first() else {
            return Err(invalid_policy("tax table is empty"));
        };
        if !first.quick_deduction.is_zero() {
            return Err(invalid_policy(format!(
                "first tax bracket must have a zero quick deduction (got {})",
                first.quick_deduction
            )));
        }

        let last_index = self.tax_brackets.len() - 1;
        for (index, bracket) in self.tax_brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid_policy(format!(
                    "tax bracket {} rate must be between 0 and 1 (got {})",
                    index + 1,
                    bracket.rate
                )));
            }
            if bracket.quick_deduction < Decimal::ZERO {
                return Err(invalid_policy(format!(
                    "tax bracket {} quick deduction must not be negative",
                    index + 1
                )));
            }
            let amounts = [Some(bracket.quick_deduction), bracket.upper_bound];
            if amounts.into_iter().flatten().any(|amount| amount > MAX_MONETARY_INPUT) {
                return Err(invalid_policy(format!(
                    "tax bracket {} amounts must not exceed {}",
                    index + 1,
                    MAX_MONETARY_INPUT
                )));
            }
            match (bracket.upper_bound, index == last_index) {
                (None, false) => {
                    return Err(invalid_policy(format!(
                        "only the last tax bracket may be unbounded (bracket {} is)",
                        index + 1
                    )));
                }
                (Some(bound), true) => {
                    return Err(invalid_policy(format!(
                        "last tax bracket must be unbounded (found upper bound {})",
                        bound
                    )));
                }
                _ => {}
            }
        }

        for (index, pair) in self.tax_brackets.windows(2).enumerate() {
            let (lower, upper) = (&pair[0], &pair[1]);
            // windows are ordered and only the last tier is unbounded
            let Some(boundary) = lower.upper_bound else {
                continue;
            };
            if boundary < Decimal::ZERO {
                return Err(invalid_policy(format!(
                    "tax bracket {} upper bound must not be negative",
                    index + 1
                )));
            }
            if let Some(next) = upper.upper_bound {
                if next <= boundary {
                    return Err(invalid_policy(format!(
                        "tax bracket bounds must be strictly increasing ({} then {})",
                        boundary, next
                    )));
                }
            }
            let below = boundary * lower.rate - lower.quick_deduction;
            let above = boundary * upper.rate - upper.quick_deduction;
            if below != above {
                return Err(invalid_policy(format!(
                    "quick deduction of bracket {} is inconsistent: tax at {} is {} below the boundary but {} above it",
                    index + 2,
                    boundary,
                    below,
                    above
                )));
            }
        }

        Ok(())
    }
}

fn invalid_policy(message: impl Into<String>) -> EngineError {
    EngineError::InvalidPolicy {
        message: message.into(),
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::hangzhou()
    }
}
