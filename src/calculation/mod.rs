//! Calculation logic for the tax and employment cost engine.
//!
//! This module contains the employee and employer contribution calculations,
//! annual and taxable income, the progressive tax bracket lookup, after-tax
//! income, employer cost and the combined reporting figures, plus the
//! [`calculate_tax_and_cost`] entry point that runs them in order.

mod aggregates;
mod contributions;
mod engine;
mod tax_bracket;
mod taxable_income;

pub use aggregates::{
    AfterTaxIncomeResult, EmployerCostResult, calculate_after_tax_income, calculate_employer_cost,
    summarize,
};
pub use contributions::{
    EmployeeContributionResult, EmployerContributionResult, calculate_employee_contributions,
    calculate_employer_contributions,
};
pub use engine::{calculate_tax_and_cost, compute};
pub use tax_bracket::{TaxLookupResult, calculate_annual_tax, find_bracket, progressive_tax};
pub use taxable_income::{
    AnnualIncomeResult, TaxableIncomeResult, calculate_annual_income, calculate_taxable_income,
};
