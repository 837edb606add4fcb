//! Core data models for the tax and employment cost engine.
//!
//! This module contains the input parameters and the itemized result of a
//! calculation.

mod calculation_result;
mod input;

pub use calculation_result::{
    AuditStep, AuditTrace, CombinedInsurance, ContributionAmount, EmployeeContributions,
    EmployerContributions, FinalResults, TaxCalculation, TaxCostBreakdown,
};
pub use input::{CompensationInput, MAX_MONETARY_INPUT};
