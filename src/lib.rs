//! Tax and Employment Cost Engine
//!
//! This crate computes an employee's annual after-tax income and the
//! employer's fully loaded cost of employment from a monthly salary, the
//! number of salary payments, the social insurance and housing fund bases and
//! an annual special deduction, under a progressive income tax schedule with
//! split employee/employer contribution rates.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
