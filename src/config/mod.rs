//! Contribution and tax policy configuration.
//!
//! The built-in policy (Hangzhou contribution rates with the annual
//! comprehensive income tax schedule) is constant data. Alternative policies
//! can be loaded from YAML files and are validated before use.
//!
//! # Example
//!
//! ```no_run
//! use tax_cost_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/hangzhou.yaml").unwrap();
//! println!("Loaded policy: {}", loader.policy().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BASIC_ANNUAL_DEDUCTION, CHINA_ANNUAL_TAX_BRACKETS, ContributionRates, HANGZHOU_EMPLOYEE_RATES,
    HANGZHOU_EMPLOYER_RATES, PolicyConfig, TaxBracket,
};
