//! HTTP API module for the tax and employment cost engine.
//!
//! This module provides the JSON endpoint wrapping the calculation in a
//! `success`/`data` envelope.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculationRequest, DEFAULT_ANNUAL_MONTHS, DEFAULT_HOUSING_FUND_BASE, DEFAULT_MONTHLY_SALARY,
    DEFAULT_SOCIAL_INSURANCE_BASE,
};
pub use response::{ApiEnvelope, ApiError, ApiErrorResponse};
pub use state::AppState;
