//! HTTP request handlers for the calculation API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::calculate_tax_and_cost;
use crate::error::EngineError;
use crate::models::CompensationInput;

use super::request::CalculationRequest;
use super::response::{ApiEnvelope, ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/calculate", post(calculate_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "policy": state.policy().name,
    }))
}

/// Translates a body extraction failure into an API error.
///
/// Type mismatches (a string salary, fractional months) are validation
/// errors; unparseable bodies are malformed JSON.
fn rejection_error(rejection: &JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => ApiError::validation_error(err.body_text()),
        JsonRejection::JsonSyntaxError(err) => {
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to read request body"),
    }
}

fn log_failure(correlation_id: Uuid, err: &EngineError) {
    if err.is_input_error() {
        warn!(correlation_id = %correlation_id, error = %err, "Rejected calculation input");
    } else {
        error!(correlation_id = %correlation_id, error = %err, "Calculation failed");
    }
}

/// Handler for POST /api/calculate.
///
/// Accepts the five compensation parameters, applies defaults for missing
/// ones and returns the breakdown in a `success`/`data` envelope.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = rejection_error(&rejection);
            warn!(
                correlation_id = %correlation_id,
                code = %error.code,
                error = %error.message,
                "Unreadable request body"
            );
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let started = Instant::now();
    let outcome = CompensationInput::try_from(request)
        .and_then(|input| calculate_tax_and_cost(&input, state.policy()).map(|b| (input, b)));

    match outcome {
        Ok((input, breakdown)) => {
            info!(
                correlation_id = %correlation_id,
                monthly_salary = %input.monthly_salary,
                annual_months = input.annual_months,
                annual_tax = %breakdown.tax_calculation.annual_tax,
                after_tax_income = %breakdown.final_results.after_tax_income,
                duration_us = started.elapsed().as_micros(),
                "Calculation completed"
            );
            (StatusCode::OK, Json(ApiEnvelope::success(breakdown))).into_response()
        }
        Err(err) => {
            log_failure(correlation_id, &err);
            ApiErrorResponse::from(err).into_response()
        }
    }
}
