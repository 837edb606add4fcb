//! Integration tests for the calculation API.
//!
//! This test suite drives the router end to end:
//! - The reference 13-month scenario
//! - Default substitution for missing fields
//! - Zero taxable income
//! - Validation failures (negative amounts, zero or negative months, bad JSON)
//! - Reconciliation of the aggregate figures
//! - Loading an alternative policy file

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use tax_cost_engine::api::{AppState, create_router};
use tax_cost_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    create_router(AppState::default())
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal serialized as string")).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri("/api/calculate")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn scenario_body() -> Value {
    json!({
        "monthly_salary": 30000,
        "annual_months": 13,
        "social_insurance_base": 4812,
        "housing_fund_base": 30000,
        "special_deduction": 0
    })
}

fn assert_validation_error(status: StatusCode, body: &Value, field: &str) {
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body.get("data").is_none());
    let message = body["error"].as_str().unwrap();
    assert!(message.contains(field), "error '{}' should name {}", message, field);
}

// =============================================================================
// Successful calculations
// =============================================================================

#[tokio::test]
async fn test_reference_scenario() {
    let (status, body) = post_calculate(create_router_for_test(), scenario_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(decimal(&data["annual_income"]), dec("390000"));
    assert_eq!(decimal(&data["personal_insurance"]["annual_total"]), dec("49263.12"));
    assert_eq!(
        decimal(&data["tax_calculation"]["taxable_income"]),
        dec("280736.88")
    );
    assert_eq!(decimal(&data["tax_calculation"]["applied_rate"]), dec("0.2"));
    assert_eq!(
        decimal(&data["tax_calculation"]["deduction_amount"]),
        dec("16920")
    );
    assert_eq!(decimal(&data["tax_calculation"]["annual_tax"]), dec("39227.376"));
    assert_eq!(
        decimal(&data["final_results"]["after_tax_income"]),
        dec("301509.504")
    );
}

#[tokio::test]
async fn test_employer_side_figures() {
    let (_, body) = post_calculate(create_router_for_test(), scenario_body()).await;
    let data = &body["data"];

    assert_eq!(
        decimal(&data["company_insurance"]["injury"]["monthly"]),
        dec("9.624")
    );
    assert_eq!(
        decimal(&data["company_insurance"]["monthly_total"]),
        dec("4764.504")
    );
    assert_eq!(
        decimal(&data["final_results"]["annual_company_cost"]),
        dec("447174.048")
    );
    assert_eq!(
        decimal(&data["final_results"]["monthly_company_cost"]),
        dec("37264.504")
    );
}

#[tokio::test]
async fn test_aggregates_reconcile() {
    let (_, body) = post_calculate(
        create_router_for_test(),
        json!({
            "monthly_salary": 50000,
            "annual_months": 15,
            "social_insurance_base": 24930,
            "housing_fund_base": 39530,
            "special_deduction": 36000
        }),
    )
    .await;
    let data = &body["data"];
    let totals = &data["final_results"];

    let annual_income = decimal(&data["annual_income"]);
    let employer_monthly = decimal(&data["company_insurance"]["monthly_total"]);
    assert_eq!(
        decimal(&totals["annual_company_cost"]),
        employer_monthly * Decimal::from(12) + annual_income
    );
    assert_eq!(
        decimal(&totals["total_cash_benefit"]),
        decimal(&totals["after_tax_income"]) + decimal(&totals["total_housing_fund"])
    );
}

#[tokio::test]
async fn test_missing_fields_take_defaults() {
    let (status, defaulted) = post_calculate(create_router_for_test(), json!({})).await;
    let (_, explicit) = post_calculate(create_router_for_test(), scenario_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(defaulted["data"], explicit["data"]);
}

#[tokio::test]
async fn test_numeric_strings_are_accepted() {
    let (status, body) = post_calculate(
        create_router_for_test(),
        json!({ "monthly_salary": "30000.00", "annual_months": "13" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["data"]["annual_income"]), dec("390000"));
}

#[tokio::test]
async fn test_zero_taxable_income() {
    let (status, body) = post_calculate(
        create_router_for_test(),
        json!({
            "monthly_salary": 5420,
            "annual_months": 12,
            "social_insurance_base": 4000,
            "housing_fund_base": 0,
            "special_deduction": 0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let tax = &body["data"]["tax_calculation"];
    assert_eq!(decimal(&tax["taxable_income"]), Decimal::ZERO);
    assert_eq!(decimal(&tax["annual_tax"]), Decimal::ZERO);
    assert_eq!(decimal(&tax["applied_rate"]), dec("0.03"));
    assert_eq!(decimal(&tax["deduction_amount"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_special_deduction_above_income_is_not_an_error() {
    let (status, body) = post_calculate(
        create_router_for_test(),
        json!({ "monthly_salary": 3000, "annual_months": 12, "special_deduction": 1000000 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        decimal(&body["data"]["tax_calculation"]["annual_tax"]),
        Decimal::ZERO
    );
}

#[tokio::test]
async fn test_response_includes_audit_trace() {
    let (_, body) = post_calculate(create_router_for_test(), scenario_body()).await;
    let steps = body["data"]["audit"]["steps"].as_array().unwrap();

    assert_eq!(steps.len(), 7);
    assert_eq!(steps[3]["rule_id"], "tax_bracket_lookup");
}

#[tokio::test]
async fn test_identical_requests_yield_identical_responses() {
    let (_, first) = post_calculate(create_router_for_test(), scenario_body()).await;
    let (_, second) = post_calculate(create_router_for_test(), scenario_body()).await;
    assert_eq!(first.to_string(), second.to_string());
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_zero_annual_months_rejected() {
    let mut body = scenario_body();
    body["annual_months"] = json!(0);
    let (status, response) = post_calculate(create_router_for_test(), body).await;
    assert_validation_error(status, &response, "annual_months");
}

#[tokio::test]
async fn test_negative_annual_months_rejected() {
    let mut body = scenario_body();
    body["annual_months"] = json!(-1);
    let (status, response) = post_calculate(create_router_for_test(), body).await;
    assert_validation_error(status, &response, "annual_months");
}

#[tokio::test]
async fn test_negative_salary_rejected() {
    let mut body = scenario_body();
    body["monthly_salary"] = json!(-100);
    let (status, response) = post_calculate(create_router_for_test(), body).await;
    assert_validation_error(status, &response, "monthly_salary");
}

#[tokio::test]
async fn test_negative_housing_fund_base_rejected() {
    let mut body = scenario_body();
    body["housing_fund_base"] = json!(-1);
    let (status, response) = post_calculate(create_router_for_test(), body).await;
    assert_validation_error(status, &response, "housing_fund_base");
}

#[tokio::test]
async fn test_non_numeric_salary_rejected() {
    let mut body = scenario_body();
    body["monthly_salary"] = json!("thirty thousand");
    let (status, response) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
    assert_eq!(response["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_fractional_months_rejected() {
    let mut body = scenario_body();
    body["annual_months"] = json!(12.5);
    let (status, response) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (status, response) = send(
        create_router_for_test(),
        Request::builder()
            .method("POST")
            .uri("/api/calculate")
            .header("Content-Type", "application/json")
            .body(Body::from("{\"monthly_salary\": "))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
    assert_eq!(response["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_content_type_rejected() {
    let (status, response) = send(
        create_router_for_test(),
        Request::builder()
            .method("POST")
            .uri("/api/calculate")
            .body(Body::from(scenario_body().to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "MISSING_CONTENT_TYPE");
}

// =============================================================================
// Policy and health
// =============================================================================

#[tokio::test]
async fn test_health_reports_policy() {
    let (status, body) = send(
        create_router_for_test(),
        Request::builder()
            .method("GET")
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["policy"], "Hangzhou");
}

#[tokio::test]
async fn test_policy_file_matches_builtin_results() {
    let loader = ConfigLoader::load("./config/hangzhou.yaml").expect("Failed to load policy");
    let router = create_router(AppState::new(loader));

    let (_, from_file) = post_calculate(router, scenario_body()).await;
    let (_, builtin) = post_calculate(create_router_for_test(), scenario_body()).await;

    assert_eq!(
        decimal(&from_file["data"]["final_results"]["after_tax_income"]),
        decimal(&builtin["data"]["final_results"]["after_tax_income"])
    );
}
