//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{InMemoryDirectory, calculate_payroll, process_period, solve_gross_for_net};
use crate::error::EngineError;
use crate::models::{CalculationInput, Jurisdiction};

use super::request::{CalculationRequest, NetToGrossRequest, ProcessRunRequest};
use super::response::{ApiError, ApiErrorResponse, RuleListResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/net-to-gross", post(net_to_gross_handler))
        .route("/payroll-runs/process", post(process_run_handler))
        .route("/rules/:jurisdiction", get(rules_handler))
        .with_state(state)
}

/// Handler for POST /calculate.
///
/// Runs one forward calculation and returns the full result.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let outcome = CalculationInput::try_from(request)
        .and_then(|input| calculate_payroll(&input, state.config()).map(|result| (input, result)));

    match outcome {
        Ok((input, result)) => {
            info!(
                correlation_id = %correlation_id,
                jurisdiction = %input.jurisdiction,
                gross = input.gross_amount,
                net = result.net_amount,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_ok(result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /net-to-gross.
async fn net_to_gross_handler(
    State(state): State<AppState>,
    payload: Result<Json<NetToGrossRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing net-to-gross request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let jurisdiction: Jurisdiction = match request.jurisdiction.parse() {
        Ok(j) => j,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let config = state.config();
    match solve_gross_for_net(
        request.target_net,
        jurisdiction,
        request.tax_factor,
        request.effective_date,
        request.pension_fund_choice,
        config,
        &config.settings().solver,
    ) {
        Ok(solution) => {
            info!(
                correlation_id = %correlation_id,
                %jurisdiction,
                target_net = request.target_net,
                gross = solution.gross_amount,
                iterations = solution.iterations,
                converged = solution.converged,
                duration_us = start_time.elapsed().as_micros(),
                "Net-to-gross completed"
            );
            json_ok(solution)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payroll-runs/process.
///
/// Processes a snapshot of one run's records and returns the payroll items.
async fn process_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll run request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let run_id = request.payroll_run.id.clone();
    let tenant_id = request.tenant.id.clone();
    let directory = InMemoryDirectory::from(request);

    let start_time = Instant::now();
    let config = state.config();
    match process_period(
        &run_id,
        &tenant_id,
        &directory,
        config,
        &config.settings().batch,
    ) {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %run_id,
                processed_count = outcome.processed_count,
                skipped_count = outcome.skipped.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Payroll run completed"
            );
            json_ok(outcome)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /rules/:jurisdiction.
async fn rules_handler(
    State(state): State<AppState>,
    Path(jurisdiction): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let jurisdiction: Jurisdiction = match jurisdiction.parse() {
        Ok(j) => j,
        Err(err) => return error_response(correlation_id, err),
    };

    let rules: Vec<_> = state
        .config()
        .rules_for(jurisdiction)
        .into_iter()
        .cloned()
        .collect();

    info!(
        correlation_id = %correlation_id,
        %jurisdiction,
        rule_count = rules.len(),
        "Listed rules"
    );

    json_ok(RuleListResponse {
        jurisdiction,
        rules,
    })
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
