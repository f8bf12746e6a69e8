//! HTTP request handlers for the salary normalizer API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{year_over_year, yearly_stats};
use crate::error::EngineResult;
use crate::models::{ConvertedSalary, Currency};

use super::request::{parse_currencies, parse_periods, ConversionRequest, YearlyStatsRequest};
use super::response::{ApiError, ApiErrorResponse, YearlyStatsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/convert", post(convert_handler))
        .route("/yearly-stats", post(yearly_stats_handler))
        .with_state(state)
}

/// Handler for POST /convert endpoint.
///
/// Normalizes the submitted employment history into nominal and
/// purchasing-power-adjusted monthly tables.
async fn convert_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConversionRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing conversion request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_conversion(&state, request) {
        Ok(converted) => {
            info!(
                correlation_id = %correlation_id,
                months = converted.salaries.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Conversion completed successfully"
            );
            json_response(StatusCode::OK, converted)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Conversion failed");
            error_response(err.into())
        }
    }
}

/// Handler for POST /yearly-stats endpoint.
///
/// Summarizes the nominal series of the submitted history per calendar year.
async fn yearly_stats_handler(
    State(state): State<AppState>,
    payload: Result<Json<YearlyStatsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing yearly statistics request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match perform_yearly_stats(&state, request) {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                years = body.stats.len(),
                "Yearly statistics completed successfully"
            );
            json_response(StatusCode::OK, body)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Yearly statistics failed");
            error_response(err.into())
        }
    }
}

fn perform_conversion(
    state: &AppState,
    request: ConversionRequest,
) -> EngineResult<ConvertedSalary> {
    let reporting = state.reporting();
    let periods = parse_periods(request.periods)?;
    let currencies = parse_currencies(request.currencies, &reporting.nominal_currencies)?;
    let purchasing_power_currencies = parse_currencies(
        request.purchasing_power_currencies,
        &reporting.purchasing_power_currencies,
    )?;

    Ok(state
        .calculator()
        .convert(&periods, &currencies, &purchasing_power_currencies))
}

fn perform_yearly_stats(
    state: &AppState,
    request: YearlyStatsRequest,
) -> EngineResult<YearlyStatsResponse> {
    let periods = parse_periods(request.periods)?;
    let currencies =
        parse_currencies(request.currencies, &state.reporting().nominal_currencies)?;

    let converted = state.calculator().convert(&periods, &currencies, &[]);
    let stats = yearly_stats(&converted);
    let year_over_year: BTreeMap<Currency, _> = currencies
        .iter()
        .map(|currency| (*currency, year_over_year(&stats, *currency)))
        .collect();

    Ok(YearlyStatsResponse {
        stats,
        year_over_year,
    })
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
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

    json_response(StatusCode::BAD_REQUEST, error)
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
