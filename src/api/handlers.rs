//! HTTP request handlers for the guideline engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_batch, calculate_guideline};
use crate::models::GuidelineInput;

use super::request::{BatchCalculationRequest, CalculationRequest};
use super::response::{
    ApiError, ApiErrorResponse, BatchCalculationResponse, CalculationResponse, WorksheetLines,
};
use super::state::AppState;

/// Largest number of calculations accepted in one batch request.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/calculate/batch", post(batch_handler))
        .with_state(state)
}

fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps a body that failed to deserialize to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
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
    error_response(ApiErrorResponse::bad_request(error))
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the guideline result together
/// with its printed worksheet lines.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let schedule = match state.config().resolve_schedule(request.effective_date) {
        Ok(schedule) => schedule,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Schedule lookup failed"
            );
            return error_response(err.into());
        }
    };

    let input: GuidelineInput = request.into();
    let start_time = Instant::now();
    let result = calculate_guideline(&input, schedule);
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        payer = ?result.payer,
        monthly_transfer = %result.total_monthly_transfer,
        warnings = result.audit_trace.warnings.len(),
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );

    let lines = WorksheetLines::from(&result);
    json_response(
        StatusCode::OK,
        CalculationResponse {
            calculation_id: correlation_id,
            engine_version: engine_version(),
            schedule_effective_date: schedule.effective_date,
            result,
            lines,
        },
    )
}

/// Handler for POST /calculate/batch endpoint.
///
/// Runs every calculation against one schedule and returns the results in
/// request order.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let size = request.calculations.len();
    if size > MAX_BATCH_SIZE {
        warn!(correlation_id = %correlation_id, size, "Batch too large");
        return error_response(ApiErrorResponse::bad_request(ApiError::batch_too_large(
            size,
            MAX_BATCH_SIZE,
        )));
    }

    if let Some(mismatch) = request.calculations.iter().position(|calc| {
        calc.effective_date
            .is_some_and(|date| Some(date) != request.effective_date)
    }) {
        return error_response(ApiErrorResponse::bad_request(ApiError::with_details(
            "VALIDATION_ERROR",
            format!(
                "Calculation {} has an effective_date that differs from the batch",
                mismatch
            ),
            "Set effective_date once on the batch; every calculation uses the same schedule",
        )));
    }

    let schedule = match state.config().resolve_schedule(request.effective_date) {
        Ok(schedule) => schedule,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Schedule lookup failed"
            );
            return error_response(err.into());
        }
    };

    let inputs: Vec<GuidelineInput> = request.calculations.into_iter().map(Into::into).collect();
    let start_time = Instant::now();
    let results = calculate_batch(&inputs, schedule);
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        calculations = results.len(),
        duration_us = duration.as_micros(),
        "Batch completed successfully"
    );

    json_response(
        StatusCode::OK,
        BatchCalculationResponse {
            batch_id: correlation_id,
            engine_version: engine_version(),
            schedule_effective_date: schedule.effective_date,
            results,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::Payer;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::statutory())
    }

    async fn post_json(uri: &str, body: String) -> Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    fn valid_body() -> String {
        r#"{
            "mother_gross_annual": 60000,
            "mother_deductions_annual": 8000,
            "father_gross_annual": 40000,
            "father_deductions_annual": 5000,
            "number_of_children": 1,
            "parenting_schedule": [{"mother_overnights": 365, "father_overnights": 0}]
        }"#
        .to_string()
    }

    #[tokio::test]
    async fn test_api_001_valid_request_returns_200() {
        let response = post_json("/calculate", valid_body()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = body_bytes(response).await;
        let parsed: CalculationResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(parsed.result.payer, Payer::Father);
        assert_eq!(parsed.result.total_monthly_transfer, dec("377.33"));
        assert_eq!(parsed.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(parsed.lines.worksheet_a.len(), 24);
        assert_eq!(parsed.lines.worksheet_b.len(), 7);
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let response = post_json("/calculate", "{invalid json".to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_bytes(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_garbage_numbers_still_calculate() {
        let body = r#"{"mother_gross_annual": "lots", "father_gross_annual": null}"#;
        let response = post_json("/calculate", body.to_string()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let parsed: CalculationResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(parsed.result.worksheets.combined.shares_defaulted);
    }

    #[tokio::test]
    async fn test_api_004_invalid_effective_date_returns_400() {
        let body = r#"{"effective_date": "not-a-date"}"#;
        let response = post_json("/calculate", body.to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_api_005_date_before_schedules_returns_400() {
        let body = r#"{"effective_date": "1990-01-01"}"#;
        let response = post_json("/calculate", body.to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "SCHEDULE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_api_006_batch_returns_results_in_order() {
        let body = format!(
            r#"{{"calculations": [{}, {{"number_of_children": 1}}]}}"#,
            valid_body()
        );
        let response = post_json("/calculate/batch", body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let parsed: BatchCalculationResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].payer, Payer::Father);
        assert_eq!(parsed.results[1].payer, Payer::Neither);
    }

    #[tokio::test]
    async fn test_api_007_batch_with_mixed_dates_returns_400() {
        let body = r#"{"calculations": [{"effective_date": "2024-06-01"}]}"#;
        let response = post_json("/calculate/batch", body.to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_api_008_batch_too_large_returns_400() {
        let calculations = vec!["{}"; MAX_BATCH_SIZE + 1].join(",");
        let body = format!(r#"{{"calculations": [{}]}}"#, calculations);
        let response = post_json("/calculate/batch", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "BATCH_TOO_LARGE");
    }
}
