//! Response types for the guideline engine API.
//!
//! This module defines the success envelopes and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{FinalResult, WorksheetLine};

/// Printed worksheet lines for one calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetLines {
    /// Worksheet A, lines 1-24.
    pub worksheet_a: Vec<WorksheetLine>,
    /// Worksheet B lines for every child.
    pub worksheet_b: Vec<WorksheetLine>,
    /// Worksheet C lines, blank for a parent who did not need it.
    pub worksheet_c: Vec<WorksheetLine>,
}

impl From<&FinalResult> for WorksheetLines {
    fn from(result: &FinalResult) -> Self {
        Self {
            worksheet_a: result.worksheet_a_lines(),
            worksheet_b: result.worksheet_b_lines(),
            worksheet_c: result.worksheet_c_lines(),
        }
    }
}

/// Response body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique id for this calculation, also logged as the correlation id.
    pub calculation_id: Uuid,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Effective date of the schedule used.
    pub schedule_effective_date: NaiveDate,
    /// The calculation result.
    pub result: FinalResult,
    /// The result laid out as printed worksheet lines.
    pub lines: WorksheetLines,
}

/// Response body for the `/calculate/batch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCalculationResponse {
    /// Unique id for this batch, also logged as the correlation id.
    pub batch_id: Uuid,
    /// Version of the engine that produced the results.
    pub engine_version: String,
    /// Effective date of the schedule used.
    pub schedule_effective_date: NaiveDate,
    /// Results in request order.
    pub results: Vec<FinalResult>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a batch-too-large error response.
    pub fn batch_too_large(size: usize, limit: usize) -> Self {
        Self::with_details(
            "BATCH_TOO_LARGE",
            format!("Batch of {} calculations exceeds the limit of {}", size, limit),
            "Split the batch into smaller requests",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::ScheduleNotFound { date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "SCHEDULE_NOT_FOUND",
                    format!("No guideline schedule in effect on {}", date),
                    "The effective date precedes every loaded schedule",
                ),
            },
            EngineError::InvalidSchedule {
                effective_date,
                message,
            } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    format!("Schedule effective {} is invalid", effective_date),
                    message,
                ),
            },
        }
    }
}
