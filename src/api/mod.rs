//! HTTP API module for the guideline engine.
//!
//! This module provides the REST endpoints for running guideline
//! calculations, singly or in batches.

mod handlers;
mod lenient;
mod request;
mod response;
mod state;

pub use handlers::{MAX_BATCH_SIZE, create_router};
pub use request::{
    BatchCalculationRequest, CalculationRequest, OvernightSplitRequest,
    SupplementalExpensesRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, BatchCalculationResponse, CalculationResponse, WorksheetLines,
};
pub use state::AppState;
