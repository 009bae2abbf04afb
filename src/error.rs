//! Error types for the guideline engine.
//!
//! The calculation pipeline itself never fails: malformed numbers are coerced
//! and degenerate inputs fall back to named constants. Errors only arise when
//! loading or selecting a guideline schedule.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the guideline engine.
///
/// # Example
///
/// ```
/// use guideline_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/guideline.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/guideline.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No schedule is effective on the requested date.
    #[error("No guideline schedule effective on {date}")]
    ScheduleNotFound {
        /// The date for which a schedule was requested.
        date: NaiveDate,
    },

    /// A schedule was loaded but its tables are inconsistent.
    #[error("Invalid guideline schedule effective {effective_date}: {message}")]
    InvalidSchedule {
        /// The effective date of the offending schedule.
        effective_date: NaiveDate,
        /// What made the schedule invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
