//! Core data models for the guideline engine.
//!
//! Each pipeline stage produces one of these immutable values and hands it
//! to the next stage.

mod input;
mod lines;
mod result;
mod worksheet;

pub use input::{
    ChildCount, GuidelineInput, MAX_CHILDREN, MIN_CHILDREN, OvernightSplit, Parent,
    SupplementalExpenses,
};
pub use lines::WorksheetLine;
pub use result::{
    AuditStep, AuditTrace, AuditWarning, CreditLines, FinalResult, ParentTotals,
    ParentingTimeMethod, Payer, PerChildResult, ScheduleSource, SharedParentingLines,
    WorksheetTrail,
};
pub use worksheet::{
    CombinedResult, FloorSource, ParentAllocation, ParentWorksheetA, SolaLines, WorksheetCResult,
};
