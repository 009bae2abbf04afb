//! Calculation logic for the guideline engine.
//!
//! This module contains the rounding primitives and one function per
//! worksheet stage: Worksheet A for each parent (with Worksheet C for the
//! minimum floor), the combined-parents resolver including SOLA, Worksheet B
//! for each child, and the aggregator that nets the parents' totals.
//! [`calculate_guideline`] runs them in order.

mod aggregate;
mod combined;
mod guideline;
mod rounding;
mod shared_parenting;
mod worksheet_a;
mod worksheet_c;

pub use aggregate::{AggregateCalculation, aggregate_children, parent_totals};
pub use combined::{CombinedCalculation, equal_share, income_shares, resolve_combined};
pub use guideline::{MAX_INPUT_AMOUNT, calculate_batch, calculate_guideline, sanitize_input};
pub use rounding::{coerce_f64, round_to_cents, round_to_unit};
pub use shared_parenting::{
    ChildObligationCalculation, DEFAULT_MAJORITY_OVERNIGHTS, DEFAULT_MINORITY_OVERNIGHTS,
    calculate_child_obligation, qualifies_for_credit, resolve_child_schedule,
};
pub use worksheet_a::{WorksheetACalculation, calculate_worksheet_a};
pub use worksheet_c::{
    MinimumSupportCalculation, calculate_worksheet_c, income_ratio, select_band,
    zero_allowance_ratio,
};
