//! Worksheet A and Worksheet C models.
//!
//! These are the intermediate values each stage of the pipeline produces.
//! Every field is a line the rendering layer may need to print, so nothing
//! here is derived lazily.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ChildCount, Parent};

/// Where a parent's minimum floor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorSource {
    /// A fixed percentage of income after deductions.
    PercentageOfIncome,
    /// The Worksheet C minimum-support band table.
    MinimumSupportBand,
}

/// Worksheet C: minimum support for a parent with no income above the
/// personal allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetCResult {
    /// Income after deductions carried from Worksheet A.
    pub income_after_deductions: Decimal,
    /// Personal allowance carried from Worksheet A.
    pub personal_allowance: Decimal,
    /// Income after deductions divided by the personal allowance.
    pub ratio: Decimal,
    /// One-based number of the band that matched, if any.
    pub band: Option<u8>,
    /// Percentage multiplier selected from the band table.
    pub multiplier: Decimal,
    /// Income after deductions times the multiplier, rounded.
    pub minimum_support: Decimal,
}

/// Worksheet A for a single parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentWorksheetA {
    /// Which parent this worksheet belongs to.
    pub parent: Parent,
    /// Line 1: gross annual income.
    pub total_income: Decimal,
    /// Line 2: allowable deductions.
    pub total_deductions: Decimal,
    /// Line 3: income after deductions (may be negative).
    pub income_after_deductions: Decimal,
    /// Line 4: personal allowance.
    pub personal_allowance: Decimal,
    /// Line 5: income available for support, never below zero.
    pub income_available_for_support: Decimal,
    /// Line 6: minimum floor.
    pub minimum_floor: Decimal,
    /// How line 6 was computed.
    pub minimum_floor_source: FloorSource,
    /// Line 7: the greater of line 5 and line 6.
    pub line_seven: Decimal,
    /// Worksheet C, present only when line 5 is zero.
    pub worksheet_c: Option<WorksheetCResult>,
}

impl ParentWorksheetA {
    /// Returns true when the minimum floor, not available income, sets line 7.
    ///
    /// SOLA is skipped for such a parent.
    pub fn floor_governs(&self) -> bool {
        self.minimum_floor > self.income_available_for_support
    }
}

/// The Standard of Living Adjustment lines for one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolaLines {
    /// Available income less own primary and supplement shares, floored at 0.
    pub income_for_sola: Decimal,
    /// SOLA factor for the child count.
    pub sola_factor: Decimal,
    /// Income for SOLA times the factor, rounded.
    pub sola_amount: Decimal,
}

/// One parent's column of the combined worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentAllocation {
    /// Which parent this column belongs to.
    pub parent: Parent,
    /// Line 7 carried from the parent's Worksheet A.
    pub line_seven: Decimal,
    /// Proportional share of combined line 7.
    pub share: Decimal,
    /// Share of the primary allowance, rounded.
    pub primary_share: Decimal,
    /// Share of supplemental expenses, rounded.
    pub supplement_share: Decimal,
    /// SOLA lines; `None` when skipped because the minimum floor governs.
    pub sola: Option<SolaLines>,
    /// Share of the total support need, rounded.
    pub gross_obligation: Decimal,
    /// Credit for supplements the parent pays directly.
    pub credit: Decimal,
    /// Gross obligation less credit, never below zero.
    pub net_annual_obligation: Decimal,
}

impl ParentAllocation {
    /// Returns the SOLA amount, treating a skipped SOLA as zero.
    pub fn sola_amount(&self) -> Decimal {
        self.sola
            .as_ref()
            .map(|sola| sola.sola_amount)
            .unwrap_or(Decimal::ZERO)
    }
}

/// The combined-parents worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedResult {
    /// Child count after clamping.
    pub child_count: ChildCount,
    /// Sum of both parents' line 7.
    pub combined_line_seven: Decimal,
    /// True when combined line 7 was zero and shares fell back to one half.
    pub shares_defaulted: bool,
    /// Primary allowance for the child count.
    pub primary_allowance: Decimal,
    /// SOLA factor for the child count.
    pub sola_factor: Decimal,
    /// Total supplemental expenses.
    pub total_supplements: Decimal,
    /// Primary allowance plus supplements plus both SOLA amounts, rounded.
    pub total_support_need: Decimal,
    /// Mother's column.
    pub mother: ParentAllocation,
    /// Father's column.
    pub father: ParentAllocation,
}

impl CombinedResult {
    /// Returns the column for the given parent.
    pub fn allocation(&self, parent: Parent) -> &ParentAllocation {
        match parent {
            Parent::Mother => &self.mother,
            Parent::Father => &self.father,
        }
    }
}
