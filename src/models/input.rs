//! Calculation input model.
//!
//! This module defines [`GuidelineInput`], the immutable request handed to
//! the guideline pipeline, together with the parenting-time and expense types
//! it is built from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The smallest number of children the schedule tables cover.
pub const MIN_CHILDREN: u32 = 1;

/// The largest number of children the schedule tables cover.
pub const MAX_CHILDREN: u32 = 8;

/// Identifies one of the two parents on the worksheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parent {
    /// The mother column of the worksheets.
    Mother,
    /// The father column of the worksheets.
    Father,
}

impl Parent {
    /// Returns the other parent.
    pub fn other(self) -> Self {
        match self {
            Parent::Mother => Parent::Father,
            Parent::Father => Parent::Mother,
        }
    }

    /// Returns the snake_case name used in audit payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Parent::Mother => "mother",
            Parent::Father => "father",
        }
    }
}

/// Number of children, clamped to the range the schedule tables cover.
///
/// Counts below one are treated as one child and counts above eight use the
/// eight-child row.
///
/// # Example
///
/// ```
/// use guideline_engine::models::ChildCount;
///
/// assert_eq!(ChildCount::new(0).get(), 1);
/// assert_eq!(ChildCount::new(3).get(), 3);
/// assert_eq!(ChildCount::new(12).get(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct ChildCount(u32);

impl ChildCount {
    /// Creates a child count, clamping the request into `[1, 8]`.
    pub fn new(requested: u32) -> Self {
        Self(requested.clamp(MIN_CHILDREN, MAX_CHILDREN))
    }

    /// Returns the clamped count.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the zero-based row index into a per-child-count table.
    pub fn table_index(self) -> usize {
        (self.0 - MIN_CHILDREN) as usize
    }

    /// Returns the count as a decimal divisor.
    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl From<u32> for ChildCount {
    fn from(requested: u32) -> Self {
        Self::new(requested)
    }
}

impl From<ChildCount> for u32 {
    fn from(count: ChildCount) -> Self {
        count.0
    }
}

/// Supplemental child-related expenses added to the primary allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupplementalExpenses {
    /// Work-related childcare costs.
    pub childcare: Decimal,
    /// Health insurance premiums attributable to the children.
    pub health: Decimal,
    /// Uninsured medical expenses.
    pub uninsured_medical: Decimal,
    /// Any other extraordinary expenses.
    pub other: Decimal,
}

impl SupplementalExpenses {
    /// Returns the sum of all four expense categories.
    pub fn total(&self) -> Decimal {
        self.childcare + self.health + self.uninsured_medical + self.other
    }
}

/// Annual overnights a single child spends with each parent.
///
/// The two counts need not sum to 365.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OvernightSplit {
    /// Overnights per year with the mother.
    pub mother_overnights: u32,
    /// Overnights per year with the father.
    pub father_overnights: u32,
}

impl OvernightSplit {
    /// Creates a split from the two overnight counts.
    pub fn new(mother_overnights: u32, father_overnights: u32) -> Self {
        Self {
            mother_overnights,
            father_overnights,
        }
    }

    /// Returns the overnights for the given parent.
    pub fn overnights(&self, parent: Parent) -> u32 {
        match parent {
            Parent::Mother => self.mother_overnights,
            Parent::Father => self.father_overnights,
        }
    }
}

/// A complete guideline calculation request.
///
/// All currency amounts are annual figures. The request is never mutated by
/// the pipeline; negative amounts are clamped into a new value before
/// Worksheet A runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineInput {
    /// Mother's gross annual income.
    pub mother_gross_annual: Decimal,
    /// Mother's allowable annual deductions.
    pub mother_deductions_annual: Decimal,
    /// Father's gross annual income.
    pub father_gross_annual: Decimal,
    /// Father's allowable annual deductions.
    pub father_deductions_annual: Decimal,
    /// Number of children as requested (clamped when used).
    pub number_of_children: u32,
    /// Supplemental expenses shared between the parents.
    #[serde(default)]
    pub supplemental_expenses: SupplementalExpenses,
    /// Per-child overnight splits in child order.
    #[serde(default)]
    pub parenting_schedule: Vec<OvernightSplit>,
}

impl GuidelineInput {
    /// Returns the gross annual income for the given parent.
    pub fn gross_annual(&self, parent: Parent) -> Decimal {
        match parent {
            Parent::Mother => self.mother_gross_annual,
            Parent::Father => self.father_gross_annual,
        }
    }

    /// Returns the annual deductions for the given parent.
    pub fn deductions_annual(&self, parent: Parent) -> Decimal {
        match parent {
            Parent::Mother => self.mother_deductions_annual,
            Parent::Father => self.father_deductions_annual,
        }
    }

    /// Returns the clamped child count.
    pub fn child_count(&self) -> ChildCount {
        ChildCount::new(self.number_of_children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_child_count_clamps_low_and_high() {
        assert_eq!(ChildCount::new(0).get(), 1);
        assert_eq!(ChildCount::new(1).get(), 1);
        assert_eq!(ChildCount::new(8).get(), 8);
        assert_eq!(ChildCount::new(9).get(), 8);
        assert_eq!(ChildCount::new(u32::MAX).get(), 8);
    }

    #[test]
    fn test_child_count_table_index_is_zero_based() {
        assert_eq!(ChildCount::new(1).table_index(), 0);
        assert_eq!(ChildCount::new(8).table_index(), 7);
    }

    #[test]
    fn test_child_count_deserialization_clamps() {
        let count: ChildCount = serde_json::from_str("11").unwrap();
        assert_eq!(count.get(), 8);

        let json = serde_json::to_string(&ChildCount::new(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn test_supplemental_expenses_total() {
        let expenses = SupplementalExpenses {
            childcare: dec("3000"),
            health: dec("1200"),
            uninsured_medical: dec("250.50"),
            other: dec("49.50"),
        };
        assert_eq!(expenses.total(), dec("4500"));
    }

    #[test]
    fn test_parent_other() {
        assert_eq!(Parent::Mother.other(), Parent::Father);
        assert_eq!(Parent::Father.other(), Parent::Mother);
    }

    #[test]
    fn test_overnight_split_lookup_by_parent() {
        let split = OvernightSplit::new(150, 215);
        assert_eq!(split.overnights(Parent::Mother), 150);
        assert_eq!(split.overnights(Parent::Father), 215);
    }

    #[test]
    fn test_deserialize_input_with_defaults() {
        let json = r#"{
            "mother_gross_annual": "60000",
            "mother_deductions_annual": "8000",
            "father_gross_annual": "40000",
            "father_deductions_annual": "5000",
            "number_of_children": 2
        }"#;

        let input: GuidelineInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.gross_annual(Parent::Mother), dec("60000"));
        assert_eq!(input.deductions_annual(Parent::Father), dec("5000"));
        assert_eq!(input.child_count().get(), 2);
        assert_eq!(input.supplemental_expenses.total(), Decimal::ZERO);
        assert!(input.parenting_schedule.is_empty());
    }
}
