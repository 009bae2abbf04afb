//! Request types for the guideline engine API.
//!
//! This module defines the JSON request structures for the `/calculate` and
//! `/calculate/batch` endpoints. Every numeric field is read leniently (see
//! [`super::lenient`]) and accepts both snake_case and camelCase names.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{GuidelineInput, OvernightSplit, SupplementalExpenses};

use super::lenient;

/// Request body for the `/calculate` endpoint.
///
/// Missing fields read as zero, so an empty object is a valid (if
/// uninteresting) request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationRequest {
    /// Mother's gross annual income.
    #[serde(alias = "motherGrossAnnual", deserialize_with = "lenient::decimal")]
    pub mother_gross_annual: Decimal,
    /// Mother's allowable annual deductions.
    #[serde(alias = "motherDeductionsAnnual", deserialize_with = "lenient::decimal")]
    pub mother_deductions_annual: Decimal,
    /// Father's gross annual income.
    #[serde(alias = "fatherGrossAnnual", deserialize_with = "lenient::decimal")]
    pub father_gross_annual: Decimal,
    /// Father's allowable annual deductions.
    #[serde(alias = "fatherDeductionsAnnual", deserialize_with = "lenient::decimal")]
    pub father_deductions_annual: Decimal,
    /// Number of children; clamped to 1-8 by the calculation.
    #[serde(alias = "numberOfChildren", deserialize_with = "lenient::count")]
    pub number_of_children: u32,
    /// Supplemental expenses.
    #[serde(alias = "supplementalExpenses", deserialize_with = "lenient::or_default")]
    pub supplemental_expenses: SupplementalExpensesRequest,
    /// Overnights per child, in child order.
    #[serde(alias = "parentingSchedule", deserialize_with = "lenient::or_default")]
    pub parenting_schedule: Vec<OvernightSplitRequest>,
    /// Selects the schedule in effect on this date; the latest when absent.
    #[serde(alias = "effectiveDate", skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
}

/// Supplemental expenses in a calculation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplementalExpensesRequest {
    /// Work-related childcare.
    #[serde(deserialize_with = "lenient::decimal")]
    pub childcare: Decimal,
    /// Health insurance premiums for the children.
    #[serde(deserialize_with = "lenient::decimal")]
    pub health: Decimal,
    /// Uninsured medical expenses.
    #[serde(alias = "uninsuredMedical", deserialize_with = "lenient::decimal")]
    pub uninsured_medical: Decimal,
    /// Any other supplemental expense.
    #[serde(deserialize_with = "lenient::decimal")]
    pub other: Decimal,
}

/// One child's overnights in a calculation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OvernightSplitRequest {
    /// Overnights with the mother.
    #[serde(alias = "motherOvernights", deserialize_with = "lenient::count")]
    pub mother_overnights: u32,
    /// Overnights with the father.
    #[serde(alias = "fatherOvernights", deserialize_with = "lenient::count")]
    pub father_overnights: u32,
}

/// Request body for the `/calculate/batch` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchCalculationRequest {
    /// Selects the schedule for every calculation in the batch.
    #[serde(alias = "effectiveDate", skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    /// The calculations to run.
    #[serde(deserialize_with = "lenient::or_default")]
    pub calculations: Vec<CalculationRequest>,
}

impl From<SupplementalExpensesRequest> for SupplementalExpenses {
    fn from(req: SupplementalExpensesRequest) -> Self {
        Self {
            childcare: req.childcare,
            health: req.health,
            uninsured_medical: req.uninsured_medical,
            other: req.other,
        }
    }
}

impl From<OvernightSplitRequest> for OvernightSplit {
    fn from(req: OvernightSplitRequest) -> Self {
        Self::new(req.mother_overnights, req.father_overnights)
    }
}

impl From<CalculationRequest> for GuidelineInput {
    fn from(req: CalculationRequest) -> Self {
        Self {
            mother_gross_annual: req.mother_gross_annual,
            mother_deductions_annual: req.mother_deductions_annual,
            father_gross_annual: req.father_gross_annual,
            father_deductions_annual: req.father_deductions_annual,
            number_of_children: req.number_of_children,
            supplemental_expenses: req.supplemental_expenses.into(),
            parenting_schedule: req.parenting_schedule.into_iter().map(Into::into).collect(),
        }
    }
}
