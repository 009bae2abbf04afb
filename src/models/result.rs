//! Calculation result models.
//!
//! This module contains [`FinalResult`], the per-child Worksheet B rows it is
//! aggregated from, and the audit trace types shared by every stage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CombinedResult, Parent, ParentWorksheetA};

/// Which parent makes the net transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payer {
    /// The mother pays the father.
    Mother,
    /// The father pays the mother.
    Father,
    /// Obligations cancel out; nobody pays.
    #[serde(rename = "none")]
    Neither,
}

impl From<Parent> for Payer {
    fn from(parent: Parent) -> Self {
        match parent {
            Parent::Mother => Payer::Mother,
            Parent::Father => Payer::Father,
        }
    }
}

/// Which Worksheet B branch produced a child's obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentingTimeMethod {
    /// Not both parents above the overnight threshold: the parent with less
    /// time pays.
    MajorityTime,
    /// Both parents above the threshold: shared-parenting credit applied.
    SharedParentingCredit,
}

/// Where a child's overnight split came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    /// Supplied in the request.
    Supplied,
    /// The request had a schedule but no entry for this child.
    DefaultSplit,
    /// The request had no schedule at all.
    NoSchedule,
}

/// Shared-parenting credit lines for one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditLines {
    /// Overnights above the threshold.
    pub excess_overnights: u32,
    /// Credit factor times excess overnights times base obligation, rounded.
    pub credited_amount: Decimal,
    /// Base obligation less the credited amount.
    pub adjusted_obligation: Decimal,
}

/// Worksheet B lines, present only when the credit procedure ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedParentingLines {
    /// Credit per excess overnight.
    pub credit_factor: Decimal,
    /// Mother's credit lines.
    pub mother: CreditLines,
    /// Father's credit lines.
    pub father: CreditLines,
}

/// The Worksheet B outcome for a single child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerChildResult {
    /// One-based child index.
    pub child_index: u32,
    /// Overnights with the mother.
    pub mother_overnights: u32,
    /// Overnights with the father.
    pub father_overnights: u32,
    /// Where the overnight split came from.
    pub schedule_source: ScheduleSource,
    /// Which branch decided the obligation.
    pub method: ParentingTimeMethod,
    /// Mother's per-child base obligation, to the cent.
    pub mother_base_obligation: Decimal,
    /// Father's per-child base obligation, to the cent.
    pub father_base_obligation: Decimal,
    /// Credit lines when the shared-parenting credit applied.
    pub shared_parenting: Option<SharedParentingLines>,
    /// Annual amount the mother owes for this child.
    pub mother_annual: Decimal,
    /// Annual amount the father owes for this child.
    pub father_annual: Decimal,
    /// Monthly amount the mother owes for this child.
    pub mother_monthly: Decimal,
    /// Monthly amount the father owes for this child.
    pub father_monthly: Decimal,
}

impl PerChildResult {
    /// Returns the annual amount owed by the given parent.
    pub fn annual(&self, parent: Parent) -> Decimal {
        match parent {
            Parent::Mother => self.mother_annual,
            Parent::Father => self.father_annual,
        }
    }

    /// Returns the monthly amount owed by the given parent.
    pub fn monthly(&self, parent: Parent) -> Decimal {
        match parent {
            Parent::Mother => self.mother_monthly,
            Parent::Father => self.father_monthly,
        }
    }
}

/// A parent's obligation summed across all children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentTotals {
    /// Annual total, rounded to a whole unit.
    pub annual: Decimal,
    /// Monthly total, rounded to the cent.
    pub monthly: Decimal,
}

/// Both parents' worksheets, kept for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetTrail {
    /// Mother's Worksheet A.
    pub mother: ParentWorksheetA,
    /// Father's Worksheet A.
    pub father: ParentWorksheetA,
    /// The combined worksheet.
    pub combined: CombinedResult,
}

impl WorksheetTrail {
    /// Returns the Worksheet A for the given parent.
    pub fn worksheet_a(&self, parent: Parent) -> &ParentWorksheetA {
        match parent {
            Parent::Mother => &self.mother,
            Parent::Father => &self.father,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// Stable identifier of the rule that was applied.
    pub rule_id: String,
    /// Human-readable name of the rule.
    pub rule_name: String,
    /// Worksheet and line reference for the rule.
    pub worksheet_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings record input coercions and fallbacks. They never stop the
/// calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
///
/// The trace carries no timings or identifiers, so identical inputs produce
/// identical traces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a guideline calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResult {
    /// Which parent pays.
    pub payer: Payer,
    /// Annual transfer: the monthly transfer times twelve, rounded.
    pub total_annual_transfer: Decimal,
    /// Monthly transfer, to the cent.
    pub total_monthly_transfer: Decimal,
    /// Mother's totals across all children.
    pub mother_totals: ParentTotals,
    /// Father's totals across all children.
    pub father_totals: ParentTotals,
    /// Worksheet B rows in child order.
    pub children: Vec<PerChildResult>,
    /// Worksheet A and combined worksheet for both parents.
    pub worksheets: WorksheetTrail,
    /// Every step taken and every warning raised.
    pub audit_trace: AuditTrace,
}

impl FinalResult {
    /// Returns the totals for the given parent.
    pub fn totals(&self, parent: Parent) -> &ParentTotals {
        match parent {
            Parent::Mother => &self.mother_totals,
            Parent::Father => &self.father_totals,
        }
    }
}
