//! Worksheet A, lines 1 through 7, for a single parent.
//!
//! Line 7 is the greater of the parent's income available for support and
//! their minimum floor. The floor is a flat percentage of income after
//! deductions unless the parent has nothing above the personal allowance, in
//! which case Worksheet C supplies it.

use rust_decimal::Decimal;

use crate::config::GuidelineSchedule;
use crate::models::{AuditStep, FloorSource, Parent, ParentWorksheetA};

use super::rounding::round_to_unit;
use super::worksheet_c::calculate_worksheet_c;

/// The result of a Worksheet A calculation, including its audit steps.
///
/// `audit_steps` holds one step for Worksheet A and, when the minimum floor
/// came from Worksheet C, a second step for it.
#[derive(Debug, Clone)]
pub struct WorksheetACalculation {
    /// The completed worksheet.
    pub worksheet: ParentWorksheetA,
    /// Audit steps in step-number order.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates Worksheet A lines 1-7 for one parent.
///
/// Gross income and deductions are taken as given; callers clamp negative
/// amounts before this point. Income after deductions is not floored, so a
/// parent whose deductions exceed their income carries a negative line 3
/// into Worksheet C.
///
/// # Arguments
///
/// * `parent` - Whose worksheet this is
/// * `gross_annual` - Total annual income
/// * `deductions_annual` - Total allowable annual deductions
/// * `schedule` - The tables in effect
/// * `step_number` - The first step number for the audit trail
///
/// # Examples
///
/// ```
/// use guideline_engine::calculation::calculate_worksheet_a;
/// use guideline_engine::config::statutory_schedule;
/// use guideline_engine::models::Parent;
/// use rust_decimal::Decimal;
///
/// let result = calculate_worksheet_a(
///     Parent::Mother,
///     Decimal::from(60000),
///     Decimal::from(8000),
///     statutory_schedule(),
///     1,
/// );
/// assert_eq!(result.worksheet.income_after_deductions, Decimal::from(52000));
/// assert_eq!(result.worksheet.income_available_for_support, Decimal::from(31655));
/// assert_eq!(result.worksheet.line_seven, Decimal::from(31655));
/// ```
pub fn calculate_worksheet_a(
    parent: Parent,
    gross_annual: Decimal,
    deductions_annual: Decimal,
    schedule: &GuidelineSchedule,
    step_number: u32,
) -> WorksheetACalculation {
    let total_income = round_to_unit(gross_annual);
    let total_deductions = round_to_unit(deductions_annual);
    let income_after_deductions = total_income - total_deductions;
    let personal_allowance = round_to_unit(schedule.personal_allowance);
    let income_available_for_support =
        round_to_unit(income_after_deductions - personal_allowance).max(Decimal::ZERO);

    let mut audit_steps = Vec::with_capacity(2);

    let (minimum_floor, minimum_floor_source, worksheet_c) =
        if income_available_for_support <= Decimal::ZERO {
            let minimum = calculate_worksheet_c(
                parent,
                income_after_deductions,
                personal_allowance,
                schedule,
                step_number + 1,
            );
            let floor = minimum.worksheet.minimum_support.max(Decimal::ZERO);
            audit_steps.push(minimum.audit_step);
            (floor, FloorSource::MinimumSupportBand, Some(minimum.worksheet))
        } else {
            let floor = round_to_unit(income_after_deductions * schedule.minimum_floor_rate);
            (floor, FloorSource::PercentageOfIncome, None)
        };

    let line_seven = income_available_for_support.max(minimum_floor);

    let reasoning = match minimum_floor_source {
        FloorSource::PercentageOfIncome if minimum_floor > income_available_for_support => {
            format!(
                "Floor {} ({} x {}) exceeds available income {}; line 7 = {}",
                minimum_floor,
                income_after_deductions,
                schedule.minimum_floor_rate,
                income_available_for_support,
                line_seven
            )
        }
        FloorSource::PercentageOfIncome => format!(
            "{} - {} - {} = {} available; exceeds floor {}; line 7 = {}",
            total_income,
            total_deductions,
            personal_allowance,
            income_available_for_support,
            minimum_floor,
            line_seven
        ),
        FloorSource::MinimumSupportBand => format!(
            "No income above the personal allowance of {}; Worksheet C minimum {} is line 7",
            personal_allowance, line_seven
        ),
    };

    audit_steps.insert(
        0,
        AuditStep {
            step_number,
            rule_id: "worksheet_a_line_seven".to_string(),
            rule_name: "Income Available for Support".to_string(),
            worksheet_ref: "Worksheet A, lines 1-7".to_string(),
            input: serde_json::json!({
                "parent": parent.as_str(),
                "gross_annual": gross_annual.to_string(),
                "deductions_annual": deductions_annual.to_string(),
                "personal_allowance": personal_allowance.to_string(),
            }),
            output: serde_json::json!({
                "income_after_deductions": income_after_deductions.to_string(),
                "income_available_for_support": income_available_for_support.to_string(),
                "minimum_floor": minimum_floor.to_string(),
                "minimum_floor_source": minimum_floor_source,
                "line_seven": line_seven.to_string(),
            }),
            reasoning,
        },
    );

    WorksheetACalculation {
        worksheet: ParentWorksheetA {
            parent,
            total_income,
            total_deductions,
            income_after_deductions,
            personal_allowance,
            income_available_for_support,
            minimum_floor,
            minimum_floor_source,
            line_seven,
            worksheet_c,
        },
        audit_steps,
    }
}
