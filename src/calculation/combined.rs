//! Worksheet A, lines 8 through 19: splitting the combined support need.
//!
//! Each parent's share of the combined line 7 apportions the primary
//! allowance and supplemental expenses. Parents whose line 7 came from
//! available income (not from their minimum floor) also contribute a
//! standard-of-living adjustment (SOLA) to the total need.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::GuidelineSchedule;
use crate::models::{
    AuditStep, ChildCount, CombinedResult, Parent, ParentAllocation, ParentWorksheetA, SolaLines,
};

use super::rounding::round_to_unit;

/// Share given to each parent when the combined line 7 is zero.
pub fn equal_share() -> Decimal {
    Decimal::new(5, 1)
}

/// The result of resolving the combined worksheet, including audit steps.
#[derive(Debug, Clone)]
pub struct CombinedCalculation {
    /// Lines 8-19 for both parents.
    pub combined: CombinedResult,
    /// Audit steps for shares, SOLA and net obligations, in that order.
    pub audit_steps: Vec<AuditStep>,
}

/// Returns `(mother_share, father_share)` of the combined line 7.
///
/// The father's share is the complement of the mother's so the two always
/// sum to exactly one. The flag is true when the shares fell back to
/// [`equal_share`] because the combined line 7 was zero.
pub fn income_shares(
    mother_line_seven: Decimal,
    father_line_seven: Decimal,
) -> (Decimal, Decimal, bool) {
    let combined = mother_line_seven + father_line_seven;
    if combined <= Decimal::ZERO {
        return (equal_share(), equal_share(), true);
    }
    match mother_line_seven.checked_div(combined) {
        Some(mother) => (mother, Decimal::ONE - mother, false),
        None => (equal_share(), equal_share(), true),
    }
}

/// Per-parent lines 8-15 before the total need is known.
struct PartialAllocation {
    share: Decimal,
    primary_share: Decimal,
    supplement_share: Decimal,
    sola: Option<SolaLines>,
}

fn allocate(
    worksheet: &ParentWorksheetA,
    share: Decimal,
    primary_allowance: Decimal,
    total_supplements: Decimal,
    sola_factor: Decimal,
) -> PartialAllocation {
    let primary_share = round_to_unit(share * primary_allowance);
    let supplement_share = round_to_unit(share * total_supplements);

    let sola = if worksheet.floor_governs() {
        None
    } else {
        let income_for_sola = (worksheet.income_available_for_support
            - primary_share
            - supplement_share)
            .max(Decimal::ZERO);
        Some(SolaLines {
            income_for_sola,
            sola_factor,
            sola_amount: round_to_unit(income_for_sola * sola_factor),
        })
    };

    PartialAllocation {
        share,
        primary_share,
        supplement_share,
        sola,
    }
}

fn finish(
    worksheet: &ParentWorksheetA,
    partial: PartialAllocation,
    total_support_need: Decimal,
) -> ParentAllocation {
    let gross_obligation = round_to_unit(partial.share * total_support_need);
    let credit = partial.supplement_share;
    let net_annual_obligation = round_to_unit(gross_obligation - credit).max(Decimal::ZERO);

    ParentAllocation {
        parent: worksheet.parent,
        line_seven: worksheet.line_seven,
        share: partial.share,
        primary_share: partial.primary_share,
        supplement_share: partial.supplement_share,
        sola: partial.sola,
        gross_obligation,
        credit,
        net_annual_obligation,
    }
}

fn sola_json(sola: &Option<SolaLines>) -> serde_json::Value {
    match sola {
        Some(lines) => serde_json::json!({
            "income_for_sola": lines.income_for_sola.to_string(),
            "sola_amount": lines.sola_amount.to_string(),
        }),
        None => serde_json::Value::Null,
    }
}

/// Resolves Worksheet A lines 8-19 from both parents' line 7.
///
/// # Arguments
///
/// * `mother` - The mother's Worksheet A
/// * `father` - The father's Worksheet A
/// * `child_count` - The clamped number of children
/// * `total_supplements` - Sum of all supplemental expenses
/// * `schedule` - The tables in effect
/// * `step_number` - The first step number for the audit trail
///
/// # Examples
///
/// ```
/// use guideline_engine::calculation::{calculate_worksheet_a, resolve_combined};
/// use guideline_engine::config::statutory_schedule;
/// use guideline_engine::models::{ChildCount, Parent};
/// use rust_decimal::Decimal;
///
/// let schedule = statutory_schedule();
/// let mother = calculate_worksheet_a(
///     Parent::Mother, Decimal::from(60000), Decimal::from(8000), schedule, 1,
/// );
/// let father = calculate_worksheet_a(
///     Parent::Father, Decimal::from(40000), Decimal::from(5000), schedule, 2,
/// );
///
/// let result = resolve_combined(
///     &mother.worksheet,
///     &father.worksheet,
///     ChildCount::new(1),
///     Decimal::ZERO,
///     schedule,
///     3,
/// );
/// let combined = result.combined;
/// assert_eq!(combined.mother.share + combined.father.share, Decimal::ONE);
/// assert_eq!(combined.total_support_need, Decimal::from(14309));
/// ```
pub fn resolve_combined(
    mother: &ParentWorksheetA,
    father: &ParentWorksheetA,
    child_count: ChildCount,
    total_supplements: Decimal,
    schedule: &GuidelineSchedule,
    step_number: u32,
) -> CombinedCalculation {
    let combined_line_seven = mother.line_seven + father.line_seven;
    let (mother_share, father_share, shares_defaulted) =
        income_shares(mother.line_seven, father.line_seven);

    let primary_allowance = schedule.primary_allowance_for(child_count);
    let sola_factor = schedule.sola_factor_for(child_count);

    let mother_partial = allocate(
        mother,
        mother_share,
        primary_allowance,
        total_supplements,
        sola_factor,
    );
    let father_partial = allocate(
        father,
        father_share,
        primary_allowance,
        total_supplements,
        sola_factor,
    );

    let sola_total = [&mother_partial, &father_partial]
        .iter()
        .filter_map(|p| p.sola.as_ref())
        .map(|sola| sola.sola_amount)
        .sum::<Decimal>();
    let total_support_need = round_to_unit(primary_allowance + total_supplements + sola_total);

    debug!(
        children = child_count.get(),
        %combined_line_seven,
        shares_defaulted,
        %total_support_need,
        "Resolved combined support need"
    );

    let shares_step = AuditStep {
        step_number,
        rule_id: "combined_income_shares".to_string(),
        rule_name: "Percentage Share of Income".to_string(),
        worksheet_ref: "Worksheet A, line 8".to_string(),
        input: serde_json::json!({
            "mother_line_seven": mother.line_seven.to_string(),
            "father_line_seven": father.line_seven.to_string(),
        }),
        output: serde_json::json!({
            "combined_line_seven": combined_line_seven.to_string(),
            "mother_share": mother_share.round_dp(4).to_string(),
            "father_share": father_share.round_dp(4).to_string(),
            "shares_defaulted": shares_defaulted,
        }),
        reasoning: if shares_defaulted {
            "Combined line 7 is zero; each parent takes an equal share".to_string()
        } else {
            format!(
                "{} / {} = {} for the mother; the father takes the remainder",
                mother.line_seven,
                combined_line_seven,
                mother_share.round_dp(4)
            )
        },
    };

    let sola_reasoning = match (&mother_partial.sola, &father_partial.sola) {
        (Some(_), Some(_)) => "Both parents contribute SOLA".to_string(),
        (Some(_), None) => "Father's minimum floor governs; father SOLA lines are blank".to_string(),
        (None, Some(_)) => "Mother's minimum floor governs; mother SOLA lines are blank".to_string(),
        (None, None) => "Both parents' minimum floors govern; no SOLA".to_string(),
    };
    let sola_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "standard_of_living_adjustment".to_string(),
        rule_name: "Standard of Living Adjustment".to_string(),
        worksheet_ref: "Worksheet A, lines 9-16".to_string(),
        input: serde_json::json!({
            "children": child_count.get(),
            "primary_allowance": primary_allowance.to_string(),
            "total_supplements": total_supplements.to_string(),
            "sola_factor": sola_factor.to_string(),
        }),
        output: serde_json::json!({
            "mother": sola_json(&mother_partial.sola),
            "father": sola_json(&father_partial.sola),
            "total_support_need": total_support_need.to_string(),
        }),
        reasoning: sola_reasoning,
    };

    let mother_allocation = finish(mother, mother_partial, total_support_need);
    let father_allocation = finish(father, father_partial, total_support_need);

    let obligation_step = AuditStep {
        step_number: step_number + 2,
        rule_id: "net_annual_obligation".to_string(),
        rule_name: "Net Annual Obligation".to_string(),
        worksheet_ref: "Worksheet A, lines 17-19".to_string(),
        input: serde_json::json!({
            "total_support_need": total_support_need.to_string(),
        }),
        output: serde_json::json!({
            "mother_gross": mother_allocation.gross_obligation.to_string(),
            "mother_credit": mother_allocation.credit.to_string(),
            "mother_net": mother_allocation.net_annual_obligation.to_string(),
            "father_gross": father_allocation.gross_obligation.to_string(),
            "father_credit": father_allocation.credit.to_string(),
            "father_net": father_allocation.net_annual_obligation.to_string(),
        }),
        reasoning: format!(
            "Need {} split by share, less supplements paid directly: mother {}, father {}",
            total_support_need,
            mother_allocation.net_annual_obligation,
            father_allocation.net_annual_obligation
        ),
    };

    CombinedCalculation {
        combined: CombinedResult {
            child_count,
            combined_line_seven,
            shares_defaulted,
            primary_allowance,
            sola_factor,
            total_supplements,
            total_support_need,
            mother: mother_allocation,
            father: father_allocation,
        },
        audit_steps: vec![shares_step, sola_step, obligation_step],
    }
}

impl CombinedResult {
    /// Net annual obligation per child for `parent`, before parenting time.
    ///
    /// Not re-rounded; Worksheet B rounds once it has applied any credit.
    pub fn base_obligation_per_child(&self, parent: Parent) -> Decimal {
        self.allocation(parent)
            .net_annual_obligation
            .checked_div(self.child_count.as_decimal())
            .unwrap_or(Decimal::ZERO)
    }
}
