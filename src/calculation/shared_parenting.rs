//! Worksheet B: parenting-time adjustment for each child.
//!
//! A child whose overnights are split so that both parents exceed the
//! shared-parenting threshold uses the credit procedure. Every other child
//! uses the majority-time rule, under which the parent with fewer overnights
//! pays their full per-child obligation.

use rust_decimal::Decimal;

use crate::config::GuidelineSchedule;
use crate::models::{
    AuditStep, CreditLines, OvernightSplit, Parent, ParentingTimeMethod, PerChildResult,
    ScheduleSource, SharedParentingLines,
};

use super::rounding::{round_to_cents, round_to_unit};

/// Mother's overnights assumed for a child missing from a supplied schedule.
pub const DEFAULT_MAJORITY_OVERNIGHTS: u32 = 255;

/// Father's overnights assumed for a child missing from a supplied schedule.
pub const DEFAULT_MINORITY_OVERNIGHTS: u32 = 110;

fn months_per_year() -> Decimal {
    Decimal::from(12)
}

/// The result of a Worksheet B calculation for one child.
#[derive(Debug, Clone)]
pub struct ChildObligationCalculation {
    /// The completed per-child lines.
    pub child: PerChildResult,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the overnight split for the child at `child_index` (one-based).
///
/// A child beyond the end of a supplied schedule gets the default
/// 255/110 split. When no schedule was supplied at all, every child is
/// 0/0 and falls to the equal-overnights branch of the majority-time rule.
///
/// # Examples
///
/// ```
/// use guideline_engine::calculation::resolve_child_schedule;
/// use guideline_engine::models::{OvernightSplit, ScheduleSource};
///
/// let schedule = vec![OvernightSplit::new(150, 215)];
/// let (split, source) = resolve_child_schedule(&schedule, 2);
/// assert_eq!(split, OvernightSplit::new(255, 110));
/// assert_eq!(source, ScheduleSource::DefaultSplit);
/// ```
pub fn resolve_child_schedule(
    schedule: &[OvernightSplit],
    child_index: u32,
) -> (OvernightSplit, ScheduleSource) {
    if schedule.is_empty() {
        return (OvernightSplit::default(), ScheduleSource::NoSchedule);
    }
    let position = child_index.saturating_sub(1) as usize;
    match schedule.get(position) {
        Some(split) => (*split, ScheduleSource::Supplied),
        None => (
            OvernightSplit::new(DEFAULT_MAJORITY_OVERNIGHTS, DEFAULT_MINORITY_OVERNIGHTS),
            ScheduleSource::DefaultSplit,
        ),
    }
}

/// Returns true if both parents have strictly more overnights than the
/// threshold.
pub fn qualifies_for_credit(split: &OvernightSplit, schedule: &GuidelineSchedule) -> bool {
    let threshold = schedule.shared_parenting.overnight_threshold;
    split.mother_overnights > threshold && split.father_overnights > threshold
}

fn credit_lines(overnights: u32, base: Decimal, schedule: &GuidelineSchedule) -> CreditLines {
    let excess_overnights = overnights.saturating_sub(schedule.shared_parenting.overnight_threshold);
    let credited_amount = round_to_unit(
        schedule.shared_parenting.credit_factor * Decimal::from(excess_overnights) * base,
    );
    CreditLines {
        excess_overnights,
        credited_amount,
        adjusted_obligation: base - credited_amount,
    }
}

/// Splits a signed difference into `(mother_owes, father_owes)`; a positive
/// difference is owed by the mother.
fn owed_from_difference(difference: Decimal) -> (Decimal, Decimal) {
    if difference > Decimal::ZERO {
        (difference, Decimal::ZERO)
    } else if difference < Decimal::ZERO {
        (Decimal::ZERO, -difference)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    }
}

/// Calculates Worksheet B for one child.
///
/// # Arguments
///
/// * `child_index` - The child's one-based position
/// * `split` - Overnights with each parent
/// * `source` - Where `split` came from
/// * `mother_base` - The mother's net annual obligation divided by the child count
/// * `father_base` - The father's net annual obligation divided by the child count
/// * `schedule` - The tables in effect
/// * `step_number` - The step number for the audit trail
///
/// # Examples
///
/// ```
/// use guideline_engine::calculation::calculate_child_obligation;
/// use guideline_engine::config::statutory_schedule;
/// use guideline_engine::models::{OvernightSplit, ParentingTimeMethod, ScheduleSource};
/// use rust_decimal::Decimal;
///
/// let result = calculate_child_obligation(
///     1,
///     OvernightSplit::new(365, 0),
///     ScheduleSource::Supplied,
///     Decimal::from(9781),
///     Decimal::from(4528),
///     statutory_schedule(),
///     1,
/// );
/// assert_eq!(result.child.method, ParentingTimeMethod::MajorityTime);
/// assert_eq!(result.child.father_annual, Decimal::from(4528));
/// assert_eq!(result.child.mother_annual, Decimal::ZERO);
/// ```
pub fn calculate_child_obligation(
    child_index: u32,
    split: OvernightSplit,
    source: ScheduleSource,
    mother_base: Decimal,
    father_base: Decimal,
    schedule: &GuidelineSchedule,
    step_number: u32,
) -> ChildObligationCalculation {
    let (method, shared_parenting, mother_owes, father_owes, reasoning) =
        if qualifies_for_credit(&split, schedule) {
            let mother = credit_lines(split.mother_overnights, mother_base, schedule);
            let father = credit_lines(split.father_overnights, father_base, schedule);
            let (mother_owes, father_owes) =
                owed_from_difference(mother.adjusted_obligation - father.adjusted_obligation);
            let mother_owes = mother_owes.min(mother_base);
            let father_owes = father_owes.min(father_base);
            let reasoning = format!(
                "Both parents exceed {} overnights ({}/{}); adjusted {} vs {}",
                schedule.shared_parenting.overnight_threshold,
                split.mother_overnights,
                split.father_overnights,
                mother.adjusted_obligation.round_dp(2),
                father.adjusted_obligation.round_dp(2)
            );
            (
                ParentingTimeMethod::SharedParentingCredit,
                Some(SharedParentingLines {
                    credit_factor: schedule.shared_parenting.credit_factor,
                    mother,
                    father,
                }),
                mother_owes,
                father_owes,
                reasoning,
            )
        } else {
            let (mother_owes, father_owes, reasoning) =
                if split.mother_overnights < split.father_overnights {
                    (
                        mother_base,
                        Decimal::ZERO,
                        format!(
                            "Mother has fewer overnights ({} vs {}) and pays the full obligation",
                            split.mother_overnights, split.father_overnights
                        ),
                    )
                } else if split.father_overnights < split.mother_overnights {
                    (
                        Decimal::ZERO,
                        father_base,
                        format!(
                            "Father has fewer overnights ({} vs {}) and pays the full obligation",
                            split.father_overnights, split.mother_overnights
                        ),
                    )
                } else {
                    let (m, f) = owed_from_difference(mother_base - father_base);
                    (
                        m,
                        f,
                        format!(
                            "Equal overnights ({}); the larger obligation pays the difference",
                            split.mother_overnights
                        ),
                    )
                };
            (
                ParentingTimeMethod::MajorityTime,
                None,
                mother_owes,
                father_owes,
                reasoning,
            )
        };

    let mother_annual = round_to_cents(mother_owes);
    let father_annual = round_to_cents(father_owes);
    let mother_monthly = round_to_cents(mother_annual / months_per_year());
    let father_monthly = round_to_cents(father_annual / months_per_year());

    let audit_step = AuditStep {
        step_number,
        rule_id: match method {
            ParentingTimeMethod::MajorityTime => "majority_time_rule".to_string(),
            ParentingTimeMethod::SharedParentingCredit => "shared_parenting_credit".to_string(),
        },
        rule_name: "Parenting Time Adjustment".to_string(),
        worksheet_ref: format!("Worksheet B, child {}", child_index),
        input: serde_json::json!({
            "child_index": child_index,
            "mother_overnights": split.mother_overnights,
            "father_overnights": split.father_overnights,
            "schedule_source": source,
            "mother_base": mother_base.round_dp(2).to_string(),
            "father_base": father_base.round_dp(2).to_string(),
        }),
        output: serde_json::json!({
            "mother_annual": mother_annual.to_string(),
            "father_annual": father_annual.to_string(),
            "mother_monthly": mother_monthly.to_string(),
            "father_monthly": father_monthly.to_string(),
        }),
        reasoning,
    };

    ChildObligationCalculation {
        child: PerChildResult {
            child_index,
            mother_overnights: split.mother_overnights,
            father_overnights: split.father_overnights,
            schedule_source: source,
            method,
            mother_base_obligation: mother_base,
            father_base_obligation: father_base,
            shared_parenting,
            mother_annual,
            father_annual,
            mother_monthly,
            father_monthly,
        },
        audit_step,
    }
}

impl PerChildResult {
    /// The parent who owes for this child, if anyone.
    pub fn paying_parent(&self) -> Option<Parent> {
        if self.mother_annual > Decimal::ZERO {
            Some(Parent::Mother)
        } else if self.father_annual > Decimal::ZERO {
            Some(Parent::Father)
        } else {
            None
        }
    }
}
