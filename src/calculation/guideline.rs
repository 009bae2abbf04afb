//! The full guideline pipeline.
//!
//! Input sanitizing, Worksheet A (and C) per parent, the combined
//! resolver, Worksheet B per child and the aggregator, run in that order.
//! Every stage is pure; the same input and schedule always produce an
//! identical [`FinalResult`].

use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::GuidelineSchedule;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, FinalResult, GuidelineInput, MAX_CHILDREN, MIN_CHILDREN,
    Parent, ScheduleSource, SupplementalExpenses, WorksheetTrail,
};

use super::aggregate::aggregate_children;
use super::combined::resolve_combined;
use super::shared_parenting::{calculate_child_obligation, resolve_child_schedule};
use super::worksheet_a::calculate_worksheet_a;

/// Largest amount, per input field, the pipeline accepts. Larger amounts are
/// capped so that sums and products across the worksheets stay within
/// `Decimal` range.
pub const MAX_INPUT_AMOUNT: i64 = 1_000_000_000_000_000;

fn clamp_non_negative(value: Decimal, field: &str, warnings: &mut Vec<AuditWarning>) -> Decimal {
    let cap = Decimal::from(MAX_INPUT_AMOUNT);
    if value < Decimal::ZERO {
        warnings.push(AuditWarning::new(
            "NEGATIVE_INPUT_CLAMPED",
            format!("{} of {} was negative and is treated as 0", field, value),
            "medium",
        ));
        Decimal::ZERO
    } else if value > cap {
        warnings.push(AuditWarning::new(
            "INPUT_CAPPED",
            format!("{} of {} exceeds the maximum and is treated as {}", field, value, cap),
            "high",
        ));
        cap
    } else {
        value
    }
}

/// Returns a copy of `input` with every negative amount replaced by zero and
/// every amount above [`MAX_INPUT_AMOUNT`] capped, recording a warning for
/// each.
pub fn sanitize_input(input: &GuidelineInput, warnings: &mut Vec<AuditWarning>) -> GuidelineInput {
    let expenses = &input.supplemental_expenses;
    GuidelineInput {
        mother_gross_annual: clamp_non_negative(
            input.mother_gross_annual,
            "mother_gross_annual",
            warnings,
        ),
        mother_deductions_annual: clamp_non_negative(
            input.mother_deductions_annual,
            "mother_deductions_annual",
            warnings,
        ),
        father_gross_annual: clamp_non_negative(
            input.father_gross_annual,
            "father_gross_annual",
            warnings,
        ),
        father_deductions_annual: clamp_non_negative(
            input.father_deductions_annual,
            "father_deductions_annual",
            warnings,
        ),
        number_of_children: input.number_of_children,
        supplemental_expenses: SupplementalExpenses {
            childcare: clamp_non_negative(expenses.childcare, "childcare", warnings),
            health: clamp_non_negative(expenses.health, "health", warnings),
            uninsured_medical: clamp_non_negative(
                expenses.uninsured_medical,
                "uninsured_medical",
                warnings,
            ),
            other: clamp_non_negative(expenses.other, "other", warnings),
        },
        parenting_schedule: input.parenting_schedule.clone(),
    }
}

fn schedule_warnings(input: &GuidelineInput, warnings: &mut Vec<AuditWarning>) {
    let requested = input.number_of_children;
    let count = input.child_count().get();

    if !(MIN_CHILDREN..=MAX_CHILDREN).contains(&requested) {
        warnings.push(AuditWarning::new(
            "CHILD_COUNT_CLAMPED",
            format!("{} children requested; calculated for {}", requested, count),
            "medium",
        ));
    }

    let supplied = input.parenting_schedule.len();
    if supplied == 0 {
        warnings.push(AuditWarning::new(
            "NO_PARENTING_SCHEDULE",
            "No parenting schedule supplied; every child is treated as 0/0 overnights",
            "medium",
        ));
    } else if supplied < count as usize {
        warnings.push(AuditWarning::new(
            "DEFAULT_PARENTING_SPLIT",
            format!(
                "Schedule covers {} of {} children; the rest use the default 255/110 split",
                supplied, count
            ),
            "low",
        ));
    } else if supplied > count as usize {
        warnings.push(AuditWarning::new(
            "EXTRA_SCHEDULE_ENTRIES",
            format!(
                "Schedule has {} entries for {} children; extra entries are ignored",
                supplied, count
            ),
            "low",
        ));
    }
}

/// Runs the complete guideline calculation.
///
/// Never fails: negative amounts are clamped to zero, oversized amounts are
/// capped at [`MAX_INPUT_AMOUNT`], the child count is
/// clamped to 1-8, and missing parenting-time entries get defaults. Each
/// such adjustment is recorded as a warning in the audit trace.
///
/// # Examples
///
/// ```
/// use guideline_engine::calculation::calculate_guideline;
/// use guideline_engine::config::statutory_schedule;
/// use guideline_engine::models::{GuidelineInput, OvernightSplit, Payer};
/// use rust_decimal::Decimal;
///
/// let input = GuidelineInput {
///     mother_gross_annual: Decimal::from(60000),
///     mother_deductions_annual: Decimal::from(8000),
///     father_gross_annual: Decimal::from(40000),
///     father_deductions_annual: Decimal::from(5000),
///     number_of_children: 1,
///     supplemental_expenses: Default::default(),
///     parenting_schedule: vec![OvernightSplit::new(365, 0)],
/// };
///
/// let result = calculate_guideline(&input, statutory_schedule());
/// assert_eq!(result.payer, Payer::Father);
/// assert_eq!(result.total_annual_transfer, Decimal::from(4528));
/// ```
pub fn calculate_guideline(input: &GuidelineInput, schedule: &GuidelineSchedule) -> FinalResult {
    let mut warnings = Vec::new();
    let input = sanitize_input(input, &mut warnings);
    schedule_warnings(&input, &mut warnings);

    let child_count = input.child_count();
    let mut steps: Vec<AuditStep> = Vec::new();
    let next_step = |steps: &Vec<AuditStep>| steps.len() as u32 + 1;

    let mother = calculate_worksheet_a(
        Parent::Mother,
        input.mother_gross_annual,
        input.mother_deductions_annual,
        schedule,
        next_step(&steps),
    );
    steps.extend(mother.audit_steps);

    let father = calculate_worksheet_a(
        Parent::Father,
        input.father_gross_annual,
        input.father_deductions_annual,
        schedule,
        next_step(&steps),
    );
    steps.extend(father.audit_steps);

    let combined = resolve_combined(
        &mother.worksheet,
        &father.worksheet,
        child_count,
        input.supplemental_expenses.total(),
        schedule,
        next_step(&steps),
    );
    steps.extend(combined.audit_steps);
    let combined = combined.combined;

    let mother_base = combined.base_obligation_per_child(Parent::Mother);
    let father_base = combined.base_obligation_per_child(Parent::Father);

    let mut children = Vec::with_capacity(child_count.get() as usize);
    for child_index in 1..=child_count.get() {
        let (split, source) = resolve_child_schedule(&input.parenting_schedule, child_index);
        if source == ScheduleSource::DefaultSplit {
            debug!(child_index, "Applying default overnight split");
        }
        let child = calculate_child_obligation(
            child_index,
            split,
            source,
            mother_base,
            father_base,
            schedule,
            next_step(&steps),
        );
        steps.push(child.audit_step);
        children.push(child.child);
    }

    let aggregate = aggregate_children(&children, next_step(&steps));
    steps.push(aggregate.audit_step);

    debug!(
        payer = ?aggregate.payer,
        annual = %aggregate.total_annual_transfer,
        monthly = %aggregate.total_monthly_transfer,
        warnings = warnings.len(),
        "Guideline calculation complete"
    );

    FinalResult {
        payer: aggregate.payer,
        total_annual_transfer: aggregate.total_annual_transfer,
        total_monthly_transfer: aggregate.total_monthly_transfer,
        mother_totals: aggregate.mother_totals,
        father_totals: aggregate.father_totals,
        children,
        worksheets: WorksheetTrail {
            mother: mother.worksheet,
            father: father.worksheet,
            combined,
        },
        audit_trace: AuditTrace { steps, warnings },
    }
}

/// Runs [`calculate_guideline`] over many inputs in parallel.
///
/// Results are returned in input order.
pub fn calculate_batch(inputs: &[GuidelineInput], schedule: &GuidelineSchedule) -> Vec<FinalResult> {
    inputs
        .par_iter()
        .map(|input| calculate_guideline(input, schedule))
        .collect()
}
