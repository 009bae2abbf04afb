//! Property tests for the guideline calculation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use guideline_engine::calculation::{
    calculate_guideline, calculate_worksheet_a, income_shares, qualifies_for_credit,
    round_to_cents, round_to_unit, select_band,
};
use guideline_engine::config::{BandOverflowPolicy, statutory_schedule};
use guideline_engine::models::{
    ChildCount, GuidelineInput, OvernightSplit, Parent, Payer, SupplementalExpenses,
};

fn input(
    mother_gross: u32,
    father_gross: u32,
    children: u32,
    schedule: Vec<OvernightSplit>,
) -> GuidelineInput {
    GuidelineInput {
        mother_gross_annual: Decimal::from(mother_gross),
        mother_deductions_annual: Decimal::ZERO,
        father_gross_annual: Decimal::from(father_gross),
        father_deductions_annual: Decimal::ZERO,
        number_of_children: children,
        supplemental_expenses: SupplementalExpenses::default(),
        parenting_schedule: schedule,
    }
}

fn split_strategy() -> impl Strategy<Value = OvernightSplit> {
    (0u32..=365).prop_map(|mother| OvernightSplit::new(mother, 365 - mother))
}

proptest! {
    #[test]
    fn shares_sum_to_one(mother in 0u32..1_000_000, father in 0u32..1_000_000) {
        let (m, f, defaulted) = income_shares(Decimal::from(mother), Decimal::from(father));
        prop_assert_eq!(m + f, Decimal::ONE);
        prop_assert_eq!(defaulted, mother == 0 && father == 0);
    }

    #[test]
    fn raising_gross_never_lowers_share(
        base in 0u32..300_000,
        raise in 0u32..100_000,
        other in 0u32..300_000,
    ) {
        let schedule = statutory_schedule();
        let share_for = |gross: u32| {
            let mother = calculate_worksheet_a(
                Parent::Mother, Decimal::from(gross), Decimal::ZERO, schedule, 1,
            );
            let father = calculate_worksheet_a(
                Parent::Father, Decimal::from(other), Decimal::ZERO, schedule, 2,
            );
            income_shares(mother.worksheet.line_seven, father.worksheet.line_seven).0
        };
        prop_assert!(share_for(base + raise) >= share_for(base));
    }

    #[test]
    fn line_seven_is_never_negative(gross in 0u32..200_000, deductions in 0u32..200_000) {
        let result = calculate_worksheet_a(
            Parent::Father,
            Decimal::from(gross),
            Decimal::from(deductions),
            statutory_schedule(),
            1,
        );
        prop_assert!(result.worksheet.line_seven >= Decimal::ZERO);
        prop_assert_eq!(
            result.worksheet.worksheet_c.is_some(),
            result.worksheet.income_available_for_support <= Decimal::ZERO
        );
    }

    #[test]
    fn every_ratio_in_range_has_a_band(hundredths_of_bp in 0i64..=1_000_000) {
        let ratio = Decimal::new(hundredths_of_bp, 6);
        let band = select_band(
            ratio,
            &statutory_schedule().minimum_support_bands,
            BandOverflowPolicy::ZeroMultiplier,
        );
        prop_assert!(band.is_some());
    }

    #[test]
    fn child_count_rows_clamp(requested in 0u32..100) {
        let schedule = statutory_schedule();
        let count = ChildCount::new(requested);
        let expected_row = requested.clamp(1, 8) as usize - 1;
        prop_assert_eq!(schedule.primary_allowance_for(count), schedule.primary_allowance[expected_row]);
        prop_assert_eq!(schedule.sola_factor_for(count), schedule.sola_factors[expected_row]);
    }

    #[test]
    fn round_to_unit_is_half_up(whole in -1_000_000i64..1_000_000, cents in 0i64..100) {
        let value = Decimal::new(whole * 100 + cents, 2);
        let expected = if cents >= 50 { whole + 1 } else { whole };
        prop_assert_eq!(round_to_unit(value), Decimal::from(expected));
    }

    #[test]
    fn round_to_cents_keeps_two_places(value in -1_000_000_000i64..1_000_000_000) {
        let rounded = round_to_cents(Decimal::new(value, 4));
        prop_assert_eq!(rounded.scale(), 2);
    }

    #[test]
    fn credit_requires_both_parents_above_threshold(other in 111u32..=365) {
        let schedule = statutory_schedule();
        prop_assert!(!qualifies_for_credit(&OvernightSplit::new(110, other), schedule));
        prop_assert!(qualifies_for_credit(&OvernightSplit::new(111, other), schedule));
        prop_assert!(!qualifies_for_credit(&OvernightSplit::new(other, 110), schedule));
    }

    #[test]
    fn calculation_is_idempotent(
        mother in 0u32..250_000,
        father in 0u32..250_000,
        splits in prop::collection::vec(split_strategy(), 0..4),
        children in 1u32..5,
    ) {
        let input = input(mother, father, children, splits);
        let first = calculate_guideline(&input, statutory_schedule());
        let second = calculate_guideline(&input, statutory_schedule());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn payer_and_transfer_agree(
        mother in 0u32..250_000,
        father in 0u32..250_000,
        splits in prop::collection::vec(split_strategy(), 1..4),
    ) {
        let children = splits.len() as u32;
        let result = calculate_guideline(&input(mother, father, children, splits), statutory_schedule());

        prop_assert!(result.total_monthly_transfer >= Decimal::ZERO);
        prop_assert_eq!(result.children.len() as u32, children);
        match result.payer {
            Payer::Neither => prop_assert!(result.total_monthly_transfer.is_zero()),
            Payer::Mother => prop_assert_eq!(
                result.total_monthly_transfer,
                result.mother_totals.monthly - result.father_totals.monthly
            ),
            Payer::Father => prop_assert_eq!(
                result.total_monthly_transfer,
                result.father_totals.monthly - result.mother_totals.monthly
            ),
        }
        for child in &result.children {
            // At most one parent owes for any child.
            prop_assert!(child.mother_annual.is_zero() || child.father_annual.is_zero());
            prop_assert!(child.mother_annual <= child.mother_base_obligation.max(Decimal::ZERO) + Decimal::new(1, 2));
        }
    }
}
