//! Worksheet C: minimum support for low-income parents.
//!
//! When a parent has no income above the personal allowance, their minimum
//! floor comes from a band table keyed on the ratio of income after
//! deductions to the personal allowance.

use rust_decimal::Decimal;

use crate::config::{BandOverflowPolicy, GuidelineSchedule, MinimumSupportBand};
use crate::models::{AuditStep, Parent, WorksheetCResult};

use super::rounding::round_to_unit;

/// Ratio used when the personal allowance is zero.
///
/// Dividing by a zero allowance is undefined; the worksheet treats the
/// parent as having no income relative to the allowance.
pub fn zero_allowance_ratio() -> Decimal {
    Decimal::ZERO
}

/// The result of a Worksheet C calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct MinimumSupportCalculation {
    /// The completed worksheet.
    pub worksheet: WorksheetCResult,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns income after deductions divided by the personal allowance.
pub fn income_ratio(income_after_deductions: Decimal, personal_allowance: Decimal) -> Decimal {
    if personal_allowance.is_zero() {
        return zero_allowance_ratio();
    }
    income_after_deductions
        .checked_div(personal_allowance)
        .unwrap_or_else(zero_allowance_ratio)
}

/// Selects the band for `ratio`.
///
/// Returns the one-based band number and the band, or `None` when the ratio
/// lies outside every band and the policy is [`BandOverflowPolicy::ZeroMultiplier`].
pub fn select_band(
    ratio: Decimal,
    bands: &[MinimumSupportBand],
    policy: BandOverflowPolicy,
) -> Option<(u8, &MinimumSupportBand)> {
    if let Some(index) = bands.iter().position(|b| b.contains(ratio)) {
        return Some((band_number(index), &bands[index]));
    }

    match policy {
        BandOverflowPolicy::ZeroMultiplier => None,
        BandOverflowPolicy::ClampToBoundary => {
            let first = bands.first()?;
            if ratio < first.min {
                Some((1, first))
            } else {
                bands.last().map(|last| (band_number(bands.len() - 1), last))
            }
        }
    }
}

fn band_number(index: usize) -> u8 {
    u8::try_from(index + 1).unwrap_or(u8::MAX)
}

/// Calculates Worksheet C for one parent.
///
/// # Examples
///
/// ```
/// use guideline_engine::calculation::calculate_worksheet_c;
/// use guideline_engine::config::statutory_schedule;
/// use guideline_engine::models::Parent;
/// use rust_decimal::Decimal;
///
/// // 10000 / 20345 = 0.49 falls in the 4% band.
/// let result = calculate_worksheet_c(
///     Parent::Father,
///     Decimal::from(10000),
///     Decimal::from(20345),
///     statutory_schedule(),
///     1,
/// );
/// assert_eq!(result.worksheet.band, Some(5));
/// assert_eq!(result.worksheet.minimum_support, Decimal::from(400));
/// ```
pub fn calculate_worksheet_c(
    parent: Parent,
    income_after_deductions: Decimal,
    personal_allowance: Decimal,
    schedule: &GuidelineSchedule,
    step_number: u32,
) -> MinimumSupportCalculation {
    let ratio = income_ratio(income_after_deductions, personal_allowance);
    let selected = select_band(ratio, &schedule.minimum_support_bands, schedule.band_overflow);
    let band = selected.map(|(number, _)| number);
    let multiplier = selected
        .map(|(_, band)| band.multiplier)
        .unwrap_or(Decimal::ZERO);
    let minimum_support = round_to_unit(income_after_deductions * multiplier);

    let reasoning = match selected {
        Some((number, found)) => format!(
            "Ratio {} falls in band {} ({} to {}); {} x {} = {}",
            ratio.round_dp(4),
            number,
            found.min,
            found.max,
            income_after_deductions,
            multiplier,
            minimum_support
        ),
        None => format!(
            "Ratio {} is outside every band; multiplier left at 0",
            ratio.round_dp(4)
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "worksheet_c_minimum_support".to_string(),
        rule_name: "Minimum Support Band".to_string(),
        worksheet_ref: "Worksheet C, lines 1-5".to_string(),
        input: serde_json::json!({
            "parent": parent.as_str(),
            "income_after_deductions": income_after_deductions.to_string(),
            "personal_allowance": personal_allowance.to_string(),
        }),
        output: serde_json::json!({
            "ratio": ratio.round_dp(4).to_string(),
            "band": band,
            "multiplier": multiplier.to_string(),
            "minimum_support": minimum_support.to_string(),
        }),
        reasoning,
    };

    MinimumSupportCalculation {
        worksheet: WorksheetCResult {
            income_after_deductions,
            personal_allowance,
            ratio,
            band,
            multiplier,
            minimum_support,
        },
        audit_step,
    }
}
