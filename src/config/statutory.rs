//! The embedded statutory schedule.
//!
//! These tables are compiled into the crate so a calculation never depends on
//! configuration files being present. `config/guideline/schedules/` carries
//! the same figures in YAML; a test keeps the two in step.

use std::sync::OnceLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{
    BandOverflowPolicy, GuidelineMetadata, GuidelineSchedule, MinimumSupportBand,
    SharedParentingConfig,
};

/// Annual personal allowance per parent.
pub const PERSONAL_ALLOWANCE: i64 = 20_345;

/// Overnights a parent must exceed for the shared-parenting credit.
pub const SHARED_PARENTING_THRESHOLD: u32 = 110;

/// Primary allowance for one through eight children.
///
/// Rows not yet checked against the published schedule.
const PRIMARY_ALLOWANCE: [i64; 8] = [8_213, 12_148, 14_410, 16_118, 17_610, 18_978, 20_261, 21_478];

/// SOLA factor, in thousandths, for one through eight children.
///
/// Rows not yet checked against the published schedule.
const SOLA_FACTORS_MILLIS: [i64; 8] = [160, 230, 270, 300, 320, 340, 360, 380];

/// Upper bound of each Worksheet C band, in hundredths. Band `i` owes `i`
/// percent of income after deductions.
const BAND_UPPER_BOUNDS: [i64; 12] = [25, 31, 38, 45, 52, 59, 66, 73, 80, 87, 94, 100];

static STATUTORY: OnceLock<GuidelineSchedule> = OnceLock::new();

/// Returns the process-wide statutory schedule, building it on first use.
///
/// # Example
///
/// ```
/// use guideline_engine::config::statutory_schedule;
/// use rust_decimal::Decimal;
///
/// assert_eq!(statutory_schedule().personal_allowance, Decimal::from(20345));
/// ```
pub fn statutory_schedule() -> &'static GuidelineSchedule {
    STATUTORY.get_or_init(GuidelineSchedule::statutory)
}

impl GuidelineSchedule {
    /// Builds the statutory schedule.
    pub fn statutory() -> Self {
        let mut lower = Decimal::ZERO;
        let minimum_support_bands = BAND_UPPER_BOUNDS
            .iter()
            .enumerate()
            .map(|(i, upper)| {
                let max = Decimal::new(*upper, 2);
                let band = MinimumSupportBand {
                    min: lower,
                    max,
                    multiplier: Decimal::new(i as i64, 2),
                };
                lower = max;
                band
            })
            .collect();

        Self {
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
            personal_allowance: Decimal::from(PERSONAL_ALLOWANCE),
            minimum_floor_rate: Decimal::new(12, 2),
            primary_allowance: PRIMARY_ALLOWANCE.iter().map(|a| Decimal::from(*a)).collect(),
            sola_factors: SOLA_FACTORS_MILLIS
                .iter()
                .map(|f| Decimal::new(*f, 3))
                .collect(),
            minimum_support_bands,
            band_overflow: BandOverflowPolicy::ClampToBoundary,
            shared_parenting: SharedParentingConfig {
                overnight_threshold: SHARED_PARENTING_THRESHOLD,
                credit_factor: Decimal::new(69, 4),
            },
        }
    }
}

impl GuidelineMetadata {
    /// Metadata describing the embedded schedule.
    pub fn statutory() -> Self {
        Self {
            jurisdiction: "state".to_string(),
            name: "Child Support Guideline".to_string(),
            version: "2024-01-01".to_string(),
            source_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChildCount;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_primary_allowance_rows() {
        let schedule = statutory_schedule();
        let expected = [
            "8213", "12148", "14410", "16118", "17610", "18978", "20261", "21478",
        ];
        for (i, value) in expected.iter().enumerate() {
            let count = ChildCount::new(i as u32 + 1);
            assert_eq!(schedule.primary_allowance_for(count), dec(value));
        }
    }

    #[test]
    fn test_sola_factor_rows() {
        let schedule = statutory_schedule();
        let expected = [
            "0.16", "0.23", "0.27", "0.30", "0.32", "0.34", "0.36", "0.38",
        ];
        for (i, value) in expected.iter().enumerate() {
            let count = ChildCount::new(i as u32 + 1);
            assert_eq!(schedule.sola_factor_for(count), dec(value));
        }
    }

    #[test]
    fn test_counts_outside_range_use_boundary_rows() {
        let schedule = statutory_schedule();
        assert_eq!(
            schedule.primary_allowance_for(ChildCount::new(0)),
            schedule.primary_allowance_for(ChildCount::new(1))
        );
        assert_eq!(
            schedule.sola_factor_for(ChildCount::new(15)),
            schedule.sola_factor_for(ChildCount::new(8))
        );
    }

    #[test]
    fn test_band_table_has_twelve_contiguous_bands() {
        let bands = &statutory_schedule().minimum_support_bands;
        assert_eq!(bands.len(), 12);
        assert_eq!(bands[0].min, Decimal::ZERO);
        assert_eq!(bands[0].max, dec("0.25"));
        assert_eq!(bands[0].multiplier, Decimal::ZERO);
        assert_eq!(bands[1].min, dec("0.25"));
        assert_eq!(bands[1].multiplier, dec("0.01"));
        assert_eq!(bands[11].min, dec("0.94"));
        assert_eq!(bands[11].max, Decimal::ONE);
        assert_eq!(bands[11].multiplier, dec("0.11"));
    }

    #[test]
    fn test_statutory_constants() {
        let schedule = statutory_schedule();
        assert_eq!(schedule.personal_allowance, dec("20345"));
        assert_eq!(schedule.minimum_floor_rate, dec("0.12"));
        assert_eq!(schedule.shared_parenting.overnight_threshold, 110);
        assert_eq!(schedule.shared_parenting.credit_factor, dec("0.0069"));
        assert_eq!(
            schedule.effective_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_statutory_schedule_is_shared() {
        assert!(std::ptr::eq(statutory_schedule(), statutory_schedule()));
    }
}
