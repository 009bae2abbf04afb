//! Configuration types for the guideline schedules.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML schedule files, and the validation that every schedule must pass
//! before the calculation pipeline will read it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ChildCount, MAX_CHILDREN};

/// Metadata about the guideline the schedules implement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineMetadata {
    /// Jurisdiction whose guideline this is.
    pub jurisdiction: String,
    /// Human-readable name of the guideline.
    pub name: String,
    /// Version label of the published guideline.
    pub version: String,
    /// URL to the official guideline documentation, if published online.
    #[serde(default)]
    pub source_url: Option<String>,
}

/// What Worksheet C does with a ratio that falls outside every band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandOverflowPolicy {
    /// Use the nearest boundary band: the first band below the range, the
    /// last band above it.
    #[default]
    ClampToBoundary,
    /// Leave the multiplier at zero.
    ZeroMultiplier,
}

/// One row of the Worksheet C minimum-support table.
///
/// A band contains ratios in `[min, max]`; the first matching band wins, so
/// a ratio on a shared boundary belongs to the lower band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumSupportBand {
    /// Lower bound of the ratio.
    pub min: Decimal,
    /// Upper bound of the ratio.
    pub max: Decimal,
    /// Percentage of income after deductions owed as minimum support.
    pub multiplier: Decimal,
}

impl MinimumSupportBand {
    /// Returns true if the ratio lies within the band, bounds inclusive.
    pub fn contains(&self, ratio: Decimal) -> bool {
        ratio >= self.min && ratio <= self.max
    }
}

/// Worksheet B parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedParentingConfig {
    /// Both parents must have strictly more overnights than this for the
    /// shared-parenting credit to apply.
    pub overnight_threshold: u32,
    /// Credit per overnight above the threshold, as a fraction of the base
    /// obligation.
    pub credit_factor: Decimal,
}

/// A complete set of statutory tables effective from a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineSchedule {
    /// The date from which these tables apply.
    pub effective_date: NaiveDate,
    /// Annual personal allowance exempted from each parent's income.
    pub personal_allowance: Decimal,
    /// Fraction of income after deductions used as the minimum floor.
    pub minimum_floor_rate: Decimal,
    /// Primary allowance by number of children, one to eight.
    pub primary_allowance: Vec<Decimal>,
    /// SOLA factor by number of children, one to eight.
    pub sola_factors: Vec<Decimal>,
    /// Worksheet C bands in ascending order covering ratios 0 to 1.
    pub minimum_support_bands: Vec<MinimumSupportBand>,
    /// Handling of ratios outside the band table.
    #[serde(default)]
    pub band_overflow: BandOverflowPolicy,
    /// Worksheet B parameters.
    pub shared_parenting: SharedParentingConfig,
}

impl GuidelineSchedule {
    /// Returns the primary allowance for the (already clamped) child count.
    pub fn primary_allowance_for(&self, children: ChildCount) -> Decimal {
        lookup(&self.primary_allowance, children)
    }

    /// Returns the SOLA factor for the (already clamped) child count.
    pub fn sola_factor_for(&self, children: ChildCount) -> Decimal {
        lookup(&self.sola_factors, children)
    }

    /// Checks the tables for internal consistency.
    ///
    /// A valid schedule has eight rows in each per-child table and a band
    /// table that starts at 0, ends at 1 and has no gaps or overlaps.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidSchedule {
            effective_date: self.effective_date,
            message,
        };
        let rows = MAX_CHILDREN as usize;

        if self.primary_allowance.len() != rows {
            return Err(invalid(format!(
                "expected {} primary allowance rows, found {}",
                rows,
                self.primary_allowance.len()
            )));
        }
        if self.sola_factors.len() != rows {
            return Err(invalid(format!(
                "expected {} SOLA factor rows, found {}",
                rows,
                self.sola_factors.len()
            )));
        }
        if self.personal_allowance < Decimal::ZERO {
            return Err(invalid("personal allowance is negative".to_string()));
        }
        if self.minimum_floor_rate < Decimal::ZERO || self.minimum_floor_rate > Decimal::ONE {
            return Err(invalid(format!(
                "minimum floor rate {} is outside 0..1",
                self.minimum_floor_rate
            )));
        }
        if self.shared_parenting.credit_factor < Decimal::ZERO {
            return Err(invalid("shared-parenting credit factor is negative".to_string()));
        }

        let (first, last) = match (
            self.minimum_support_bands.first(),
            self.minimum_support_bands.last(),
        ) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(invalid("minimum support band table is empty".to_string())),
        };
        if first.min != Decimal::ZERO {
            return Err(invalid(format!("first band starts at {}, not 0", first.min)));
        }
        if last.max != Decimal::ONE {
            return Err(invalid(format!("last band ends at {}, not 1", last.max)));
        }
        for (i, band) in self.minimum_support_bands.iter().enumerate() {
            if band.min >= band.max {
                return Err(invalid(format!(
                    "band {} has min {} not below max {}",
                    i + 1,
                    band.min,
                    band.max
                )));
            }
        }
        for (i, pair) in self.minimum_support_bands.windows(2).enumerate() {
            if pair[0].max != pair[1].min {
                return Err(invalid(format!(
                    "bands {} and {} are not contiguous ({} vs {})",
                    i + 1,
                    i + 2,
                    pair[0].max,
                    pair[1].min
                )));
            }
        }

        Ok(())
    }
}

fn lookup(table: &[Decimal], children: ChildCount) -> Decimal {
    // Validated schedules always have a row per count; fall back to the last
    // row for hand-built ones that don't.
    table
        .get(children.table_index())
        .or_else(|| table.last())
        .copied()
        .unwrap_or(Decimal::ZERO)
}

/// The complete guideline configuration: metadata plus every schedule.
#[derive(Debug, Clone)]
pub struct GuidelineConfig {
    metadata: GuidelineMetadata,
    /// Schedules by effective date, oldest first.
    schedules: Vec<GuidelineSchedule>,
}

impl GuidelineConfig {
    /// Creates a configuration, sorting the schedules by effective date.
    pub fn new(metadata: GuidelineMetadata, schedules: Vec<GuidelineSchedule>) -> Self {
        let mut sorted = schedules;
        sorted.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            schedules: sorted,
        }
    }

    /// Returns the guideline metadata.
    pub fn metadata(&self) -> &GuidelineMetadata {
        &self.metadata
    }

    /// Returns all schedules, oldest first.
    pub fn schedules(&self) -> &[GuidelineSchedule] {
        &self.schedules
    }

    /// Returns the most recent schedule effective on or before `date`.
    pub fn schedule_for(&self, date: NaiveDate) -> EngineResult<&GuidelineSchedule> {
        self.schedules
            .iter()
            .rfind(|s| s.effective_date <= date)
            .ok_or(EngineError::ScheduleNotFound { date })
    }

    /// Returns the most recent schedule.
    pub fn latest_schedule(&self) -> Option<&GuidelineSchedule> {
        self.schedules.last()
    }
}
