//! Guideline schedule configuration.
//!
//! A schedule is the set of statutory tables (personal allowance, primary
//! allowance, SOLA factors, minimum-support bands, shared-parenting
//! parameters) effective from a given date. The embedded statutory schedule
//! is always available; further schedules can be loaded from YAML.
//!
//! # Example
//!
//! ```no_run
//! use guideline_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/guideline").unwrap();
//! println!("Loaded guideline: {}", config.metadata().name);
//! ```

mod loader;
mod statutory;
mod types;

pub use loader::ConfigLoader;
pub use statutory::{PERSONAL_ALLOWANCE, SHARED_PARENTING_THRESHOLD, statutory_schedule};
pub use types::{
    BandOverflowPolicy, GuidelineConfig, GuidelineMetadata, GuidelineSchedule,
    MinimumSupportBand, SharedParentingConfig,
};
