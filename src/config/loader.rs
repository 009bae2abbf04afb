//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading guideline
//! schedules from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{GuidelineConfig, GuidelineMetadata, GuidelineSchedule};

/// Loads and provides access to guideline schedules.
///
/// # Directory Structure
///
/// ```text
/// config/guideline/
/// ├── guideline.yaml        # Guideline metadata
/// └── schedules/
///     └── 2024-01-01.yaml   # Tables effective from this date
/// ```
///
/// Every schedule is validated on load; a directory with an inconsistent
/// schedule fails to load rather than producing wrong obligations later.
///
/// # Example
///
/// ```no_run
/// use guideline_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/guideline").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let schedule = loader.schedule_for(date).unwrap();
/// println!("Personal allowance: ${}", schedule.personal_allowance);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: GuidelineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing, contains invalid
    /// YAML, or describes a schedule that fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<GuidelineMetadata>(&path.join("guideline.yaml"))?;
        let schedules = Self::load_schedules(&path.join("schedules"))?;

        for schedule in &schedules {
            schedule.validate()?;
        }

        info!(
            guideline = %metadata.name,
            version = %metadata.version,
            schedules = schedules.len(),
            "Loaded guideline configuration"
        );

        Ok(Self {
            config: GuidelineConfig::new(metadata, schedules),
        })
    }

    /// Creates a loader holding only the embedded statutory schedule.
    pub fn statutory() -> Self {
        Self {
            config: GuidelineConfig::new(
                GuidelineMetadata::statutory(),
                vec![GuidelineSchedule::statutory()],
            ),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all schedule files from the schedules directory.
    fn load_schedules(dir: &Path) -> EngineResult<Vec<GuidelineSchedule>> {
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut schedules = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                schedules.push(Self::load_yaml::<GuidelineSchedule>(&path)?);
            }
        }

        if schedules.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no schedule files found)", dir_str),
            });
        }

        Ok(schedules)
    }

    /// Returns the underlying guideline configuration.
    pub fn config(&self) -> &GuidelineConfig {
        &self.config
    }

    /// Returns the guideline metadata.
    pub fn metadata(&self) -> &GuidelineMetadata {
        self.config.metadata()
    }

    /// Returns the schedule effective on the given date.
    pub fn schedule_for(&self, date: NaiveDate) -> EngineResult<&GuidelineSchedule> {
        self.config.schedule_for(date)
    }

    /// Returns the schedule for `date`, or the latest schedule when no date is
    /// given.
    pub fn resolve_schedule(&self, date: Option<NaiveDate>) -> EngineResult<&GuidelineSchedule> {
        match date {
            Some(date) => self.schedule_for(date),
            None => self
                .config
                .latest_schedule()
                .ok_or_else(|| EngineError::ConfigNotFound {
                    path: "no guideline schedules loaded".to_string(),
                }),
        }
    }
}
