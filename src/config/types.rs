//! Configuration types for the inspection planner.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::{CONTROLLER_ROLE, Holiday};

fn default_controller_role() -> String {
    CONTROLLER_ROLE.to_string()
}

/// Settings read from `planner.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlannerSettings {
    /// A label for this configuration (e.g., the administration it serves).
    pub name: String,
    /// Role tag a user must carry to receive inspections.
    #[serde(default = "default_controller_role")]
    pub controller_role: String,
    /// Fixed seed for reproducible runs; absent means a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            controller_role: default_controller_role(),
            seed: None,
        }
    }
}

/// Holiday file structure (`holidays/<year>.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysConfig {
    /// The holidays listed in the file.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// The complete planner configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct PlannerConfig {
    /// Planner settings.
    settings: PlannerSettings,
    /// Holidays from every holiday file, sorted by date, one per date.
    holidays: Vec<Holiday>,
}

impl PlannerConfig {
    /// Creates a PlannerConfig from its component parts.
    ///
    /// Holidays are sorted by date; when several share a date, the first one
    /// listed is kept.
    pub fn new(settings: PlannerSettings, holidays: Vec<Holiday>) -> Self {
        let mut sorted_holidays = holidays;
        sorted_holidays.sort_by(|a, b| a.date.cmp(&b.date));
        sorted_holidays.dedup_by(|later, earlier| later.date == earlier.date);
        Self {
            settings,
            holidays: sorted_holidays,
        }
    }

    /// Returns the planner settings.
    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Returns the configured holidays.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Returns a copy of this configuration with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.settings.seed = Some(seed);
        self
    }
}
