//! Configuration loading and management for the inspection planner.
//!
//! This module provides functionality to load planner configurations from
//! YAML files: the planner settings and the public holiday calendar.
//!
//! # Example
//!
//! ```no_run
//! use inspection_planner::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded {} holidays", config.holidays().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{HolidaysConfig, PlannerConfig, PlannerSettings};
