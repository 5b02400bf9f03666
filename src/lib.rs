//! Inspection planner
//!
//! This crate assigns employers awaiting an inspection to the controllers of
//! their center, one date per employer, from today through December 31. The
//! schedule respects weekends, public holidays and controller leave, gives a
//! controller at most one inspection per ISO week, and spreads the load
//! evenly across controllers and weekdays.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod planning;
pub mod store;
