//! Rounding configuration for the Attendance & Payroll Calculation Engine.
//!
//! Clients bill attendance in fixed minute units with a per-client rounding
//! mode. This module provides the policy value objects and the YAML loader
//! for the per-client policy table.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::RoundingConfig;
//!
//! let config = RoundingConfig::load("./config/clients.yaml").unwrap();
//! let policy = config.policy_for(Some("client-acme"));
//! println!("unit: {} minutes", policy.unit_minutes);
//! ```

mod loader;
mod rounding;

pub use loader::RoundingConfig;
pub use rounding::{RoundingMode, RoundingPolicy};
