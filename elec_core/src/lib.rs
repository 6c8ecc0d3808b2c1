//! # elec_core - Electrical Load Calculation Engine
//!
//! `elec_core` is the computational heart of Loadline: dwelling service
//! demand, cooking appliance demand and circuit voltage drop, driven by
//! transcribed NEC tables. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions from an input record to a new result record
//! - **Deterministic**: the same input always gives the same output
//! - **Traceable**: every demand result lists the rules that fired
//! - **Rich Errors**: structured error types, not just strings
//!
//! The engines are a design aid. They do not certify code compliance.
//!
//! ## Quick Start
//!
//! ```rust
//! use elec_core::calculations::range::{calculate, RangeInput};
//! use elec_core::loads::{ApplianceKind, ApplianceRow};
//!
//! let input = RangeInput {
//!     label: "Cooktop".to_string(),
//!     appliances: vec![ApplianceRow::new(ApplianceKind::Cooktop, 6.5, 1)],
//!     voltage: 230.0,
//!     policy: Default::default(),
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.display_amps(), 28.26);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The range, residential and voltage drop engines
//! - [`tables`] - NEC lookup tables
//! - [`breaker`] - Standard breaker sizing
//! - [`loads`] - Load items and cooking appliances
//! - [`trace`] - Rule annotations attached to results
//! - [`report`] - Report projection data
//! - [`project`] - Project container
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod breaker;
pub mod calculations;
pub mod errors;
pub mod loads;
pub mod numeric;
pub mod project;
pub mod report;
pub mod tables;
pub mod trace;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use breaker::{suggest_breaker, BreakerRating};
pub use calculations::{CalculationItem, CalculationOutput, DemandResult, VoltageDropResult};
pub use errors::{CalcError, CalcResult};
pub use project::{Project, ProjectMetadata, ProjectSettings};
pub use report::LoadReport;
pub use trace::{Rule, RuleTrace};
