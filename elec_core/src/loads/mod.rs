//! Load inputs for the demand engines.
//!
//! - [`LoadItem`] - a VA-rated line item with quantity and multiplier
//! - [`LoadCategory`] - report grouping for load lines
//! - [`ApplianceRow`] / [`ApplianceRating`] - cooking appliances before and
//!   after quantity expansion

pub mod appliance;
pub mod load_item;

pub use appliance::{expand, ApplianceKind, ApplianceRating, ApplianceRow};
pub use load_item::{total_effective_va, validate_group, LoadCategory, LoadItem};
