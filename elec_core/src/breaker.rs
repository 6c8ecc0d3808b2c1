//! # Breaker Sizing
//!
//! Maps a current to the next standard overcurrent device rating.
//!
//! ```rust
//! use elec_core::breaker::{suggest_breaker, BreakerRating};
//!
//! assert_eq!(suggest_breaker(83.4), BreakerRating::Standard(90));
//! assert_eq!(suggest_breaker(100.0), BreakerRating::Standard(100));
//! assert_eq!(suggest_breaker(6000.5), BreakerRating::ExceedsTable);
//! assert_eq!(suggest_breaker(83.4).label(), "90 A");
//! ```

use serde::{Deserialize, Serialize};

use crate::tables::breaker_sizes::{largest_standard_rating, STANDARD_BREAKER_RATINGS_A};

/// Fraction of a breaker rating a continuous load may occupy.
pub const CONTINUOUS_LOAD_FRACTION: f64 = 0.8;

/// Outcome of a breaker lookup.
///
/// Ordered so that every standard rating sorts below `ExceedsTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BreakerRating {
    /// A standard rating in amperes
    Standard(u32),
    /// Current is above the largest tabulated rating
    ExceedsTable,
}

impl BreakerRating {
    /// Display label, e.g. "100 A" or "> 6000 A (special)"
    pub fn label(&self) -> String {
        match self {
            BreakerRating::Standard(amps) => format!("{} A", amps),
            BreakerRating::ExceedsTable => format!("> {} A (special)", largest_standard_rating()),
        }
    }

    /// Rating in amperes, `None` when beyond the table
    pub fn amps(&self) -> Option<u32> {
        match self {
            BreakerRating::Standard(amps) => Some(*amps),
            BreakerRating::ExceedsTable => None,
        }
    }
}

impl std::fmt::Display for BreakerRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Smallest standard rating at or above `amps`.
///
/// Non-finite currents are treated as beyond the table.
pub fn suggest_breaker(amps: f64) -> BreakerRating {
    if !amps.is_finite() {
        return BreakerRating::ExceedsTable;
    }
    STANDARD_BREAKER_RATINGS_A
        .iter()
        .find(|&&rating| f64::from(rating) >= amps)
        .map(|&rating| BreakerRating::Standard(rating))
        .unwrap_or(BreakerRating::ExceedsTable)
}

/// Current the breaker must carry when the load is continuous (amps / 0.8).
pub fn continuous_load_current(amps: f64) -> f64 {
    amps / CONTINUOUS_LOAD_FRACTION
}

/// Breaker for a continuous load: derate to 80%, then round up.
pub fn suggest_breaker_continuous(amps: f64) -> BreakerRating {
    suggest_breaker(continuous_load_current(amps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_ratings_map_to_themselves() {
        for rating in STANDARD_BREAKER_RATINGS_A {
            assert_eq!(suggest_breaker(f64::from(rating)), BreakerRating::Standard(rating));
        }
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(suggest_breaker(0.0), BreakerRating::Standard(6));
        assert_eq!(suggest_breaker(6.01), BreakerRating::Standard(10));
        assert_eq!(suggest_breaker(126.0), BreakerRating::Standard(150));
        assert_eq!(suggest_breaker(5999.0), BreakerRating::Standard(6000));
    }

    #[test]
    fn test_exceeds_table() {
        assert_eq!(suggest_breaker(6000.01), BreakerRating::ExceedsTable);
        assert_eq!(suggest_breaker(f64::INFINITY), BreakerRating::ExceedsTable);
        assert_eq!(BreakerRating::ExceedsTable.label(), "> 6000 A (special)");
        assert_eq!(BreakerRating::ExceedsTable.amps(), None);
    }

    #[test]
    fn test_continuous_derating() {
        // 80 A continuous -> 100 A required
        assert_eq!(suggest_breaker_continuous(80.0), BreakerRating::Standard(100));
        // 80.1 A -> 100.125 A -> 110 A
        assert_eq!(suggest_breaker_continuous(80.1), BreakerRating::Standard(110));
    }

    #[test]
    fn test_monotonic() {
        let mut previous = suggest_breaker(0.0);
        let mut amps = 0.0;
        while amps < 7000.0 {
            let current = suggest_breaker(amps);
            assert!(current >= previous, "breaker decreased at {} A", amps);
            previous = current;
            amps += 0.37;
        }
        assert!(BreakerRating::Standard(6000) < BreakerRating::ExceedsTable);
    }
}
