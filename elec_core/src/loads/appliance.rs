//! Household cooking appliances for the range demand calculation.
//!
//! Input rows (`{kind, kw, qty}`) are expanded into one [`ApplianceRating`]
//! per physical appliance before any note is considered. Classification is
//! then a matter of filtering a flat list.

use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, CalcError, CalcResult};

/// Largest nameplate rating Table 220.55 covers (kW).
pub const MAX_RATING_KW: f64 = 27.0;
/// Ratings at or below this are outside Columns A/B (kW).
pub const SMALL_LOWER_KW: f64 = 1.75;
/// Column A / Column B split (kW). Column A is strictly below.
pub const COLUMN_A_UPPER_KW: f64 = 3.5;
/// Small / large split (kW). Large is strictly above.
pub const SMALL_UPPER_KW: f64 = 8.75;
/// Column C reference rating used by Notes 1 and 2 (kW).
pub const NOTE_REFERENCE_KW: f64 = 12.0;

/// Cooking appliance category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ApplianceKind {
    /// Free-standing household range
    #[default]
    Range,
    /// Wall-mounted oven
    #[serde(alias = "Wall Oven")]
    WallOven,
    /// Counter-mounted cooking unit
    Cooktop,
}

impl ApplianceKind {
    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ApplianceKind::Range => "Range",
            ApplianceKind::WallOven => "Wall Oven",
            ApplianceKind::Cooktop => "Cooktop",
        }
    }
}

impl std::fmt::Display for ApplianceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One input row: `qty` appliances of the same kind and rating.
///
/// ## JSON Example
///
/// ```json
/// { "kind": "Cooktop", "kw": 6.5, "qty": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplianceRow {
    pub kind: ApplianceKind,
    /// Nameplate rating per appliance (kW)
    pub kw: f64,
    pub qty: u32,
}

impl ApplianceRow {
    pub fn new(kind: ApplianceKind, kw: f64, qty: u32) -> Self {
        ApplianceRow { kind, kw, qty }
    }
}

/// A single appliance after quantity expansion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplianceRating {
    pub kind: ApplianceKind,
    pub kw: f64,
}

impl ApplianceRating {
    pub fn new(kind: ApplianceKind, kw: f64) -> Self {
        ApplianceRating { kind, kw }
    }

    /// 1.75 kW < rating ≤ 8.75 kW
    pub fn is_small(&self) -> bool {
        self.kw > SMALL_LOWER_KW && self.kw <= SMALL_UPPER_KW
    }

    /// rating > 8.75 kW
    pub fn is_large(&self) -> bool {
        self.kw > SMALL_UPPER_KW
    }

    /// Small and below 3.5 kW
    pub fn in_column_a(&self) -> bool {
        self.is_small() && self.kw < COLUMN_A_UPPER_KW
    }

    /// Small and 3.5 kW or more
    pub fn in_column_b(&self) -> bool {
        self.is_small() && self.kw >= COLUMN_A_UPPER_KW
    }
}

/// Expand rows into individual appliances, validating each rating.
///
/// Fails when the expansion is empty or any rating is non-finite, ≤ 0 or
/// above 27 kW. Rows with `qty == 0` contribute nothing and are not checked.
pub fn expand(rows: &[ApplianceRow]) -> CalcResult<Vec<ApplianceRating>> {
    let mut expanded = Vec::with_capacity(rows.iter().map(|r| r.qty as usize).sum());
    for (i, row) in rows.iter().enumerate() {
        if row.qty == 0 {
            continue;
        }
        let field = format!("appliances[{}].kw", i);
        let kw = require_finite(&field, row.kw)?;
        if kw <= 0.0 {
            return Err(CalcError::invalid_input(field, kw.to_string(), "Rating must be positive"));
        }
        if kw > MAX_RATING_KW {
            return Err(CalcError::invalid_input(
                field,
                kw.to_string(),
                "Rating exceeds 27 kW, outside Table 220.55",
            ));
        }
        expanded.extend((0..row.qty).map(|_| ApplianceRating::new(row.kind, kw)));
    }
    if expanded.is_empty() {
        return Err(CalcError::invalid_input(
            "appliances",
            "0",
            "No appliances with quantity > 0",
        ));
    }
    Ok(expanded)
}

/// Sum of ratings in kW.
pub fn total_kw(appliances: &[ApplianceRating]) -> f64 {
    appliances.iter().map(|a| a.kw).sum()
}
