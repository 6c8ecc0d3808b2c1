//! NEC Table 220.55 demand columns for household cooking appliances.
//!
//! | Column | Applies to                      | Value per count |
//! |--------|---------------------------------|-----------------|
//! | A      | 1.75 kW < rating < 3.5 kW       | demand factor   |
//! | B      | 3.5 kW ≤ rating ≤ 8.75 kW       | demand factor   |
//! | C      | rating > 8.75 kW (up to 12 kW)  | maximum demand (kW) |
//!
//! Counts 1-25 are tabulated. Above 25 each column uses a fixed band or
//! closed form:
//!
//! ```text
//! Column A: n >= 26           -> 0.30
//! Column B: 26-30 -> 0.24, 31-40 -> 0.22, 41-50 -> 0.20, 51-60 -> 0.18, >= 61 -> 0.16
//! Column C: 26-40 -> 15 + n,  >= 41 -> 25 + 0.75 n
//! ```
//!
//! A count of zero yields 0 so an empty subset contributes nothing.

/// Highest appliance count with a tabulated row.
pub const TABULATED_COUNT: u32 = 25;

/// Column A demand factors, index = count - 1
const COLUMN_A_FACTORS: [f64; 25] = [
    0.80, 0.75, 0.70, 0.66, 0.62, 0.59, 0.56, 0.53, 0.51, 0.49, //
    0.47, 0.45, 0.43, 0.41, 0.40, 0.39, 0.38, 0.37, 0.36, 0.35, //
    0.34, 0.33, 0.32, 0.31, 0.30,
];

/// Column B demand factors, index = count - 1
const COLUMN_B_FACTORS: [f64; 25] = [
    0.80, 0.65, 0.55, 0.50, 0.45, 0.43, 0.40, 0.36, 0.35, 0.34, //
    0.32, 0.32, 0.32, 0.32, 0.32, 0.28, 0.28, 0.28, 0.28, 0.28, //
    0.26, 0.26, 0.26, 0.26, 0.26,
];

/// Column C maximum demand in kW, index = count - 1
const COLUMN_C_KW: [f64; 25] = [
    8.0, 11.0, 14.0, 17.0, 20.0, 21.0, 22.0, 23.0, 24.0, 25.0, //
    26.0, 27.0, 28.0, 29.0, 30.0, 31.0, 32.0, 33.0, 34.0, 35.0, //
    36.0, 37.0, 38.0, 39.0, 40.0,
];

fn tabulated(table: &[f64; 25], count: u32) -> Option<f64> {
    if count == 0 || count > TABULATED_COUNT {
        return None;
    }
    Some(table[(count - 1) as usize])
}

/// Column A demand factor for `count` appliances.
pub fn column_a_factor(count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    tabulated(&COLUMN_A_FACTORS, count).unwrap_or(0.30)
}

/// Column B demand factor for `count` appliances.
pub fn column_b_factor(count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    if let Some(factor) = tabulated(&COLUMN_B_FACTORS, count) {
        return factor;
    }
    match count {
        26..=30 => 0.24,
        31..=40 => 0.22,
        41..=50 => 0.20,
        51..=60 => 0.18,
        _ => 0.16,
    }
}

/// Column C maximum demand in kW for `count` appliances.
pub fn column_c_base_kw(count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    if let Some(kw) = tabulated(&COLUMN_C_KW, count) {
        return kw;
    }
    let n = f64::from(count);
    if count <= 40 {
        15.0 + n
    } else {
        25.0 + 0.75 * n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_count() {
        assert_eq!(column_a_factor(0), 0.0);
        assert_eq!(column_b_factor(0), 0.0);
        assert_eq!(column_c_base_kw(0), 0.0);
    }

    #[test]
    fn test_tabulated_rows() {
        assert_eq!(column_a_factor(1), 0.80);
        assert_eq!(column_a_factor(4), 0.66);
        assert_eq!(column_a_factor(25), 0.30);
        assert_eq!(column_b_factor(1), 0.80);
        assert_eq!(column_b_factor(2), 0.65);
        assert_eq!(column_b_factor(15), 0.32);
        assert_eq!(column_b_factor(16), 0.28);
        assert_eq!(column_b_factor(25), 0.26);
        assert_eq!(column_c_base_kw(1), 8.0);
        assert_eq!(column_c_base_kw(4), 17.0);
        assert_eq!(column_c_base_kw(25), 40.0);
    }

    #[test]
    fn test_column_a_fallback() {
        assert_eq!(column_a_factor(26), 0.30);
        assert_eq!(column_a_factor(100), 0.30);
    }

    #[test]
    fn test_column_b_band_boundaries() {
        assert_eq!(column_b_factor(25), 0.26);
        assert_eq!(column_b_factor(26), 0.24);
        assert_eq!(column_b_factor(30), 0.24);
        assert_eq!(column_b_factor(31), 0.22);
        assert_eq!(column_b_factor(40), 0.22);
        assert_eq!(column_b_factor(41), 0.20);
        assert_eq!(column_b_factor(50), 0.20);
        assert_eq!(column_b_factor(51), 0.18);
        assert_eq!(column_b_factor(60), 0.18);
        assert_eq!(column_b_factor(61), 0.16);
        assert_eq!(column_b_factor(500), 0.16);
    }

    #[test]
    fn test_column_c_extrapolation_boundaries() {
        assert_eq!(column_c_base_kw(25), 40.0);
        assert_eq!(column_c_base_kw(26), 41.0);
        assert_eq!(column_c_base_kw(40), 55.0);
        assert_eq!(column_c_base_kw(41), 55.75);
        assert_eq!(column_c_base_kw(60), 70.0);
    }

    #[test]
    fn test_factors_in_unit_interval() {
        for n in 1..200 {
            let a = column_a_factor(n);
            let b = column_b_factor(n);
            assert!(a > 0.0 && a <= 1.0, "Column A factor out of range at {}", n);
            assert!(b > 0.0 && b <= 1.0, "Column B factor out of range at {}", n);
        }
    }

    #[test]
    fn test_column_c_non_decreasing() {
        let mut previous = 0.0;
        for n in 1..200 {
            let kw = column_c_base_kw(n);
            assert!(kw >= previous, "Column C decreased at {}", n);
            previous = kw;
        }
    }
}
