//! Standard ampere ratings for fuses and inverse-time circuit breakers,
//! NEC 240.6(A), ascending.

/// Standard ratings in amperes, ascending
pub const STANDARD_BREAKER_RATINGS_A: [u32; 40] = [
    6, 10, 15, 20, 25, 30, 35, 40, 45, 50, //
    60, 70, 80, 90, 100, 110, 125, 150, 175, 200, //
    225, 250, 300, 350, 400, 450, 500, 600, 700, 800, //
    900, 1000, 1200, 1600, 2000, 2500, 3000, 4000, 5000, 6000,
];

/// Largest tabulated rating
pub fn largest_standard_rating() -> u32 {
    STANDARD_BREAKER_RATINGS_A[STANDARD_BREAKER_RATINGS_A.len() - 1]
}
