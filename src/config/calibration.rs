//! SpO2 calibration table.
//!
//! Empirical ratio-of-ratios to SpO2 mapping for the sensor's optical path,
//! indexed by the fixed-point ratio (`RATIO_SCALE` = 20). The curve rises to
//! 100 % around ratio 24..43 and then declines. The last slot is zero and is
//! never reachable through [`spo2_for_ratio`].
//!
//! The table must stay bit-exact. Do not regenerate it from the quadratic fit.

/// Number of slots in the SpO2 table.
pub const SPO2_TABLE_SIZE: usize = 184;

/// Ratios at or below this value are rejected.
pub const RATIO_MIN_EXCLUSIVE: i32 = 2;

/// SpO2 percentage per fixed-point ratio.
#[rustfmt::skip]
pub const SPO2_TABLE: [u8; SPO2_TABLE_SIZE] = [
    95, 95, 95, 96, 96, 96, 97, 97, 97, 97, 97, 98, 98, 98, 98, 98, 99, 99,
    99, 99, 99, 99, 99, 99, 100, 100, 100, 100, 100, 100, 100, 100, 100, 100,
    100, 100, 100, 100, 100, 100, 100, 100, 100, 100, 99, 99, 99, 99, 99, 99,
    99, 99, 98, 98, 98, 98, 98, 98, 97, 97, 97, 97, 96, 96, 96, 96, 95, 95,
    95, 94, 94, 94, 93, 93, 93, 92, 92, 92, 91, 91, 90, 90, 89, 89, 89, 88,
    88, 87, 87, 86, 86, 85, 85, 84, 84, 83, 82, 82, 81, 81, 80, 80, 79, 78,
    78, 77, 76, 76, 75, 74, 74, 73, 72, 72, 71, 70, 69, 69, 68, 67, 66, 66,
    65, 64, 63, 62, 62, 61, 60, 59, 58, 57, 56, 56, 55, 54, 53, 52, 51, 50,
    49, 48, 47, 46, 45, 44, 43, 42, 41, 40, 39, 38, 37, 36, 35, 34, 33, 31,
    30, 29, 28, 27, 26, 25, 23, 22, 21, 20, 19, 17, 16, 15, 14, 12, 11, 10,
    9, 7, 6, 5, 3, 2, 1, 0,
];

// Every reachable slot must be a percentage in 1..=100.
const _: () = {
    let mut i = (RATIO_MIN_EXCLUSIVE + 1) as usize;
    while i < SPO2_TABLE_SIZE - 1 {
        assert!(SPO2_TABLE[i] >= 1 && SPO2_TABLE[i] <= 100);
        i += 1;
    }
};

/// Look up the SpO2 percentage for a fixed-point ratio.
///
/// Returns `None` unless `RATIO_MIN_EXCLUSIVE < ratio < SPO2_TABLE_SIZE - 1`.
#[inline]
pub fn spo2_for_ratio(ratio: i32) -> Option<u8> {
    if ratio > RATIO_MIN_EXCLUSIVE && ratio < (SPO2_TABLE_SIZE - 1) as i32 {
        Some(SPO2_TABLE[ratio as usize])
    } else {
        None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
