// Number of fractional digits carried by the fast representation.
pub const PRECISION: u32 = 12;

// Multiplier turning a decimal value into its fixed-point encoding: 10^PRECISION.
pub const SCALE: i64 = 1_000_000_000_000;

// Half of the fractional digits. Fraction * fraction products are split on this boundary so the
// partial products always fit in 64 bits.
pub const HALF_SCALE: i64 = 1_000_000;

// Largest and smallest integer values that can be represented inline (truncating division).
pub const MAX_INT: i64 = i64::MAX / SCALE;
pub const MIN_INT: i64 = i64::MIN / SCALE;

// Bounds of the fixed-point encoding itself.
pub const MAX_FIXED: i64 = MAX_INT * SCALE;
pub const MIN_FIXED: i64 = MIN_INT * SCALE;

// Longest canonical rendering of a fast value: sign, 7 integer digits, point and 12 fractional digits.
pub const MAX_STR_BUFFER_SIZE: usize = 21;

// Number of integer digits in MAX_INT.
pub const MAX_INT_DIGITS: usize = 7;

// Fractional digits used when a division cannot be represented exactly.
pub const DEFAULT_DIVISION_PRECISION: u32 = 16;

// The small value cache covers [-CACHE_LIMIT, CACHE_LIMIT] in steps of CACHE_STEP (one cent).
pub const CACHE_LIMIT: i64 = 1000 * SCALE;
pub const CACHE_STEP: i64 = SCALE / 100;
pub const CACHE_ENTRIES: usize = (2 * CACHE_LIMIT / CACHE_STEP) as usize + 1;

// Fast access for 10^n where n is 0-18
pub const POWERS_10: [i64; 19] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_point_bounds() {
        assert_eq!(MAX_INT, 9_223_372);
        assert_eq!(MIN_INT, -9_223_372);
        assert_eq!(MAX_FIXED, 9_223_372_000_000_000_000);
        assert_eq!(MIN_FIXED, -MAX_FIXED);
        assert_eq!(POWERS_10[PRECISION as usize], SCALE);
        assert_eq!(CACHE_ENTRIES, 200_001);
    }
}
