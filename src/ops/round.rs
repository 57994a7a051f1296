use crate::constants::{MAX_FIXED, MIN_FIXED, POWERS_10, PRECISION};
use crate::ops::CalculationResult;
use crate::RoundingStrategy;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use core::cmp::Ordering;

// Whether a quotient truncated toward zero has to move one unit away from zero.
//
// * `sign` - sign of the discarded remainder (which is also the sign of the value)
// * `half` - the discarded remainder compared to half a unit
// * `odd` - whether the truncated quotient is odd
#[inline]
fn increments(strategy: RoundingStrategy, sign: i64, half: Ordering, odd: bool) -> bool {
    if sign == 0 {
        return false;
    }
    match strategy {
        RoundingStrategy::MidpointNearestEven => half == Ordering::Greater || (half == Ordering::Equal && odd),
        RoundingStrategy::MidpointAwayFromZero => half != Ordering::Less,
        RoundingStrategy::MidpointTowardZero => half == Ordering::Greater,
        RoundingStrategy::ToZero => false,
        RoundingStrategy::AwayFromZero => true,
        RoundingStrategy::ToPositiveInfinity => sign > 0,
        RoundingStrategy::ToNegativeInfinity => sign < 0,
    }
}

pub(crate) fn round_impl(fixed: i64, places: u32, strategy: RoundingStrategy) -> CalculationResult {
    if places >= PRECISION {
        return CalculationResult::Ok(fixed);
    }

    let unit = POWERS_10[(PRECISION - places) as usize];
    let mut quotient = fixed / unit;
    let remainder = fixed % unit;
    let half = (remainder.abs() * 2).cmp(&unit);
    if increments(strategy, remainder.signum(), half, quotient % 2 != 0) {
        quotient += remainder.signum();
    }

    match quotient.checked_mul(unit) {
        Some(rounded) if (MIN_FIXED..=MAX_FIXED).contains(&rounded) => CalculationResult::Ok(rounded),
        _ => CalculationResult::Overflow,
    }
}

fn signum(sign: Sign) -> i64 {
    match sign {
        Sign::Minus => -1,
        Sign::NoSign => 0,
        Sign::Plus => 1,
    }
}

pub(crate) fn round_exact(value: &BigDecimal, places: i64, strategy: RoundingStrategy) -> BigDecimal {
    let (coefficient, scale) = value.as_bigint_and_exponent();
    if scale <= places {
        return value.clone();
    }

    let shift = scale.saturating_sub(places) as u64;
    // |coefficient| < 2^bits, which is below half of 10^shift
    if shift > coefficient.bits() {
        let sign = signum(coefficient.sign());
        let quotient = if increments(strategy, sign, Ordering::Less, false) { sign } else { 0 };
        return BigDecimal::new(BigInt::from(quotient), places);
    }

    let divisor = num_traits::pow(BigInt::from(10u32), shift as usize);
    let mut quotient = &coefficient / &divisor;
    let remainder = &coefficient % &divisor;
    let half = (remainder.magnitude() * 2u32).cmp(divisor.magnitude());
    let sign = signum(remainder.sign());
    let odd = !(&quotient % 2u32).is_zero();
    if increments(strategy, sign, half, odd) {
        quotient += sign;
    }

    BigDecimal::new(quotient, places)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::SCALE;
    use core::str::FromStr;

    const ALL: [RoundingStrategy; 7] = [
        RoundingStrategy::MidpointNearestEven,
        RoundingStrategy::MidpointAwayFromZero,
        RoundingStrategy::MidpointTowardZero,
        RoundingStrategy::ToZero,
        RoundingStrategy::AwayFromZero,
        RoundingStrategy::ToPositiveInfinity,
        RoundingStrategy::ToNegativeInfinity,
    ];

    #[test]
    fn it_rounds_fixed_values_to_integers() {
        // value, [even, away, toward, zero, away-from-zero, ceil, floor]
        let tests: [(i64, [i64; 7]); 6] = [
            (2_500_000_000_000, [2, 3, 2, 2, 3, 3, 2]),
            (-2_500_000_000_000, [-2, -3, -2, -2, -3, -2, -3]),
            (3_500_000_000_000, [4, 4, 3, 3, 4, 4, 3]),
            (1_400_000_000_000, [1, 1, 1, 1, 2, 2, 1]),
            (-1_600_000_000_000, [-2, -2, -2, -1, -2, -1, -2]),
            (7_000_000_000_000, [7, 7, 7, 7, 7, 7, 7]),
        ];
        for &(value, expected) in tests.iter() {
            for (strategy, expected) in ALL.iter().zip(expected.iter()) {
                assert_eq!(
                    round_impl(value, 0, *strategy),
                    CalculationResult::Ok(expected * SCALE),
                    "{} with {:?}",
                    value,
                    strategy
                );
            }
        }
    }

    #[test]
    fn it_rounds_fixed_values_to_places() {
        // 1.2345 to 3 places
        assert_eq!(
            round_impl(1_234_500_000_000, 3, RoundingStrategy::MidpointAwayFromZero),
            CalculationResult::Ok(1_235_000_000_000)
        );
        assert_eq!(
            round_impl(1_234_500_000_000, 3, RoundingStrategy::MidpointNearestEven),
            CalculationResult::Ok(1_234_000_000_000)
        );
        assert_eq!(round_impl(1, 12, RoundingStrategy::ToZero), CalculationResult::Ok(1));
        assert_eq!(round_impl(1, 11, RoundingStrategy::ToZero), CalculationResult::Ok(0));
        assert_eq!(round_impl(1, 11, RoundingStrategy::AwayFromZero), CalculationResult::Ok(10));
    }

    #[test]
    fn it_rounds_up_to_the_range_limits() {
        assert_eq!(
            round_impl(MAX_FIXED - SCALE / 2, 0, RoundingStrategy::MidpointAwayFromZero),
            CalculationResult::Ok(MAX_FIXED)
        );
        assert_eq!(
            round_impl(MAX_FIXED - 1, 0, RoundingStrategy::MidpointNearestEven),
            CalculationResult::Ok(MAX_FIXED)
        );
        assert_eq!(
            round_impl(MIN_FIXED + 1, 0, RoundingStrategy::ToNegativeInfinity),
            CalculationResult::Ok(MIN_FIXED)
        );
        assert_eq!(
            round_impl(MAX_FIXED, 0, RoundingStrategy::AwayFromZero),
            CalculationResult::Ok(MAX_FIXED)
        );
    }

    #[test]
    fn it_rounds_exact_values() {
        let value = BigDecimal::from_str("-12345.6789").unwrap();
        assert_eq!(
            round_exact(&value, 2, RoundingStrategy::MidpointAwayFromZero),
            BigDecimal::from_str("-12345.68").unwrap()
        );
        assert_eq!(
            round_exact(&value, -2, RoundingStrategy::MidpointAwayFromZero),
            BigDecimal::from_str("-12300").unwrap()
        );
        assert_eq!(
            round_exact(&value, -2, RoundingStrategy::ToNegativeInfinity),
            BigDecimal::from_str("-12400").unwrap()
        );
        assert_eq!(
            round_exact(&value, 0, RoundingStrategy::ToPositiveInfinity),
            BigDecimal::from_str("-12345").unwrap()
        );
        let half = BigDecimal::from_str("0.125").unwrap();
        assert_eq!(
            round_exact(&half, 2, RoundingStrategy::MidpointNearestEven),
            BigDecimal::from_str("0.12").unwrap()
        );
        assert_eq!(round_exact(&half, 5, RoundingStrategy::AwayFromZero), half);
    }

    #[test]
    fn it_rounds_values_far_below_the_last_place() {
        let tiny = BigDecimal::new(BigInt::from(-7), 4_000_000_000);
        let tests = [
            (RoundingStrategy::MidpointAwayFromZero, 0),
            (RoundingStrategy::ToZero, 0),
            (RoundingStrategy::AwayFromZero, -1),
            (RoundingStrategy::ToNegativeInfinity, -1),
            (RoundingStrategy::ToPositiveInfinity, 0),
        ];
        for &(strategy, expected) in tests.iter() {
            assert_eq!(round_exact(&tiny, 0, strategy), BigDecimal::from(expected), "{:?}", strategy);
        }
        let zero = BigDecimal::new(BigInt::from(0), i64::MAX);
        assert_eq!(round_exact(&zero, 2, RoundingStrategy::AwayFromZero), BigDecimal::from(0));
    }
}
