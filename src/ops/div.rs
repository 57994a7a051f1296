use crate::constants::{MAX_FIXED, MIN_FIXED, SCALE};
use crate::ops::{mul_impl, CalculationResult};

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use core::cmp::Ordering;

pub(crate) fn div_impl(dividend: i64, divisor: i64) -> CalculationResult {
    if divisor == 0 {
        return CalculationResult::DivByZero;
    }
    if dividend == 0 {
        return CalculationResult::Ok(0);
    }

    // Floating point estimate, only accepted if it multiplies back to the dividend exactly.
    let estimate = (dividend as f64 / divisor as f64) * SCALE as f64;
    if !(estimate.abs() <= MAX_FIXED as f64) {
        return CalculationResult::Overflow;
    }
    let candidate = estimate.round() as i64;
    if !(MIN_FIXED..=MAX_FIXED).contains(&candidate) {
        return CalculationResult::Overflow;
    }

    match mul_impl(candidate, divisor) {
        CalculationResult::Ok(product) if product == dividend => CalculationResult::Ok(candidate),
        _ => CalculationResult::Overflow,
    }
}

fn pow10(exp: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u32), exp as usize)
}

/// Truncated quotient to `precision` fractional digits together with the matching remainder,
/// such that `d1 = d2 * q + r` and `|r| < |d2| * 10^-precision`. The remainder takes the sign
/// of the dividend. The divisor must be non-zero.
pub(crate) fn quo_rem_exact(d1: &BigDecimal, d2: &BigDecimal, precision: i64) -> (BigDecimal, BigDecimal) {
    let (c1, s1) = d1.as_bigint_and_exponent();
    let (c2, s2) = d2.as_bigint_and_exponent();

    // d1 / d2 * 10^precision = c1 / c2 * 10^(s2 - s1 + precision)
    let shift = s2 - s1 + precision;
    let quotient = if shift >= 0 {
        (c1 * pow10(shift as u64)) / c2
    } else {
        c1 / (c2 * pow10(shift.unsigned_abs()))
    };

    let q = BigDecimal::new(quotient, precision);
    let r = d1 - &(d2 * &q);
    (q, r)
}

/// Division rounded half away from zero to `precision` fractional digits.
pub(crate) fn div_round_exact(d1: &BigDecimal, d2: &BigDecimal, precision: i64) -> BigDecimal {
    let (q, r) = quo_rem_exact(d1, d2, precision);

    // Compare 2 * |r| * 10^precision against |d2| rather than r against half a unit
    let doubled = r.abs() * BigDecimal::new(BigInt::from(2u32), -precision);
    if doubled.cmp(&d2.abs()) == Ordering::Less {
        return q;
    }

    let unit = BigDecimal::new(BigInt::from(1u32), precision);
    let negative = !d1.is_zero() && (d1.sign() == Sign::Minus) != (d2.sign() == Sign::Minus);
    if negative {
        q - unit
    } else {
        q + unit
    }
}
