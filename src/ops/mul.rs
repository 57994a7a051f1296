use crate::constants::{HALF_SCALE, MAX_FIXED, MAX_INT, SCALE};
use crate::ops::CalculationResult;

// Accumulates a non-negative partial product, refusing to leave the fast range.
#[inline(always)]
fn accumulate(acc: i64, value: i64) -> Option<i64> {
    if acc <= MAX_FIXED - value {
        Some(acc + value)
    } else {
        None
    }
}

pub(crate) fn mul_impl(d1: i64, d2: i64) -> CalculationResult {
    if d1 == 0 || d2 == 0 {
        return CalculationResult::Ok(0);
    }
    let negative = (d1 < 0) != (d2 < 0);
    match mul_abs(d1.abs(), d2.abs()) {
        Some(product) if negative => CalculationResult::Ok(-product),
        Some(product) => CalculationResult::Ok(product),
        None => CalculationResult::Overflow,
    }
}

// Multiplies two non-negative fixed-point values. The operands are split into integral and
// fractional parts:
//
//   (a + b/S) * (c + d/S) = a*c + (a*d + b*c)/S + b*d/S^2
//
// The last term is split again on HALF_SCALE so that no partial product exceeds 64 bits. Any
// digit that would end up beyond the twelfth fractional place is reported as an overflow.
fn mul_abs(x: i64, y: i64) -> Option<i64> {
    let (x_int, x_frac) = (x / SCALE, x % SCALE);
    let (y_int, y_frac) = (y / SCALE, y % SCALE);

    let int_product = x_int * y_int;
    if int_product > MAX_INT {
        return None;
    }
    let mut acc = int_product * SCALE;

    // MAX_INT * (SCALE - 1) still fits in an i64
    acc = accumulate(acc, x_int * y_frac)?;
    acc = accumulate(acc, x_frac * y_int)?;

    let (x_hi, x_lo) = (x_frac / HALF_SCALE, x_frac % HALF_SCALE);
    let (y_hi, y_lo) = (y_frac / HALF_SCALE, y_frac % HALF_SCALE);
    let mid = x_hi * y_lo + x_lo * y_hi;
    let low = (mid % HALF_SCALE) * HALF_SCALE + x_lo * y_lo;
    if low % SCALE != 0 {
        return None;
    }
    accumulate(acc, x_hi * y_hi + mid / HALF_SCALE + low / SCALE)
}
