use crate::constants::{MAX_FIXED, MIN_FIXED};
use crate::ops::CalculationResult;

pub(crate) fn add_impl(d1: i64, d2: i64) -> CalculationResult {
    // Both operands are already inside [MIN_FIXED, MAX_FIXED], so neither bound below can overflow.
    if d2 > 0 {
        if d1 <= MAX_FIXED - d2 {
            return CalculationResult::Ok(d1 + d2);
        }
    } else if d1 >= MIN_FIXED - d2 {
        return CalculationResult::Ok(d1 + d2);
    }
    CalculationResult::Overflow
}

#[inline]
pub(crate) fn sub_impl(d1: i64, d2: i64) -> CalculationResult {
    // The fast range is symmetric so negation never leaves it.
    add_impl(d1, -d2)
}
