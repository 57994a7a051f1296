use crate::{
    config,
    ops::{div_round_exact, round_exact, trace_fallback},
    prelude::*,
};

use bigdecimal::BigDecimal;
use num_traits::One;

/// Trait exposing various mathematical operations that can be applied using a Decimal. Every one
/// of them runs on the arbitrary precision engine.
pub trait MathematicalOps {
    /// Raise self to the given integer exponent: x<sup>y</sup>. Negative exponents divide with
    /// the configured division precision.
    ///
    /// # Panics
    ///
    /// Panics when raising zero to a negative power.
    fn powi(&self, exp: i64) -> Decimal;

    /// Raise self to the given integer exponent x<sup>y</sup> returning `None` when raising zero
    /// to a negative power.
    fn checked_powi(&self, exp: i64) -> Option<Decimal>;

    /// Raise self to the given integral Decimal exponent.
    ///
    /// # Panics
    ///
    /// Panics if the exponent has a fractional part, does not fit an `i64`, or if zero is raised
    /// to a negative power.
    fn powd(&self, exp: Decimal) -> Decimal;

    /// Raise self to the given integral Decimal exponent, returning `None` if the exponent has a
    /// fractional part, does not fit an `i64`, or if zero is raised to a negative power.
    fn checked_powd(&self, exp: Decimal) -> Option<Decimal>;

    /// The square root of a Decimal, rounded to the configured division precision. `None` for
    /// negative values.
    fn sqrt(&self) -> Option<Decimal>;

    /// The exponential function, e<sup>x</sup>, rounded to the configured division precision.
    fn exp(&self) -> Decimal;
}

impl MathematicalOps for Decimal {
    fn powi(&self, exp: i64) -> Decimal {
        match self.checked_powi(exp) {
            Some(result) => result,
            None => panic!("Pow undefined"),
        }
    }

    fn checked_powi(&self, exp: i64) -> Option<Decimal> {
        if exp < 0 && self.is_zero() {
            return None;
        }
        trace_fallback!("pow");

        // Exponentiation by squaring
        let mut base = self.to_big_decimal();
        let mut remaining = exp.unsigned_abs();
        let mut result = BigDecimal::one();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = &result * &base;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = &base * &base;
            }
        }

        if exp < 0 {
            let precision = config::division_precision() as i64;
            result = div_round_exact(&BigDecimal::one(), &result, precision);
        }
        Some(Decimal::from_fallback(result))
    }

    fn powd(&self, exp: Decimal) -> Decimal {
        match self.checked_powd(exp) {
            Some(result) => result,
            None => panic!("Pow undefined"),
        }
    }

    fn checked_powd(&self, exp: Decimal) -> Option<Decimal> {
        if !exp.is_integer() {
            return None;
        }
        self.checked_powi(exp.int_part()?)
    }

    fn sqrt(&self) -> Option<Decimal> {
        if self.is_negative() {
            return None;
        }
        trace_fallback!("sqrt");
        let root = self.to_big_decimal().sqrt()?;
        let precision = config::division_precision() as i64;
        Some(Decimal::from_fallback(round_exact(
            &root,
            precision,
            RoundingStrategy::MidpointAwayFromZero,
        )))
    }

    fn exp(&self) -> Decimal {
        trace_fallback!("exp");
        let value = self.to_big_decimal().exp();
        let precision = config::division_precision() as i64;
        Decimal::from_fallback(round_exact(&value, precision, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl Decimal {
    /// Sum of all the given values.
    ///
    /// # Example
    ///
    /// ```
    /// use fast_decimal::Decimal;
    /// let total = Decimal::sum_of(&Decimal::from(1), &[Decimal::new(25, -1), Decimal::new(-5, -1)]);
    /// assert_eq!(total.to_string(), "3");
    /// ```
    pub fn sum_of(first: &Decimal, rest: &[Decimal]) -> Decimal {
        rest.iter().fold(first.clone(), |acc, value| &acc + value)
    }

    /// Average of all the given values, divided with the configured division precision.
    pub fn avg(first: &Decimal, rest: &[Decimal]) -> Decimal {
        let count = Decimal::from(rest.len() as u64 + 1);
        &Decimal::sum_of(first, rest) / &count
    }

    /// Largest of the given values. On ties the earliest one wins.
    pub fn max_of<'a>(first: &'a Decimal, rest: &'a [Decimal]) -> &'a Decimal {
        rest.iter().fold(first, |max, value| if value > max { value } else { max })
    }

    /// Smallest of the given values. On ties the earliest one wins.
    pub fn min_of<'a>(first: &'a Decimal, rest: &'a [Decimal]) -> &'a Decimal {
        rest.iter().fold(first, |min, value| if value < min { value } else { min })
    }

    /// Returns both values in a common representation with a common exponent.
    ///
    /// Two inline values are already aligned and come back unchanged. Otherwise both are moved to
    /// the fallback engine and padded to the larger number of fractional digits.
    pub fn rescale_pair(d1: &Decimal, d2: &Decimal) -> (Decimal, Decimal) {
        if d1.is_optimized() && d2.is_optimized() {
            return (d1.clone(), d2.clone());
        }
        let (e1, e2) = (d1.to_big_decimal(), d2.to_big_decimal());
        let scale = e1.as_bigint_and_exponent().1.max(e2.as_bigint_and_exponent().1);
        (
            Decimal::from_fallback(e1.with_scale(scale)),
            Decimal::from_fallback(e2.with_scale(scale)),
        )
    }
}
