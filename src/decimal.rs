use crate::{
    cache, config,
    constants::{MAX_FIXED, MAX_INT, MIN_INT, POWERS_10, PRECISION, SCALE},
    error::Error,
    ops::{self, trace_fallback, CalculationResult},
    str::{fmt_coefficient, parse_bytes, to_str_exact, to_str_fixed},
};

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};

use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    iter::{Product, Sum},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
    str::FromStr,
};
use std::borrow::Cow;

/// `RoundingStrategy` represents the different rounding strategies that can be used by
/// `round_dp_with_strategy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundingStrategy {
    /// When a number is halfway between two others, it is rounded toward the nearest even number.
    /// Also known as "Bankers Rounding".
    /// e.g.
    /// 6.5 -> 6, 7.5 -> 8
    /// -6.5 -> -6, -7.5 -> -8
    MidpointNearestEven,
    /// When a number is halfway between two others, it is rounded toward the nearest number that
    /// is away from zero. e.g. 6.4 -> 6, 6.5 -> 7, -6.5 -> -7
    MidpointAwayFromZero,
    /// When a number is halfway between two others, it is rounded toward the nearest number that
    /// is toward zero. e.g. 6.4 -> 6, 6.5 -> 6, -6.5 -> -6
    MidpointTowardZero,
    /// The number is always rounded toward zero. e.g. -6.8 -> -6, 6.8 -> 6
    ToZero,
    /// The number is always rounded away from zero. e.g. -6.8 -> -7, 6.8 -> 7
    AwayFromZero,
    /// The number is always rounded towards negative infinity. e.g. 6.8 -> 6, -6.8 -> -7
    ToNegativeInfinity,
    /// The number is always rounded towards positive infinity. e.g. 6.8 -> 7, -6.8 -> -6
    ToPositiveInfinity,
}

/// Which code path a value takes when it is rendered for storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptimizationLevel {
    /// Fixed-point value whose text comes straight from the small value table.
    Cached,
    /// Fixed-point value rendered by the allocation free formatter.
    Regular,
    /// Arbitrary precision value, everything is delegated.
    Fallback,
}

/// Smallest coin, in cents, that `round_cash` rounds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CashInterval {
    Five = 5,
    Ten = 10,
    TwentyFive = 25,
    Fifty = 50,
    Hundred = 100,
}

impl CashInterval {
    // Number of intervals in one unit.
    fn steps(self) -> i64 {
        100 / self as i64
    }
}

impl TryFrom<u8> for CashInterval {
    type Error = Error;

    fn try_from(interval: u8) -> Result<Self, Self::Error> {
        match interval {
            5 => Ok(CashInterval::Five),
            10 => Ok(CashInterval::Ten),
            25 => Ok(CashInterval::TwentyFive),
            50 => Ok(CashInterval::Fifty),
            100 => Ok(CashInterval::Hundred),
            other => Err(Error::UnsupportedCashInterval(other)),
        }
    }
}

/// `Decimal` represents an exact decimal number.
///
/// Values whose magnitude is below 9223372 and that need no more than 12 fractional digits are
/// stored inline as a fixed-point `i64` scaled by 10^12, and every common operation on them is
/// plain integer arithmetic. Anything else is held by an arbitrary precision [`BigDecimal`].
/// Both forms render and compare identically; only `exponent`, `coefficient`,
/// `coefficient_i64` and `num_digits` reveal which one is in use.
#[derive(Clone)]
pub struct Decimal {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Fast(i64),
    Exact(Box<BigDecimal>),
}

// BigDecimal scale for a power-of-ten exponent; i64::MIN has no negation and clamps to i64::MAX.
#[inline]
fn scale_of(exp: i64) -> i64 {
    exp.checked_neg().unwrap_or(i64::MAX)
}

// Tries to scale `coefficient * 10^exp` to the fixed-point encoding without leaving its range.
fn fixed_from_parts(mut coefficient: i64, mut exp: i64) -> Option<i64> {
    if coefficient == 0 {
        return Some(0);
    }
    while exp < -(PRECISION as i64) && coefficient % 10 == 0 {
        coefficient /= 10;
        exp += 1;
    }
    if exp < -(PRECISION as i64) {
        return None;
    }
    let shift = exp.checked_add(PRECISION as i64)?;
    if shift >= POWERS_10.len() as i64 {
        return None;
    }
    let factor = POWERS_10[shift as usize];
    if coefficient.unsigned_abs() > (MAX_FIXED / factor) as u64 {
        return None;
    }
    Some(coefficient * factor)
}

impl Decimal {
    /// The zero value.
    pub const ZERO: Decimal = Decimal::from_fixed(0);
    /// One.
    pub const ONE: Decimal = Decimal::from_fixed(SCALE);
    /// Minus one.
    pub const NEGATIVE_ONE: Decimal = Decimal::from_fixed(-SCALE);
    /// Ten.
    pub const TEN: Decimal = Decimal::from_fixed(10 * SCALE);
    /// One hundred.
    pub const ONE_HUNDRED: Decimal = Decimal::from_fixed(100 * SCALE);

    /// Returns a `Decimal` worth `value * 10^exp`.
    ///
    /// `exp` is clamped to `-i64::MAX`, the smallest exponent the arbitrary precision form holds.
    ///
    /// # Arguments
    ///
    /// * `value` - The integer coefficient.
    /// * `exp` - The power of ten the coefficient is multiplied by.
    ///
    /// # Example
    ///
    /// ```
    /// use fast_decimal::Decimal;
    /// let pi = Decimal::new(3141, -3);
    /// assert_eq!(pi.to_string(), "3.141");
    /// ```
    pub fn new(value: i64, exp: i64) -> Decimal {
        match fixed_from_parts(value, exp) {
            Some(fixed) => Decimal::from_fixed(fixed),
            None => Decimal::from_fallback(BigDecimal::new(value.into(), scale_of(exp))),
        }
    }

    /// Returns the integer `value` as a `Decimal`.
    pub fn from_int(value: i64) -> Decimal {
        if (MIN_INT..=MAX_INT).contains(&value) {
            Decimal::from_fixed(value * SCALE)
        } else {
            Decimal::from_fallback(BigDecimal::from(value))
        }
    }

    /// Returns a `Decimal` worth `value * 10^exp` for an arbitrarily large coefficient. `exp` is
    /// clamped as in [`Decimal::new`].
    pub fn from_big_int(value: BigInt, exp: i64) -> Decimal {
        Decimal::narrow(BigDecimal::new(value, scale_of(exp)))
    }

    /// Converts an arbitrary precision value, keeping it inline whenever it fits.
    pub fn from_big_decimal(value: BigDecimal) -> Decimal {
        Decimal::narrow(value)
    }

    /// Parses a decimal literal from raw bytes. A single pair of surrounding double quotes is
    /// ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Decimal, Error> {
        parse_bytes(bytes)
    }

    /// Parses a decimal literal that is known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a valid decimal literal.
    ///
    /// # Example
    ///
    /// ```
    /// use fast_decimal::Decimal;
    /// let rate = Decimal::require_from_str("0.0725");
    /// assert_eq!(rate.to_string(), "0.0725");
    /// ```
    pub fn require_from_str(value: &str) -> Decimal {
        match parse_bytes(value.as_bytes()) {
            Ok(decimal) => decimal,
            Err(err) => panic!("{}", err),
        }
    }

    #[inline]
    pub(crate) const fn from_fixed(fixed: i64) -> Decimal {
        Decimal { repr: Repr::Fast(fixed) }
    }

    #[inline]
    pub(crate) fn from_fallback(value: BigDecimal) -> Decimal {
        Decimal {
            repr: Repr::Exact(Box::new(value)),
        }
    }

    // Moves an arbitrary precision value into the fixed-point encoding when it fits exactly.
    pub(crate) fn narrow(value: BigDecimal) -> Decimal {
        let (coefficient, scale) = value.into_bigint_and_exponent();
        if let Some(fixed) = coefficient.to_i64().and_then(|c| fixed_from_parts(c, scale.checked_neg()?)) {
            return Decimal::from_fixed(fixed);
        }
        Decimal::from_fallback(BigDecimal::new(coefficient, scale))
    }

    /// The fixed-point encoding, if this value uses it.
    #[inline]
    pub(crate) fn fixed(&self) -> Option<i64> {
        match self.repr {
            Repr::Fast(fixed) => Some(fixed),
            Repr::Exact(_) => None,
        }
    }

    #[inline]
    fn fast_pair(&self, other: &Decimal) -> Option<(i64, i64)> {
        match (&self.repr, &other.repr) {
            (Repr::Fast(a), Repr::Fast(b)) => Some((*a, *b)),
            _ => None,
        }
    }

    /// The value as seen by the fallback engine. Lossless for both representations.
    pub(crate) fn exact(&self) -> Cow<'_, BigDecimal> {
        match &self.repr {
            Repr::Fast(fixed) => Cow::Owned(BigDecimal::new((*fixed).into(), PRECISION as i64)),
            Repr::Exact(value) => Cow::Borrowed(&**value),
        }
    }

    /// Returns the value as an arbitrary precision `BigDecimal`.
    pub fn to_big_decimal(&self) -> BigDecimal {
        self.exact().into_owned()
    }

    /// Returns the same value forced into the arbitrary precision representation.
    pub fn to_fallback(&self) -> Decimal {
        Decimal::from_fallback(self.to_big_decimal())
    }

    /// Returns `true` if the value is held in the inline fixed-point form.
    #[inline]
    pub fn is_optimized(&self) -> bool {
        matches!(self.repr, Repr::Fast(_))
    }

    /// Reports which path `value` and `to_string` take for this instance.
    pub fn optimization_level(&self) -> OptimizationLevel {
        match self.repr {
            Repr::Fast(fixed) if cache::lookup(fixed).is_some() => OptimizationLevel::Cached,
            Repr::Fast(_) => OptimizationLevel::Regular,
            Repr::Exact(_) => OptimizationLevel::Fallback,
        }
    }

    /// Returns -1, 0 or 1 depending on the sign of the value.
    pub fn sign(&self) -> i32 {
        match &self.repr {
            Repr::Fast(fixed) => fixed.signum() as i32,
            Repr::Exact(value) => match value.sign() {
                Sign::Minus => -1,
                Sign::NoSign => 0,
                Sign::Plus => 1,
            },
        }
    }

    /// Returns `true` if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign() == 0
    }

    /// Returns `true` if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.sign() > 0
    }

    /// Returns `true` if the value is strictly less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign() < 0
    }

    /// Returns `true` if the value has no fractional part.
    pub fn is_integer(&self) -> bool {
        match &self.repr {
            Repr::Fast(fixed) => fixed % SCALE == 0,
            Repr::Exact(value) => {
                let (coefficient, scale) = value.as_bigint_and_exponent();
                if scale <= 0 || coefficient.is_zero() {
                    return true;
                }
                // A non-zero multiple of 10^scale needs more than `scale` bits
                scale as u64 <= coefficient.bits()
                    && (coefficient % num_traits::pow(BigInt::from(10u32), scale as usize)).is_zero()
            }
        }
    }

    /// The exponent of the underlying representation. Inline values always report -12.
    pub fn exponent(&self) -> i64 {
        match &self.repr {
            Repr::Fast(_) => -(PRECISION as i64),
            Repr::Exact(value) => value.as_bigint_and_exponent().1.saturating_neg(),
        }
    }

    /// The integer coefficient of the underlying representation, such that
    /// `self == coefficient * 10^exponent`.
    pub fn coefficient(&self) -> BigInt {
        match &self.repr {
            Repr::Fast(fixed) => BigInt::from(*fixed),
            Repr::Exact(value) => value.as_bigint_and_exponent().0,
        }
    }

    /// The coefficient as an `i64`, or `None` when it does not fit.
    pub fn coefficient_i64(&self) -> Option<i64> {
        match &self.repr {
            Repr::Fast(fixed) => Some(*fixed),
            Repr::Exact(value) => value.as_bigint_and_exponent().0.to_i64(),
        }
    }

    /// Number of decimal digits in the coefficient.
    pub fn num_digits(&self) -> usize {
        match &self.repr {
            Repr::Fast(fixed) => {
                let magnitude = fixed.unsigned_abs();
                let mut digits = 1;
                while digits < 20 && magnitude >= 10u64.pow(digits as u32) {
                    digits += 1;
                }
                digits
            }
            Repr::Exact(value) => value.as_bigint_and_exponent().0.magnitude().to_string().len(),
        }
    }

    /// The integral part of the value, truncated toward zero, if it fits an `i64`.
    pub fn int_part(&self) -> Option<i64> {
        match &self.repr {
            Repr::Fast(fixed) => Some(fixed / SCALE),
            Repr::Exact(value) => ops::round_exact(value, 0, RoundingStrategy::ToZero).to_i64(),
        }
    }

    /// The integral part of the value, truncated toward zero.
    pub fn big_int(&self) -> BigInt {
        match &self.repr {
            Repr::Fast(fixed) => BigInt::from(fixed / SCALE),
            Repr::Exact(value) => {
                let (coefficient, scale) = ops::round_exact(value, 0, RoundingStrategy::ToZero).into_bigint_and_exponent();
                if scale >= 0 || coefficient.is_zero() {
                    coefficient
                } else {
                    coefficient * num_traits::pow(BigInt::from(10u32), scale.unsigned_abs() as usize)
                }
            }
        }
    }

    /// The nearest `f64`, rounding if the value is not exactly representable.
    pub fn inexact_float(&self) -> f64 {
        self.to_f64().unwrap_or(0.0)
    }

    /// Checked division. Computes `self / other`, returning `None` if `other == 0`.
    ///
    /// Quotients that need more than 12 fractional digits are rounded half away from zero to
    /// `division_precision()` places.
    pub fn checked_div(&self, other: &Decimal) -> Option<Decimal> {
        if other.is_zero() {
            return None;
        }
        Some(self.div_with_precision(other, config::division_precision()))
    }

    fn div_with_precision(&self, other: &Decimal, precision: u32) -> Decimal {
        if let Some((dividend, divisor)) = self.fast_pair(other) {
            if let CalculationResult::Ok(quotient) = ops::div_impl(dividend, divisor) {
                if precision >= PRECISION || quotient % POWERS_10[(PRECISION - precision) as usize] == 0 {
                    return Decimal::from_fixed(quotient);
                }
            }
        }
        trace_fallback!("div");
        Decimal::from_fallback(ops::div_round_exact(
            &self.exact(),
            &other.exact(),
            precision as i64,
        ))
    }

    /// Divides by `other`, rounding half away from zero to `precision` fractional digits.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    pub fn div_round(&self, other: &Decimal, precision: i32) -> Decimal {
        if other.is_zero() {
            panic!("Division by zero");
        }
        trace_fallback!("div_round");
        Decimal::from_fallback(ops::div_round_exact(&self.exact(), &other.exact(), precision as i64))
    }

    /// Quotient truncated to `precision` fractional digits, and the remainder such that
    /// `self == other * q + r` with `|r| < |other| * 10^-precision`. The remainder takes the sign
    /// of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    pub fn quo_rem(&self, other: &Decimal, precision: i32) -> (Decimal, Decimal) {
        if other.is_zero() {
            panic!("Division by zero");
        }
        trace_fallback!("quo_rem");
        let (q, r) = ops::quo_rem_exact(&self.exact(), &other.exact(), precision as i64);
        (Decimal::from_fallback(q), Decimal::from_fallback(r))
    }

    /// Checked remainder. Computes `self % other`, returning `None` if `other == 0`.
    pub fn checked_rem(&self, other: &Decimal) -> Option<Decimal> {
        if other.is_zero() {
            return None;
        }
        trace_fallback!("rem");
        let (_, r) = ops::quo_rem_exact(&self.exact(), &other.exact(), 0);
        Some(Decimal::from_fallback(r))
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Decimal {
        match &self.repr {
            Repr::Fast(fixed) => Decimal::from_fixed(fixed.abs()),
            Repr::Exact(value) => Decimal::from_fallback(value.abs()),
        }
    }

    /// Rounds to `places` fractional digits using the given strategy. A negative `places` rounds
    /// to the left of the decimal point.
    ///
    /// # Example
    ///
    /// ```
    /// use fast_decimal::{Decimal, RoundingStrategy};
    /// let value = Decimal::require_from_str("1.45");
    /// assert_eq!(value.round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven).to_string(), "1.4");
    /// assert_eq!(value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero).to_string(), "1.5");
    /// ```
    pub fn round_dp_with_strategy(&self, places: i32, strategy: RoundingStrategy) -> Decimal {
        if let (Repr::Fast(fixed), true) = (&self.repr, places >= 0) {
            if let CalculationResult::Ok(rounded) = ops::round_impl(*fixed, places as u32, strategy) {
                return Decimal::from_fixed(rounded);
            }
        }
        self.round_fallback(places, strategy)
    }

    fn round_fallback(&self, places: i32, strategy: RoundingStrategy) -> Decimal {
        trace_fallback!("round");
        Decimal::from_fallback(ops::round_exact(&self.exact(), places as i64, strategy))
    }

    /// Rounds half away from zero to `places` fractional digits.
    ///
    /// # Example
    ///
    /// ```
    /// use fast_decimal::Decimal;
    /// assert_eq!(Decimal::require_from_str("5.45").round(1).to_string(), "5.5");
    /// assert_eq!(Decimal::require_from_str("545").round(-1).to_string(), "550");
    /// ```
    pub fn round(&self, places: i32) -> Decimal {
        self.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Rounds half to even ("banker's rounding") to `places` fractional digits.
    pub fn round_bank(&self, places: i32) -> Decimal {
        self.round_fallback(places, RoundingStrategy::MidpointNearestEven)
    }

    /// Rounds away from zero to `places` fractional digits.
    pub fn round_up(&self, places: i32) -> Decimal {
        self.round_fallback(places, RoundingStrategy::AwayFromZero)
    }

    /// Rounds toward zero to `places` fractional digits.
    pub fn round_down(&self, places: i32) -> Decimal {
        self.round_fallback(places, RoundingStrategy::ToZero)
    }

    /// Rounds toward positive infinity to `places` fractional digits.
    pub fn round_ceil(&self, places: i32) -> Decimal {
        self.round_fallback(places, RoundingStrategy::ToPositiveInfinity)
    }

    /// Rounds toward negative infinity to `places` fractional digits.
    pub fn round_floor(&self, places: i32) -> Decimal {
        self.round_fallback(places, RoundingStrategy::ToNegativeInfinity)
    }

    /// Rounds to the nearest multiple of `interval` cents, midpoints away from zero.
    ///
    /// # Example
    ///
    /// ```
    /// use fast_decimal::{CashInterval, Decimal};
    /// let price = Decimal::require_from_str("3.43");
    /// assert_eq!(price.round_cash(CashInterval::Five).to_string(), "3.45");
    /// assert_eq!(price.round_cash(CashInterval::Fifty).to_string(), "3.5");
    /// ```
    pub fn round_cash(&self, interval: CashInterval) -> Decimal {
        trace_fallback!("round_cash");
        let steps = BigDecimal::from(interval.steps());
        let units = ops::round_exact(&(&*self.exact() * &steps), 0, RoundingStrategy::MidpointAwayFromZero);
        Decimal::from_fallback(units * BigDecimal::new(BigInt::from(interval as u8), 2))
    }

    /// Returns the smallest integer greater than or equal to the value.
    pub fn ceil(&self) -> Decimal {
        self.round_dp_with_strategy(0, RoundingStrategy::ToPositiveInfinity)
    }

    /// Returns the largest integer less than or equal to the value.
    pub fn floor(&self) -> Decimal {
        self.round_dp_with_strategy(0, RoundingStrategy::ToNegativeInfinity)
    }

    /// Drops every fractional digit past `places`. A negative `places` leaves the value
    /// untouched.
    pub fn truncate(&self, places: i32) -> Decimal {
        if places < 0 {
            return self.clone();
        }
        self.round_dp_with_strategy(places, RoundingStrategy::ToZero)
    }

    // Renders an already rounded value with exactly `places` fractional digits.
    fn to_str_places(&self, places: i32) -> String {
        match &self.repr {
            Repr::Fast(fixed) => fmt_coefficient(
                *fixed < 0,
                &fixed.unsigned_abs().to_string(),
                PRECISION as i64,
                Some(places as i64),
            ),
            Repr::Exact(value) => to_str_exact(value, Some(places as i64)),
        }
    }

    /// Rounds half away from zero and renders exactly `places` fractional digits.
    ///
    /// # Example
    ///
    /// ```
    /// use fast_decimal::Decimal;
    /// let value = Decimal::require_from_str("5.45");
    /// assert_eq!(value.string_fixed(3), "5.450");
    /// assert_eq!(value.string_fixed(1), "5.5");
    /// assert_eq!(value.string_fixed(-1), "10");
    /// ```
    pub fn string_fixed(&self, places: i32) -> String {
        self.round(places).to_str_places(places)
    }

    /// Rounds half to even and renders exactly `places` fractional digits.
    pub fn string_fixed_bank(&self, places: i32) -> String {
        self.round_bank(places).to_str_places(places)
    }

    /// Cash rounds and renders with two fractional digits.
    pub fn string_fixed_cash(&self, interval: CashInterval) -> String {
        self.round_cash(interval).to_str_places(2)
    }

    /// Truncates to a multiple of `10^exp` and renders the canonical string.
    pub fn string_scaled(&self, exp: i32) -> String {
        self.round_dp_with_strategy(exp.saturating_neg(), RoundingStrategy::ToZero)
            .to_string()
    }

    // Writes the canonical text without the sign through `f.pad_integral`.
    fn fmt_canonical(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Fast(fixed) => match cache::lookup(*fixed) {
                Some(cached) => f.pad_integral(*fixed >= 0, "", cached.trim_start_matches('-')),
                None => {
                    let rep = to_str_fixed(*fixed);
                    f.pad_integral(*fixed >= 0, "", rep.trim_start_matches('-'))
                }
            },
            Repr::Exact(value) => {
                let rep = to_str_exact(value, None);
                f.pad_integral(!rep.starts_with('-'), "", rep.trim_start_matches('-'))
            }
        }
    }
}

impl Default for Decimal {
    #[inline]
    fn default() -> Self {
        Decimal::ZERO
    }
}

impl From<BigDecimal> for Decimal {
    #[inline]
    fn from(value: BigDecimal) -> Self {
        Decimal::narrow(value)
    }
}

impl From<Decimal> for BigDecimal {
    #[inline]
    fn from(value: Decimal) -> Self {
        match value.repr {
            Repr::Fast(fixed) => BigDecimal::new(fixed.into(), PRECISION as i64),
            Repr::Exact(value) => *value,
        }
    }
}

macro_rules! impl_from {
    ($T:ty, $from_ty:path) => {
        impl From<$T> for Decimal {
            #[inline]
            fn from(t: $T) -> Self {
                $from_ty(t as _)
            }
        }
    };
}

impl_from!(isize, Decimal::from_int);
impl_from!(i8, Decimal::from_int);
impl_from!(i16, Decimal::from_int);
impl_from!(i32, Decimal::from_int);
impl_from!(i64, Decimal::from_int);
impl_from!(usize, Decimal::from_u64);
impl_from!(u8, Decimal::from_int);
impl_from!(u16, Decimal::from_int);
impl_from!(u32, Decimal::from_int);
impl_from!(u64, Decimal::from_u64);

impl Decimal {
    fn from_u64(value: u64) -> Decimal {
        match i64::try_from(value) {
            Ok(value) => Decimal::from_int(value),
            Err(_) => Decimal::from_fallback(BigDecimal::from(value)),
        }
    }

    fn from_float_text(text: &str) -> Option<Decimal> {
        parse_bytes(text.as_bytes()).ok()
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(value: &str) -> Result<Decimal, Self::Err> {
        parse_bytes(value.as_bytes())
    }
}

impl TryFrom<f64> for Decimal {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Error> {
        Self::from_f64(value).ok_or_else(|| Error::ConversionTo(format!("{}", value)))
    }
}

impl TryFrom<f32> for Decimal {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self, Error> {
        Self::from_f32(value).ok_or_else(|| Error::ConversionTo(format!("{}", value)))
    }
}

impl Zero for Decimal {
    fn zero() -> Decimal {
        Decimal::ZERO
    }

    fn is_zero(&self) -> bool {
        Decimal::is_zero(self)
    }
}

impl One for Decimal {
    fn one() -> Decimal {
        Decimal::ONE
    }
}

impl FromPrimitive for Decimal {
    fn from_i64(n: i64) -> Option<Decimal> {
        Some(Decimal::from_int(n))
    }

    fn from_u64(n: u64) -> Option<Decimal> {
        Some(Decimal::from_u64(n))
    }

    fn from_i128(n: i128) -> Option<Decimal> {
        Some(Decimal::from_big_int(BigInt::from(n), 0))
    }

    fn from_u128(n: u128) -> Option<Decimal> {
        Some(Decimal::from_big_int(BigInt::from(n), 0))
    }

    // Floats convert through their shortest round-trip text, so 0.1 becomes exactly 0.1.
    fn from_f32(n: f32) -> Option<Decimal> {
        if !n.is_finite() {
            return None;
        }
        Decimal::from_float_text(&n.to_string())
    }

    fn from_f64(n: f64) -> Option<Decimal> {
        if !n.is_finite() {
            return None;
        }
        Decimal::from_float_text(&n.to_string())
    }
}

impl ToPrimitive for Decimal {
    fn to_i64(&self) -> Option<i64> {
        self.int_part()
    }

    fn to_u64(&self) -> Option<u64> {
        self.big_int().to_u64()
    }

    fn to_i128(&self) -> Option<i128> {
        self.big_int().to_i128()
    }

    fn to_u128(&self) -> Option<u128> {
        self.big_int().to_u128()
    }

    fn to_f64(&self) -> Option<f64> {
        match &self.repr {
            Repr::Fast(fixed) => to_str_fixed(*fixed).parse().ok(),
            Repr::Exact(value) => to_str_exact(value, None).parse().ok(),
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match f.precision() {
            Some(places) => {
                let rep = self.string_fixed(places.min(i32::MAX as usize) as i32);
                f.pad_integral(!rep.starts_with('-'), "", rep.trim_start_matches('-'))
            }
            None => self.fmt_canonical(f),
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        fmt::Display::fmt(self, f)
    }
}

impl PartialEq for Decimal {
    #[inline]
    fn eq(&self, other: &Decimal) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal values share their canonical text whatever the representation.
        match &self.repr {
            Repr::Fast(fixed) => to_str_fixed(*fixed).as_str().hash(state),
            Repr::Exact(value) => to_str_exact(value, None).as_str().hash(state),
        }
    }
}

impl PartialOrd for Decimal {
    #[inline]
    fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Decimal) -> Ordering {
        match self.fast_pair(other) {
            Some((a, b)) => a.cmp(&b),
            None => self.exact().cmp(&other.exact()),
        }
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        -&self
    }
}

impl<'a> Neg for &'a Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        match &self.repr {
            // The fast range is symmetric around zero
            Repr::Fast(fixed) => Decimal::from_fixed(-fixed),
            Repr::Exact(value) => Decimal::from_fallback(-&**value),
        }
    }
}

macro_rules! forward_val_val_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl $imp<$res> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                (&self).$method(&other)
            }
        }
    };
}

macro_rules! forward_ref_val_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl<'a> $imp<$res> for &'a $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                self.$method(&other)
            }
        }
    };
}

macro_rules! forward_val_ref_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl<'a> $imp<&'a $res> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: &$res) -> $res {
                (&self).$method(other)
            }
        }
    };
}

macro_rules! forward_all_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        forward_val_val_binop!(impl $imp for $res, $method);
        forward_ref_val_binop!(impl $imp for $res, $method);
        forward_val_ref_binop!(impl $imp for $res, $method);
    };
}

macro_rules! forward_assign_op {
    (impl $imp:ident for $res:ty, $method:ident, $op:ident) => {
        impl $imp<$res> for $res {
            #[inline]
            fn $method(&mut self, other: $res) {
                *self = (&*self).$op(&other);
            }
        }

        impl<'a> $imp<&'a $res> for $res {
            #[inline]
            fn $method(&mut self, other: &$res) {
                *self = (&*self).$op(other);
            }
        }
    };
}

forward_all_binop!(impl Add for Decimal, add);
forward_assign_op!(impl AddAssign for Decimal, add_assign, add);

impl<'a, 'b> Add<&'b Decimal> for &'a Decimal {
    type Output = Decimal;

    #[inline(always)]
    fn add(self, other: &Decimal) -> Decimal {
        if let Some((a, b)) = self.fast_pair(other) {
            if let CalculationResult::Ok(sum) = ops::add_impl(a, b) {
                return Decimal::from_fixed(sum);
            }
        }
        trace_fallback!("add");
        Decimal::from_fallback(&*self.exact() + &*other.exact())
    }
}

forward_all_binop!(impl Sub for Decimal, sub);
forward_assign_op!(impl SubAssign for Decimal, sub_assign, sub);

impl<'a, 'b> Sub<&'b Decimal> for &'a Decimal {
    type Output = Decimal;

    #[inline(always)]
    fn sub(self, other: &Decimal) -> Decimal {
        if let Some((a, b)) = self.fast_pair(other) {
            if let CalculationResult::Ok(difference) = ops::sub_impl(a, b) {
                return Decimal::from_fixed(difference);
            }
        }
        trace_fallback!("sub");
        Decimal::from_fallback(&*self.exact() - &*other.exact())
    }
}

forward_all_binop!(impl Mul for Decimal, mul);
forward_assign_op!(impl MulAssign for Decimal, mul_assign, mul);

impl<'a, 'b> Mul<&'b Decimal> for &'a Decimal {
    type Output = Decimal;

    #[inline]
    fn mul(self, other: &Decimal) -> Decimal {
        if let Some((a, b)) = self.fast_pair(other) {
            if let CalculationResult::Ok(product) = ops::mul_impl(a, b) {
                return Decimal::from_fixed(product);
            }
        }
        trace_fallback!("mul");
        Decimal::from_fallback(&*self.exact() * &*other.exact())
    }
}

forward_all_binop!(impl Div for Decimal, div);
forward_assign_op!(impl DivAssign for Decimal, div_assign, div);

impl<'a, 'b> Div<&'b Decimal> for &'a Decimal {
    type Output = Decimal;

    #[inline]
    fn div(self, other: &Decimal) -> Decimal {
        match self.checked_div(other) {
            Some(quotient) => quotient,
            None => panic!("Division by zero"),
        }
    }
}

forward_all_binop!(impl Rem for Decimal, rem);
forward_assign_op!(impl RemAssign for Decimal, rem_assign, rem);

impl<'a, 'b> Rem<&'b Decimal> for &'a Decimal {
    type Output = Decimal;

    #[inline]
    fn rem(self, other: &Decimal) -> Decimal {
        match self.checked_rem(other) {
            Some(remainder) => remainder,
            None => panic!("Division by zero"),
        }
    }
}

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, |acc, value| &acc + &value)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I: Iterator<Item = &'a Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, |acc, value| &acc + value)
    }
}

impl Product for Decimal {
    fn product<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ONE, |acc, value| &acc * &value)
    }
}

impl<'a> Product<&'a Decimal> for Decimal {
    fn product<I: Iterator<Item = &'a Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::ONE, |acc, value| &acc * value)
    }
}
