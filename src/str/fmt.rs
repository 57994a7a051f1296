use crate::constants::{MAX_INT_DIGITS, MAX_STR_BUFFER_SIZE, PRECISION, SCALE};

use arrayvec::ArrayString;
use bigdecimal::BigDecimal;
use num_bigint::Sign;

// Index of the decimal point inside the scratch buffer: one sign slot plus the integral digits.
const POINT: usize = MAX_INT_DIGITS + 1;

/// Canonical text of a fixed-point value, written without allocating.
///
/// The buffer is filled from the decimal point outward: integral digits right to left, fractional
/// digits right to left, then trailing fractional zeros are dropped and the sign goes in last.
pub(crate) fn to_str_fixed(fixed: i64) -> ArrayString<MAX_STR_BUFFER_SIZE> {
    let mut buf = [b'0'; MAX_STR_BUFFER_SIZE];
    let magnitude = fixed.unsigned_abs();
    let mut integral = magnitude / SCALE as u64;
    let mut fractional = magnitude % SCALE as u64;

    let mut start = POINT;
    loop {
        start -= 1;
        buf[start] = b'0' + (integral % 10) as u8;
        integral /= 10;
        if integral == 0 {
            break;
        }
    }

    let mut end = POINT;
    if fractional != 0 {
        buf[POINT] = b'.';
        let mut i = POINT + PRECISION as usize;
        end = i + 1;
        while i > POINT {
            buf[i] = b'0' + (fractional % 10) as u8;
            fractional /= 10;
            i -= 1;
        }
        while buf[end - 1] == b'0' {
            end -= 1;
        }
    }

    if fixed < 0 {
        start -= 1;
        buf[start] = b'-';
    }

    let mut rep = ArrayString::new();
    for &b in &buf[start..end] {
        rep.push(b as char);
    }
    rep
}

/// Renders `digits * 10^-scale`, where `digits` is the magnitude of an integer coefficient.
///
/// Without `places` the output is canonical: no trailing fractional zeros and no point for
/// integral values. With `places` exactly that many fractional digits are written; the caller is
/// expected to have rounded the value already.
pub(crate) fn fmt_coefficient(negative: bool, digits: &str, scale: i64, places: Option<i64>) -> String {
    let (integral, fractional) = if scale <= 0 {
        let mut integral = String::with_capacity(digits.len() + scale.unsigned_abs() as usize);
        integral.push_str(digits);
        if digits.bytes().any(|b| b != b'0') {
            integral.extend(core::iter::repeat('0').take(scale.unsigned_abs() as usize));
        }
        (integral, String::new())
    } else {
        let scale = scale as usize;
        if digits.len() > scale {
            let (integral, fractional) = digits.split_at(digits.len() - scale);
            (integral.to_string(), fractional.to_string())
        } else {
            let mut fractional = "0".repeat(scale - digits.len());
            fractional.push_str(digits);
            ("0".to_string(), fractional)
        }
    };

    let integral = match integral.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let fractional = match places {
        None => fractional.trim_end_matches('0').to_string(),
        Some(places) if places <= 0 => String::new(),
        Some(places) => {
            let places = places as usize;
            let mut fractional = fractional;
            if fractional.len() > places {
                fractional.truncate(places);
            } else {
                let missing = places - fractional.len();
                fractional.extend(core::iter::repeat('0').take(missing));
            }
            fractional
        }
    };

    let is_zero = integral == "0" && fractional.bytes().all(|b| b == b'0');
    let mut rep = String::with_capacity(integral.len() + fractional.len() + 2);
    if negative && !is_zero {
        rep.push('-');
    }
    rep.push_str(integral);
    if !fractional.is_empty() {
        rep.push('.');
        rep.push_str(&fractional);
    }
    rep
}

/// Text of an arbitrary precision value, canonical or with a fixed number of places.
pub(crate) fn to_str_exact(value: &BigDecimal, places: Option<i64>) -> String {
    let (coefficient, scale) = value.as_bigint_and_exponent();
    let digits = coefficient.magnitude().to_string();
    fmt_coefficient(coefficient.sign() == Sign::Minus, &digits, scale, places)
}
