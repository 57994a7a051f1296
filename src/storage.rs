//! The two contracts a database layer needs: produce a storable value and accept a scanned one.

use crate::{
    cache,
    error::Error,
    str::{to_str_exact, to_str_fixed},
    Decimal,
};

use num_traits::FromPrimitive;
use std::borrow::Cow;

/// A raw column value handed over by a database driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScanValue<'a> {
    Null,
    Float32(f32),
    Float64(f64),
    Int64(i64),
    Str(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> From<f32> for ScanValue<'a> {
    fn from(value: f32) -> Self {
        ScanValue::Float32(value)
    }
}

impl<'a> From<f64> for ScanValue<'a> {
    fn from(value: f64) -> Self {
        ScanValue::Float64(value)
    }
}

impl<'a> From<i64> for ScanValue<'a> {
    fn from(value: i64) -> Self {
        ScanValue::Int64(value)
    }
}

impl<'a> From<&'a str> for ScanValue<'a> {
    fn from(value: &'a str) -> Self {
        ScanValue::Str(value)
    }
}

impl<'a> From<&'a [u8]> for ScanValue<'a> {
    fn from(value: &'a [u8]) -> Self {
        ScanValue::Bytes(value)
    }
}

impl<'a, T> From<Option<T>> for ScanValue<'a>
where
    T: Into<ScanValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(ScanValue::Null, Into::into)
    }
}

// Floats keep their shortest round-trip text, the same rule as `Decimal::from_f64`.
fn from_float(value: f64) -> Result<Decimal, Error> {
    Decimal::from_f64(value).ok_or_else(|| Error::ConversionTo(format!("{}", value)))
}

impl Decimal {
    /// Text to hand to a database driver.
    ///
    /// Values in the small value table are returned borrowed and cost no allocation.
    ///
    /// # Example
    ///
    /// ```
    /// use fast_decimal::Decimal;
    /// use std::borrow::Cow;
    ///
    /// let price = Decimal::require_from_str("12.50");
    /// assert!(matches!(price.value(), Cow::Borrowed("12.5")));
    /// ```
    pub fn value(&self) -> Cow<'static, str> {
        match self.fixed() {
            Some(fixed) => match cache::lookup(fixed) {
                Some(cached) => Cow::Borrowed(cached),
                None => Cow::Owned(to_str_fixed(fixed).to_string()),
            },
            None => Cow::Owned(to_str_exact(&self.exact(), None)),
        }
    }

    /// Replaces the value with one read from a database driver.
    ///
    /// `Float32` is widened to `f64` before conversion. Text and bytes go through the regular
    /// parser, surrounding double quotes included. If the text cannot be parsed the value is reset
    /// to zero and the error returned; a `Null` input is rejected and leaves the value untouched.
    pub fn scan(&mut self, value: ScanValue<'_>) -> Result<(), Error> {
        let scanned = match value {
            ScanValue::Null => {
                return Err(Error::ConversionTo("cannot scan NULL into a Decimal".to_string()));
            }
            ScanValue::Float32(value) => from_float(value as f64),
            ScanValue::Float64(value) => from_float(value),
            ScanValue::Int64(value) => Ok(Decimal::from_int(value)),
            ScanValue::Str(value) => Decimal::from_bytes(value.as_bytes()),
            ScanValue::Bytes(value) => Decimal::from_bytes(value),
        };
        match scanned {
            Ok(decimal) => {
                *self = decimal;
                Ok(())
            }
            Err(err) => {
                *self = Decimal::ZERO;
                Err(err)
            }
        }
    }
}
