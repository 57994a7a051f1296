use crate::{storage::ScanValue, Decimal, Error};

use std::borrow::Cow;

/// A `Decimal` that may be SQL `NULL` / JSON `null`.
///
/// An invalid instance always carries a zero `decimal`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NullDecimal {
    pub decimal: Decimal,
    pub valid: bool,
}

impl NullDecimal {
    /// A valid wrapper around `decimal`.
    pub fn new(decimal: Decimal) -> NullDecimal {
        NullDecimal { decimal, valid: true }
    }

    /// The null value.
    pub const fn null() -> NullDecimal {
        NullDecimal {
            decimal: Decimal::ZERO,
            valid: false,
        }
    }

    /// The wrapped value, if any.
    pub fn as_option(&self) -> Option<&Decimal> {
        if self.valid {
            Some(&self.decimal)
        } else {
            None
        }
    }

    /// Replaces the value with one read from a database driver. `Null` gives the null value;
    /// anything else is scanned as a `Decimal` and the result is valid if the scan succeeded.
    pub fn scan(&mut self, value: ScanValue<'_>) -> Result<(), Error> {
        if value == ScanValue::Null {
            *self = NullDecimal::null();
            return Ok(());
        }
        let result = self.decimal.scan(value);
        self.valid = result.is_ok();
        result
    }

    /// Text to hand to a database driver, `None` for the null value.
    pub fn value(&self) -> Option<Cow<'static, str>> {
        self.as_option().map(Decimal::value)
    }

    /// `null` for the null value, otherwise the `Decimal` JSON rendering.
    pub fn marshal_json(&self) -> String {
        match self.as_option() {
            Some(decimal) => decimal.marshal_json(),
            None => "null".to_string(),
        }
    }

    /// Parses a JSON string or number, or `null`.
    pub fn from_json(json: &[u8]) -> Result<NullDecimal, Error> {
        if json == b"null" {
            return Ok(NullDecimal::null());
        }
        Decimal::from_json(json).map(NullDecimal::new)
    }

    /// Canonical text, empty for the null value.
    pub fn marshal_text(&self) -> String {
        self.as_option().map(Decimal::marshal_text).unwrap_or_default()
    }

    /// Parses text produced by `marshal_text`. Empty text gives the null value.
    pub fn from_text(text: &[u8]) -> Result<NullDecimal, Error> {
        if text.is_empty() {
            return Ok(NullDecimal::null());
        }
        Decimal::from_text(text).map(NullDecimal::new)
    }
}

impl Default for NullDecimal {
    fn default() -> Self {
        NullDecimal::null()
    }
}

impl From<Decimal> for NullDecimal {
    fn from(decimal: Decimal) -> Self {
        NullDecimal::new(decimal)
    }
}

impl From<Option<Decimal>> for NullDecimal {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or_else(NullDecimal::null, NullDecimal::new)
    }
}

impl From<NullDecimal> for Option<Decimal> {
    fn from(value: NullDecimal) -> Self {
        if value.valid {
            Some(value.decimal)
        } else {
            None
        }
    }
}
