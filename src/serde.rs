//! Serde support.
//!
//! By default a `Decimal` is written as its canonical text and read from a JSON string or number.
//! The `serde-float` and `serde-arbitrary-precision` features switch the default output to a
//! number, `serde-str` restricts the default input to strings. The helper modules below pick a
//! format per field with `#[serde(with = "...")]`.
//!
//! Every input goes through the same parser as [`Decimal::from_bytes`], so values that fit the
//! fixed-point form come out inline regardless of how they were spelled.
use crate::{Decimal, NullDecimal};
use core::fmt;
use num_bigint::BigInt;
use num_traits::FromPrimitive;
use serde::{
    de::{self, Unexpected, Visitor},
    ser, Serialize,
};

/// The key `serde_json` uses to hand over a number's text when `arbitrary_precision` is on.
#[cfg(feature = "serde-with-arbitrary-precision")]
const NUMBER_TOKEN: &str = "$serde_json::private::Number";

#[derive(Clone, Copy)]
enum Format {
    #[cfg_attr(all(feature = "serde-float", not(feature = "serde-with-str")), allow(dead_code))]
    Text,
    #[cfg(feature = "serde-with-float")]
    Float,
    #[cfg(feature = "serde-with-arbitrary-precision")]
    Number,
}

#[cfg(not(feature = "serde-float"))]
const DEFAULT_FORMAT: Format = Format::Text;
#[cfg(all(feature = "serde-float", not(feature = "serde-arbitrary-precision")))]
const DEFAULT_FORMAT: Format = Format::Float;
#[cfg(all(feature = "serde-float", feature = "serde-arbitrary-precision"))]
const DEFAULT_FORMAT: Format = Format::Number;

#[derive(Clone, Copy)]
enum Expect {
    Any,
    #[cfg(feature = "serde-with-str")]
    Text,
}

#[cfg(not(all(feature = "serde-str", not(feature = "serde-float"))))]
const DEFAULT_EXPECT: Expect = Expect::Any;
#[cfg(all(feature = "serde-str", not(feature = "serde-float")))]
const DEFAULT_EXPECT: Expect = Expect::Text;

struct Formatted<'a> {
    decimal: &'a Decimal,
    format: Format,
}

impl Serialize for Formatted<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self.format {
            Format::Text => serializer.serialize_str(&self.decimal.value()),
            #[cfg(feature = "serde-with-float")]
            Format::Float => serializer.serialize_f64(self.decimal.inexact_float()),
            #[cfg(feature = "serde-with-arbitrary-precision")]
            Format::Number => self
                .decimal
                .value()
                .parse::<serde_json::Number>()
                .map_err(S::Error::custom)?
                .serialize(serializer),
        }
    }
}

fn serialize_option<S>(value: Option<&Decimal>, format: Format, serializer: S) -> Result<S::Ok, S::Error>
where
    S: ser::Serializer,
{
    match value {
        Some(decimal) => serializer.serialize_some(&Formatted { decimal, format }),
        None => serializer.serialize_none(),
    }
}

fn deserialize_as<'de, D>(deserializer: D, expect: Expect) -> Result<Decimal, D::Error>
where
    D: de::Deserializer<'de>,
{
    match expect {
        Expect::Any => deserializer.deserialize_any(DecimalVisitor),
        #[cfg(feature = "serde-with-str")]
        Expect::Text => deserializer.deserialize_str(DecimalVisitor),
    }
}

/// Serialize/deserialize Decimals as arbitrary precision numbers in JSON using the
/// `arbitrary_precision` feature within `serde_json`. No digit is lost in either direction.
///
/// ```
/// # use serde::{Serialize, Deserialize};
/// # use fast_decimal::Decimal;
/// #[derive(Serialize, Deserialize)]
/// pub struct Rate {
///     #[serde(with = "fast_decimal::serde::arbitrary_precision")]
///     value: Decimal,
/// }
///
/// let rate: Rate = serde_json::from_str(r#"{"value":0.0000000000000125}"#).unwrap();
/// assert!(!rate.value.is_optimized());
/// assert_eq!(serde_json::to_string(&rate).unwrap(), r#"{"value":0.0000000000000125}"#);
/// ```
#[cfg(feature = "serde-with-arbitrary-precision")]
pub mod arbitrary_precision {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserialize_as(deserializer, Expect::Any)
    }

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        Formatted {
            decimal: value,
            format: Format::Number,
        }
        .serialize(serializer)
    }
}

/// Optional variant of [`arbitrary_precision`]; `null` maps to `None`.
#[cfg(feature = "serde-with-arbitrary-precision")]
pub mod arbitrary_precision_option {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionalDecimalVisitor(Expect::Any))
    }

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serialize_option(value.as_ref(), Format::Number, serializer)
    }
}

/// Serialize Decimals as floats. Input may be any JSON number or string.
///
/// ```
/// # use serde::{Serialize, Deserialize};
/// # use fast_decimal::Decimal;
/// #[derive(Serialize, Deserialize)]
/// pub struct Reading {
///     #[serde(with = "fast_decimal::serde::float")]
///     level: Decimal,
/// }
///
/// let reading = Reading { level: Decimal::require_from_str("12.250") };
/// assert_eq!(serde_json::to_string(&reading).unwrap(), r#"{"level":12.25}"#);
/// ```
#[cfg(feature = "serde-with-float")]
pub mod float {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserialize_as(deserializer, Expect::Any)
    }

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        Formatted {
            decimal: value,
            format: Format::Float,
        }
        .serialize(serializer)
    }
}

/// Optional variant of [`float`].
#[cfg(feature = "serde-with-float")]
pub mod float_option {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionalDecimalVisitor(Expect::Any))
    }

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serialize_option(value.as_ref(), Format::Float, serializer)
    }
}

/// Serialize/deserialize Decimals as strings, which suits binary encoding formats.
///
/// ```
/// # use serde::{Serialize, Deserialize};
/// # use fast_decimal::Decimal;
/// #[derive(Serialize, Deserialize)]
/// pub struct Balance {
///     #[serde(with = "fast_decimal::serde::str")]
///     total: Decimal,
/// }
///
/// let balance: Balance = serde_json::from_str(r#"{"total":"98765432.10"}"#).unwrap();
/// assert!(!balance.total.is_optimized());
/// assert_eq!(serde_json::to_string(&balance).unwrap(), r#"{"total":"98765432.1"}"#);
/// ```
#[cfg(feature = "serde-with-str")]
pub mod str {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserialize_as(deserializer, Expect::Text)
    }

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        Formatted {
            decimal: value,
            format: Format::Text,
        }
        .serialize(serializer)
    }
}

/// Optional variant of [`str`](self::str). An empty string deserializes to `None`.
#[cfg(feature = "serde-with-str")]
pub mod str_option {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionalDecimalVisitor(Expect::Text))
    }

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serialize_option(value.as_ref(), Format::Text, serializer)
    }
}

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal number or a string holding one")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Decimal, E>
    where
        E: de::Error,
    {
        Ok(Decimal::from(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Decimal, E>
    where
        E: de::Error,
    {
        Ok(Decimal::from(value))
    }

    fn visit_i128<E>(self, value: i128) -> Result<Decimal, E>
    where
        E: de::Error,
    {
        Ok(Decimal::from_big_int(BigInt::from(value), 0))
    }

    fn visit_u128<E>(self, value: u128) -> Result<Decimal, E>
    where
        E: de::Error,
    {
        Ok(Decimal::from_big_int(BigInt::from(value), 0))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Decimal, E>
    where
        E: de::Error,
    {
        Decimal::from_f64(value).ok_or_else(|| E::invalid_value(Unexpected::Float(value), &self))
    }

    fn visit_str<E>(self, value: &str) -> Result<Decimal, E>
    where
        E: de::Error,
    {
        self.visit_bytes(value.as_bytes())
    }

    fn visit_bytes<E>(self, value: &[u8]) -> Result<Decimal, E>
    where
        E: de::Error,
    {
        Decimal::from_bytes(value).map_err(E::custom)
    }

    // serde_json hands arbitrary precision numbers over as `{ NUMBER_TOKEN: "<digits>" }`
    #[cfg(feature = "serde-with-arbitrary-precision")]
    fn visit_map<A>(self, mut map: A) -> Result<Decimal, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        match map.next_key::<String>()? {
            Some(key) if key == NUMBER_TOKEN => {}
            _ => return Err(de::Error::invalid_type(Unexpected::Map, &self)),
        }
        let text: String = map.next_value()?;
        Decimal::from_json(text.as_bytes()).map_err(de::Error::custom)
    }
}

struct OptionalDecimalVisitor(Expect);

impl<'de> Visitor<'de> for OptionalDecimalVisitor {
    type Value = Option<Decimal>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("null or a decimal number")
    }

    fn visit_none<E>(self) -> Result<Option<Decimal>, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Option<Decimal>, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let expect = self.0;
        match expect {
            Expect::Any => deserialize_as(deserializer, Expect::Any).map(Some),
            // Routed back here so an empty string can stand for `None`
            #[cfg(feature = "serde-with-str")]
            Expect::Text => deserializer.deserialize_str(self),
        }
    }

    fn visit_str<E>(self, value: &str) -> Result<Option<Decimal>, E>
    where
        E: de::Error,
    {
        if value.is_empty() {
            return Ok(None);
        }
        DecimalVisitor.visit_str(value).map(Some)
    }
}

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        Formatted {
            decimal: self,
            format: DEFAULT_FORMAT,
        }
        .serialize(serializer)
    }
}

impl<'de> de::Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserialize_as(deserializer, DEFAULT_EXPECT)
    }
}

/// The null value is written as `null`; `null` (or a missing option) reads back as the null value
/// with a zero `decimal`.
impl Serialize for NullDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serialize_option(self.as_option(), DEFAULT_FORMAT, serializer)
    }
}

impl<'de> de::Deserialize<'de> for NullDecimal {
    fn deserialize<D>(deserializer: D) -> Result<NullDecimal, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer
            .deserialize_option(OptionalDecimalVisitor(DEFAULT_EXPECT))
            .map(NullDecimal::from)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug)]
    struct Payment {
        amount: Decimal,
    }

    #[derive(Serialize, Deserialize, Debug)]
    struct Refund {
        amount: NullDecimal,
    }

    #[test]
    fn it_deserializes_quoted_literals() {
        let tests = [
            (r#"{"amount":"1.234"}"#, "1.234", true),
            (r#"{"amount":"-0.5"}"#, "-0.5", true),
            (r#"{"amount":"1.5e3"}"#, "1500", true),
            (r#"{"amount":"12345678.25"}"#, "12345678.25", false),
            (r#"{"amount":"0.00000000000012"}"#, "0.00000000000012", false),
        ];
        for &(json, expected, optimized) in tests.iter() {
            let payment: Payment = serde_json::from_str(json).unwrap();
            assert_eq!(payment.amount.to_string(), expected, "{}", json);
            assert_eq!(payment.amount.is_optimized(), optimized, "{}", json);
        }
    }

    #[test]
    #[cfg(not(all(feature = "serde-str", not(feature = "serde-float"))))]
    fn it_deserializes_json_numbers() {
        let tests = [
            (r#"{"amount":1234}"#, "1234"),
            (r#"{"amount":-1234.5}"#, "-1234.5"),
            (r#"{"amount":0.1}"#, "0.1"),
            (r#"{"amount":18446744073709551615}"#, "18446744073709551615"),
        ];
        for &(json, expected) in tests.iter() {
            let payment: Payment = serde_json::from_str(json).unwrap();
            assert_eq!(payment.amount.to_string(), expected, "{}", json);
        }
    }

    #[test]
    fn it_narrows_padded_literals_into_the_fixed_form() {
        let payment: Payment = serde_json::from_str(r#"{"amount":"1.50000000000000000000"}"#).unwrap();
        assert!(payment.amount.is_optimized());
        assert_eq!(payment.amount, Decimal::new(15, -1));
    }

    #[test]
    fn it_reports_the_rejected_literal() {
        let err = serde_json::from_str::<Payment>(r#"{"amount":"foo"}"#).unwrap_err();
        assert!(err.to_string().contains("can't convert foo to decimal"), "{}", err);
        let err = serde_json::from_str::<Payment>(r#"{"amount":"1e99999999999"}"#).unwrap_err();
        assert!(err.to_string().contains("exponent out of range"), "{}", err);
    }

    #[test]
    fn it_accepts_raw_bytes_and_wide_integers() {
        let bytes = de::value::BytesDeserializer::<de::value::Error>::new(b"\"12.50\"");
        let value = Decimal::deserialize(bytes).unwrap();
        assert!(value.is_optimized());
        assert_eq!(value.to_string(), "12.5");

        let wide = de::value::I128Deserializer::<de::value::Error>::new(i128::MIN);
        assert_eq!(
            Decimal::deserialize(wide).unwrap().to_string(),
            "-170141183460469231731687303715884105728"
        );
    }

    #[test]
    #[cfg(not(feature = "serde-float"))]
    fn it_serializes_both_representations_alike() {
        let fast = Decimal::require_from_str("1.50");
        let tests = [
            (fast.clone(), r#"{"amount":"1.5"}"#),
            (fast.to_fallback(), r#"{"amount":"1.5"}"#),
            (Decimal::require_from_str("12345678.25"), r#"{"amount":"12345678.25"}"#),
            (Decimal::require_from_str("-0.0000000000001"), r#"{"amount":"-0.0000000000001"}"#),
        ];
        for (amount, expected) in tests.iter() {
            let json = serde_json::to_string(&Payment { amount: amount.clone() }).unwrap();
            assert_eq!(json, *expected);
        }
    }

    #[test]
    fn it_maps_null_decimals_to_null() {
        let json = serde_json::to_string(&Refund {
            amount: NullDecimal::null(),
        })
        .unwrap();
        assert_eq!(json, r#"{"amount":null}"#);

        let refund: Refund = serde_json::from_str(r#"{"amount":null}"#).unwrap();
        assert!(!refund.amount.valid);
        assert!(refund.amount.decimal.is_zero());

        let refund: Refund = serde_json::from_str(r#"{"amount":"-0.25"}"#).unwrap();
        assert!(refund.amount.valid);
        assert_eq!(refund.amount.decimal.to_string(), "-0.25");

        let refund: Refund = serde_json::from_str(r#"{"amount":"98765432.125"}"#).unwrap();
        assert!(refund.amount.valid);
        assert!(!refund.amount.decimal.is_optimized());
    }

    #[test]
    #[cfg(not(feature = "serde-float"))]
    fn it_serializes_valid_null_decimals_as_text() {
        let refund = Refund {
            amount: NullDecimal::new(Decimal::require_from_str("3.10")),
        };
        assert_eq!(serde_json::to_string(&refund).unwrap(), r#"{"amount":"3.1"}"#);
    }

    #[test]
    #[cfg(feature = "serde-with-str")]
    fn it_treats_empty_strings_as_missing() {
        #[derive(Serialize, Deserialize)]
        struct Quote {
            #[serde(with = "crate::serde::str_option")]
            bid: Option<Decimal>,
        }

        for json in [r#"{"bid":""}"#, r#"{"bid":null}"#].iter() {
            let quote: Quote = serde_json::from_str(json).unwrap();
            assert_eq!(quote.bid, None, "{}", json);
        }
        let quote: Quote = serde_json::from_str(r#"{"bid":"0.10"}"#).unwrap();
        assert_eq!(quote.bid, Some(Decimal::new(1, -1)));
        assert_eq!(serde_json::to_string(&quote).unwrap(), r#"{"bid":"0.1"}"#);
        assert_eq!(serde_json::to_string(&Quote { bid: None }).unwrap(), r#"{"bid":null}"#);
    }

    #[test]
    #[cfg(feature = "serde-with-float")]
    fn it_writes_optional_floats() {
        #[derive(Serialize, Deserialize)]
        struct Reading {
            #[serde(with = "crate::serde::float_option")]
            level: Option<Decimal>,
        }

        let reading = Reading {
            level: Some(Decimal::new(125, -2)),
        };
        assert_eq!(serde_json::to_string(&reading).unwrap(), r#"{"level":1.25}"#);
        assert_eq!(serde_json::to_string(&Reading { level: None }).unwrap(), r#"{"level":null}"#);

        let reading: Reading = serde_json::from_str(r#"{"level":2.5}"#).unwrap();
        assert_eq!(reading.level, Some(Decimal::new(25, -1)));
        let reading: Reading = serde_json::from_str(r#"{"level":null}"#).unwrap();
        assert_eq!(reading.level, None);
    }

    #[test]
    #[cfg(feature = "serde-with-arbitrary-precision")]
    fn it_keeps_every_digit_of_json_numbers() {
        #[derive(Serialize, Deserialize)]
        struct Rate {
            #[serde(with = "crate::serde::arbitrary_precision")]
            value: Decimal,
            #[serde(with = "crate::serde::arbitrary_precision_option")]
            cap: Option<Decimal>,
        }

        let rate: Rate = serde_json::from_str(r#"{"value":0.1234567890123456789,"cap":null}"#).unwrap();
        assert_eq!(rate.value.to_string(), "0.1234567890123456789");
        assert!(!rate.value.is_optimized());
        assert_eq!(rate.cap, None);
        assert_eq!(
            serde_json::to_string(&rate).unwrap(),
            r#"{"value":0.1234567890123456789,"cap":null}"#
        );

        let rate: Rate = serde_json::from_str(r#"{"value":2.50,"cap":7}"#).unwrap();
        assert!(rate.value.is_optimized());
        assert_eq!(rate.cap, Some(Decimal::from(7)));
    }
}
