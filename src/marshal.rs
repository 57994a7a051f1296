//! Text, JSON and binary encodings.
//!
//! The binary layout is a 4 byte big-endian exponent followed by the integer coefficient: one
//! header byte (`0x02`, with the low bit set for negative values) and the magnitude in big-endian
//! order. Zero has an empty magnitude.

use crate::{config, error::Error, Decimal};

use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

const BINARY_VERSION: u8 = 1;
const NEGATIVE_FLAG: u8 = 1;

impl Decimal {
    /// Canonical text, identical to `to_string`.
    pub fn marshal_text(&self) -> String {
        self.to_string()
    }

    /// Parses text produced by `marshal_text`.
    pub fn from_text(text: &[u8]) -> Result<Decimal, Error> {
        Decimal::from_bytes(text)
    }

    /// JSON rendering: a quoted string, or a bare number when
    /// [`set_marshal_json_without_quotes`](crate::set_marshal_json_without_quotes) is on.
    ///
    /// # Example
    ///
    /// ```
    /// use fast_decimal::Decimal;
    /// assert_eq!(Decimal::require_from_str("-1.50").marshal_json(), "\"-1.5\"");
    /// ```
    pub fn marshal_json(&self) -> String {
        let text = self.value();
        if config::marshal_json_without_quotes() {
            return text.into_owned();
        }
        let mut json = String::with_capacity(text.len() + 2);
        json.push('"');
        json.push_str(&text);
        json.push('"');
        json
    }

    /// Parses a JSON string or number. A JSON `null` gives zero.
    pub fn from_json(json: &[u8]) -> Result<Decimal, Error> {
        if json == b"null" {
            return Ok(Decimal::ZERO);
        }
        Decimal::from_bytes(json)
    }

    /// Binary encoding of the exponent and coefficient.
    ///
    /// Inline values are written with their exponent of -12.
    pub fn marshal_binary(&self) -> Result<Vec<u8>, Error> {
        let exp = self
            .exponent()
            .to_i32()
            .ok_or_else(|| Error::InvalidBinary(format!("exponent {} does not fit 32 bits", self.exponent())))?;
        let (sign, magnitude) = self.coefficient().to_bytes_be();

        let mut data = Vec::with_capacity(5 + magnitude.len());
        data.extend_from_slice(&exp.to_be_bytes());
        let mut header = BINARY_VERSION << 1;
        if sign == Sign::Minus {
            header |= NEGATIVE_FLAG;
        }
        data.push(header);
        if sign != Sign::NoSign {
            data.extend_from_slice(&magnitude);
        }
        Ok(data)
    }

    /// Decodes the output of `marshal_binary`.
    pub fn from_binary(data: &[u8]) -> Result<Decimal, Error> {
        if data.len() < 4 {
            return Err(Error::InvalidBinary(format!(
                "expected at least 4 bytes, got {}",
                data.len()
            )));
        }
        let (exp, coefficient) = data.split_at(4);
        let exp = i32::from_be_bytes([exp[0], exp[1], exp[2], exp[3]]);

        let value = match coefficient.split_first() {
            None => BigInt::from(0),
            Some((&header, magnitude)) => {
                if header >> 1 != BINARY_VERSION {
                    return Err(Error::InvalidBinary(format!(
                        "encoding version {} not supported",
                        header >> 1
                    )));
                }
                let sign = if header & NEGATIVE_FLAG != 0 { Sign::Minus } else { Sign::Plus };
                BigInt::from_bytes_be(sign, magnitude)
            }
        };
        Ok(Decimal::from_big_int(value, exp as i64))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn it_writes_the_binary_layout() {
        let value = Decimal::from_str("-1.5").unwrap();
        let data = value.marshal_binary().unwrap();
        let mut expected = (-12i32).to_be_bytes().to_vec();
        expected.push(0x03);
        expected.extend_from_slice(&1_500_000_000_000i64.to_be_bytes()[2..]);
        assert_eq!(data, expected);

        let zero = Decimal::ZERO.marshal_binary().unwrap();
        assert_eq!(zero, vec![0xff, 0xff, 0xff, 0xf4, 0x02]);
    }

    #[test]
    fn it_reads_foreign_exponents() {
        // 5 * 10^3
        let data = [0, 0, 0, 3, 0x02, 5];
        let value = Decimal::from_binary(&data).unwrap();
        assert!(value.is_optimized());
        assert_eq!(value.to_string(), "5000");

        // A bare exponent decodes to zero
        assert_eq!(Decimal::from_binary(&[0, 0, 0, 0]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn it_rejects_broken_binary() {
        assert!(matches!(Decimal::from_binary(&[0, 0, 1]), Err(Error::InvalidBinary(_))));
        assert!(matches!(Decimal::from_binary(&[0, 0, 0, 0, 0x04, 1]), Err(Error::InvalidBinary(_))));
    }
}
