use crate::Decimal;
use core::fmt;

/// Error type for the library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The text or bytes do not form a valid decimal literal.
    InvalidFormat { input: String, reason: &'static str },
    /// Cash rounding only supports intervals of 5, 10, 25, 50 and 100 cents.
    UnsupportedCashInterval(u8),
    /// The binary encoding could not be decoded.
    InvalidBinary(String),
    /// A value could not be converted into a `Decimal`, e.g. `NaN` or an infinite float.
    ConversionTo(String),
}

impl Error {
    pub(crate) fn invalid_format(input: &[u8], reason: &'static str) -> Self {
        Self::InvalidFormat {
            input: String::from_utf8_lossy(input).into_owned(),
            reason,
        }
    }
}

#[cold]
pub(crate) fn tail_error(input: &[u8], reason: &'static str) -> Result<Decimal, Error> {
    Err(Error::invalid_format(input, reason))
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidFormat { ref input, reason } => {
                write!(f, "can't convert {} to decimal: {}", input, reason)
            }
            Self::UnsupportedCashInterval(interval) => write!(
                f,
                "Decimal does not support this Cash rounding interval `{}`. Supported: 5, 10, 25, 50, 100",
                interval
            ),
            Self::InvalidBinary(ref err) => write!(f, "error decoding binary: {}", err),
            Self::ConversionTo(ref err) => write!(f, "Error while converting to Decimal: {}", err),
        }
    }
}
