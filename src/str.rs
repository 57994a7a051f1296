mod fmt;
mod parse;

pub(crate) use fmt::{fmt_coefficient, to_str_exact, to_str_fixed};
pub(crate) use parse::parse_bytes;
