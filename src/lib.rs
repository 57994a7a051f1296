//! A decimal number type that keeps the common case on a 64-bit fixed-point fast path.
//!
//! Values within ±9223372 with at most 12 fractional digits are stored inline and handled with
//! plain integer arithmetic. Everything else, along with the operations that have no fast
//! implementation, is delegated to [`bigdecimal`]. Both representations render, compare and hash
//! identically.
//!
//! ```
//! use fast_decimal::Decimal;
//!
//! let price = Decimal::require_from_str("1.23");
//! let total = &price * &Decimal::from(2);
//! assert_eq!(total.to_string(), "2.46");
//! assert!(total.is_optimized());
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate lazy_static;

mod cache;
mod constants;
mod decimal;
mod error;
mod marshal;
mod nullable;
mod ops;
mod storage;
mod str;

pub mod config;
mod maths;

#[cfg(feature = "proptest")]
#[cfg_attr(docsrs, doc(cfg(feature = "proptest")))]
mod proptest;
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod serde;

pub use cache::init as init_cache;
pub use config::{division_precision, marshal_json_without_quotes, set_division_precision, set_marshal_json_without_quotes};
pub use decimal::{CashInterval, Decimal, OptimizationLevel, RoundingStrategy};
pub use error::Error;
pub use maths::MathematicalOps;
pub use nullable::NullDecimal;
pub use storage::ScanValue;

/// A convenience module appropriate for glob imports (`use fast_decimal::prelude::*;`).
pub mod prelude {
    pub use crate::maths::MathematicalOps;
    pub use crate::{Decimal, NullDecimal, RoundingStrategy};
    pub use core::str::FromStr;
    pub use num_traits::{FromPrimitive, One, ToPrimitive, Zero};
}
