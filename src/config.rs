//! Process-wide runtime settings.
//!
//! Both are plain atomics. They may be changed at any time, but a change is only observed by
//! operations that start afterwards.

use crate::constants::DEFAULT_DIVISION_PRECISION;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

static DIVISION_PRECISION: AtomicU32 = AtomicU32::new(DEFAULT_DIVISION_PRECISION);
static MARSHAL_JSON_WITHOUT_QUOTES: AtomicBool = AtomicBool::new(false);

/// Number of fractional digits kept when a division is not exactly representable.
///
/// Defaults to 16.
#[inline]
pub fn division_precision() -> u32 {
    DIVISION_PRECISION.load(Ordering::Relaxed)
}

/// Sets the number of fractional digits kept by inexact divisions.
pub fn set_division_precision(precision: u32) {
    DIVISION_PRECISION.store(precision, Ordering::Relaxed);
}

/// Whether `Decimal::marshal_json` emits a bare JSON number instead of a quoted string.
#[inline]
pub fn marshal_json_without_quotes() -> bool {
    MARSHAL_JSON_WITHOUT_QUOTES.load(Ordering::Relaxed)
}

/// Switches `Decimal::marshal_json` between quoted (the default) and unquoted output.
pub fn set_marshal_json_without_quotes(without_quotes: bool) {
    MARSHAL_JSON_WITHOUT_QUOTES.store(without_quotes, Ordering::Relaxed);
}
