//! Precomputed text for the values that dominate real workloads: every cent from -1000.00 to
//! 1000.00.
//!
//! The table is built once, on first use or by an explicit call to [`init`], and is read-only
//! afterwards.

use crate::{
    constants::{CACHE_ENTRIES, CACHE_LIMIT, CACHE_STEP},
    str::to_str_fixed,
};

use arrayvec::ArrayString;

// "-1000.00" is the longest cached rendering.
const ENTRY_CAPACITY: usize = 8;

lazy_static! {
    static ref TABLE: Box<[ArrayString<ENTRY_CAPACITY>]> = build();
}

fn build() -> Box<[ArrayString<ENTRY_CAPACITY>]> {
    (0..CACHE_ENTRIES)
        .map(|index| {
            let fixed = index as i64 * CACHE_STEP - CACHE_LIMIT;
            let mut entry = ArrayString::new();
            entry.push_str(to_str_fixed(fixed).as_str());
            entry
        })
        .collect()
}

/// Builds the table eagerly, so that the first formatted value does not pay for it.
pub fn init() {
    lazy_static::initialize(&TABLE);
}

/// Canonical text of `fixed`, if it is a whole number of cents within the cached range.
#[inline]
pub(crate) fn lookup(fixed: i64) -> Option<&'static str> {
    if !(-CACHE_LIMIT..=CACHE_LIMIT).contains(&fixed) || fixed % CACHE_STEP != 0 {
        return None;
    }
    let index = ((fixed + CACHE_LIMIT) / CACHE_STEP) as usize;
    TABLE.get(index).map(|entry| entry.as_str())
}
