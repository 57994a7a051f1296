// Kernels operating directly on the fixed-point encoding. None of these allocate; they report
// `CalculationResult::Overflow` whenever the exact result does not fit the fast representation
// and leave it to the caller to redo the operation on the fallback engine.

mod add;
mod div;
mod mul;
mod round;

pub(crate) use add::{add_impl, sub_impl};
pub(crate) use div::{div_impl, div_round_exact, quo_rem_exact};
pub(crate) use mul::mul_impl;
pub(crate) use round::{round_exact, round_impl};

/// Outcome of a fast-path kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CalculationResult {
    Ok(i64),
    Overflow,
    DivByZero,
}

// Emits a trace event when an operation leaves the fast path.
macro_rules! trace_fallback {
    ($op:expr) => {
        #[cfg(feature = "tracing")]
        tracing::trace!(op = $op, "fast path unavailable, delegating to the fallback engine");
    };
}

pub(crate) use trace_fallback;
