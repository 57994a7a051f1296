use crate::Decimal;

use core::ops::RangeInclusive;
use proptest::arbitrary::{Arbitrary, StrategyFor};
use proptest::prelude::*;
use proptest::strategy::Map;

impl Arbitrary for Decimal {
    type Parameters = ();
    type Strategy = Map<(StrategyFor<i64>, RangeInclusive<i64>), fn((i64, i64)) -> Self>;

    fn arbitrary_with(_parameters: Self::Parameters) -> Self::Strategy {
        // An arbitrary coefficient with an exponent between -20 and 6 produces inline values
        // (mostly around -12) as well as values that need the fallback engine
        (any::<i64>(), -20i64..=6).prop_map(|(coefficient, exp)| Decimal::new(coefficient, exp))
    }
}
