//! Dollar-neutral leg sizing.

use engine::Signal;
use market::{OrderSide, Pair};

use crate::types::LegOrder;

/// Whole shares of one leg affordable with half of `budget` at `price`.
///
/// Returns 0 for a non-positive or non-finite price or budget, so a broken
/// quote never produces an order.
pub fn leg_quantity(budget: f64, price: f64) -> u64 {
    if !budget.is_finite() || !price.is_finite() || budget <= 0.0 || price <= 0.0 {
        return 0;
    }
    let qty = ((budget / 2.0) / price).floor();
    if qty >= u64::MAX as f64 { u64::MAX } else { qty as u64 }
}

/// Entry legs for a spread signal.
///
/// Long spread buys S1 and sells S2; short spread does the opposite. `Close`
/// opens nothing.
pub fn plan_spread_orders(pair: &Pair, signal: Signal) -> Vec<LegOrder> {
    let s1_side = match signal {
        Signal::Long => OrderSide::Buy,
        Signal::Short => OrderSide::Sell,
        Signal::Close => return Vec::new(),
    };

    vec![
        LegOrder {
            symbol: pair.s1.clone(),
            side: s1_side,
        },
        LegOrder {
            symbol: pair.s2.clone(),
            side: s1_side.opposite(),
        },
    ]
}
