//! Property tests for the double-auction matcher
//!
//! Random bid/ask books are cleared and the invariants every run must
//! respect are checked: volume bounds, trade prices inside the crossing
//! limits, efficiency in [0, 1], and no-cross books passing through intact.

use std::collections::HashMap;

use bazaar_core::{DoubleAuctionOrder, MarketClearingResult};
use bazaar_matching::{AuctionMatcher, DoubleAuctionMatcher};
use chrono::Utc;
use proptest::prelude::*;

const ITEM: &str = "neural-chip";

fn orders(prefix: &'static str, is_bid: bool) -> impl Strategy<Value = Vec<DoubleAuctionOrder>> {
    prop::collection::vec((1u32..500, 1u64..50, any::<bool>()), 0..12).prop_map(move |levels| {
        levels
            .into_iter()
            .enumerate()
            .map(|(i, (price_cents, qty, active))| {
                let id = format!("{prefix}-{i}");
                let price = price_cents as f64 / 4.0;
                let order = if is_bid {
                    DoubleAuctionOrder::bid(id, ITEM, format!("player-{i}"), price, qty)
                } else {
                    DoubleAuctionOrder::ask(id, ITEM, format!("player-{i}"), price, qty)
                };
                if active { order } else { order.inactive() }
            })
            .collect()
    })
}

fn clear(bids: &[DoubleAuctionOrder], asks: &[DoubleAuctionOrder]) -> MarketClearingResult {
    DoubleAuctionMatcher::new()
        .clear(ITEM, bids, asks, Utc::now())
        .unwrap()
}

fn active_volume(orders: &[DoubleAuctionOrder]) -> u64 {
    orders.iter().filter(|o| o.active).map(|o| o.quantity).sum()
}

proptest! {
    #[test]
    fn prop_volume_never_exceeds_the_smaller_side(
        bids in orders("bid", true),
        asks in orders("ask", false),
    ) {
        let result = clear(&bids, &asks);
        let traded: u64 = result.executed_trades.iter().map(|t| t.quantity).sum();

        prop_assert_eq!(traded, result.volume);
        prop_assert!(result.volume <= active_volume(&bids).min(active_volume(&asks)));
    }

    #[test]
    fn prop_trades_execute_between_limits(
        bids in orders("bid", true),
        asks in orders("ask", false),
    ) {
        let result = clear(&bids, &asks);
        let limits: HashMap<&str, f64> = bids
            .iter()
            .chain(asks.iter())
            .map(|o| (o.id.as_str(), o.price))
            .collect();

        for trade in &result.executed_trades {
            let bid_limit = limits[trade.buy_order_id.as_str()];
            let ask_limit = limits[trade.sell_order_id.as_str()];
            prop_assert!(trade.quantity > 0);
            prop_assert!(trade.price <= bid_limit);
            prop_assert!(trade.price >= ask_limit);
        }
    }

    #[test]
    fn prop_efficiency_is_bounded(
        bids in orders("bid", true),
        asks in orders("ask", false),
    ) {
        let result = clear(&bids, &asks);
        prop_assert!((0.0..=1.0).contains(&result.market_efficiency));
    }

    #[test]
    fn prop_volume_is_conserved_per_side(
        bids in orders("bid", true),
        asks in orders("ask", false),
    ) {
        let result = clear(&bids, &asks);
        let left_bids: u64 = result.remaining_bids.iter().map(|o| o.quantity).sum();
        let left_asks: u64 = result.remaining_asks.iter().map(|o| o.quantity).sum();

        prop_assert_eq!(left_bids + result.volume, active_volume(&bids));
        prop_assert_eq!(left_asks + result.volume, active_volume(&asks));
        prop_assert!(result.remaining_bids.iter().all(|o| o.active && o.quantity > 0));
        prop_assert!(result.remaining_asks.iter().all(|o| o.active && o.quantity > 0));
    }

    #[test]
    fn prop_no_cross_is_a_no_op(
        bid_levels in prop::collection::vec((1u32..100, 1u64..20), 1..8),
        ask_levels in prop::collection::vec((101u32..200, 1u64..20), 1..8),
    ) {
        let bids: Vec<_> = bid_levels
            .iter()
            .enumerate()
            .map(|(i, (p, q))| DoubleAuctionOrder::bid(format!("b{i}"), ITEM, "buyer", *p as f64, *q))
            .collect();
        let asks: Vec<_> = ask_levels
            .iter()
            .enumerate()
            .map(|(i, (p, q))| DoubleAuctionOrder::ask(format!("a{i}"), ITEM, "seller", *p as f64, *q))
            .collect();

        let result = clear(&bids, &asks);

        prop_assert!(result.executed_trades.is_empty());
        prop_assert_eq!(result.market_efficiency, 0.0);
        prop_assert_eq!(result.remaining_bids.len(), bids.len());
        prop_assert_eq!(result.remaining_asks.len(), asks.len());
        for order in result.remaining_bids.iter().chain(result.remaining_asks.iter()) {
            let original = bids.iter().chain(asks.iter()).find(|o| o.id == order.id).unwrap();
            prop_assert_eq!(order.quantity, original.quantity);
        }
    }
}
