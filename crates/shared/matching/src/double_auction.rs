use bazaar_core::{
    DoubleAuctionOrder, ExecutedTrade, MarketClearingResult, OrderSide, Price, Quantity, Timestamp,
};
use bazaar_ports::{AuctionMatcher, MatchingError, MatchingResult};
use log::debug;

/// Price-time priority double auction (single greedy pass)
///
/// Orders are matched based on:
/// 1. Best price (highest bid, lowest ask)
/// 2. Submission order among equal prices
///
/// Each crossing pair executes at the midpoint of the two limits. Matching
/// stops at the first pair that does not cross: both books are sorted, so
/// nothing behind that pair can cross either.
pub struct DoubleAuctionMatcher;

impl DoubleAuctionMatcher {
    pub fn new() -> Self {
        Self
    }

    fn validate(item_id: &str, expected: OrderSide, order: &DoubleAuctionOrder) -> MatchingResult<()> {
        if order.side != expected {
            return Err(MatchingError::WrongSide {
                order_id: order.id.clone(),
                expected,
                found: order.side,
            });
        }

        if order.item_id != item_id {
            return Err(MatchingError::ItemMismatch {
                order_id: order.id.clone(),
                expected: item_id.to_string(),
                found: order.item_id.clone(),
            });
        }

        if !order.price.is_finite() || order.price <= 0.0 {
            return Err(MatchingError::InvalidOrder {
                order_id: order.id.clone(),
                reason: format!("limit price must be positive and finite, got {}", order.price),
            });
        }

        if order.quantity == 0 {
            return Err(MatchingError::InvalidOrder {
                order_id: order.id.clone(),
                reason: "quantity must be positive".to_string(),
            });
        }

        Ok(())
    }

    /// Copy the active orders of one side into priority order
    ///
    /// The sort is stable, so equal prices keep their submission order. The
    /// side's total active quantity must fit in a `Quantity`, which bounds
    /// the matched volume as well.
    fn build_book(
        item_id: &str,
        side: OrderSide,
        orders: &[DoubleAuctionOrder],
    ) -> MatchingResult<Vec<DoubleAuctionOrder>> {
        let mut book = Vec::with_capacity(orders.len());
        let mut total: Quantity = 0;
        for order in orders.iter().filter(|o| o.active) {
            Self::validate(item_id, side, order)?;
            total = total
                .checked_add(order.quantity)
                .ok_or_else(|| MatchingError::InvalidOrder {
                    order_id: order.id.clone(),
                    reason: format!("total {} volume exceeds {}", side, Quantity::MAX),
                })?;
            book.push(order.clone());
        }

        match side {
            OrderSide::Bid => book.sort_by(|a, b| b.price.total_cmp(&a.price)),
            OrderSide::Ask => book.sort_by(|a, b| a.price.total_cmp(&b.price)),
        }

        Ok(book)
    }
}

impl Default for DoubleAuctionMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AuctionMatcher for DoubleAuctionMatcher {
    fn name(&self) -> &str {
        "Double Auction (Price-Time Priority)"
    }

    fn can_match(&self, bid: &DoubleAuctionOrder, ask: &DoubleAuctionOrder) -> bool {
        bid.is_matchable() && ask.is_matchable() && bid.price >= ask.price
    }

    fn execution_price(&self, bid: &DoubleAuctionOrder, ask: &DoubleAuctionOrder) -> Price {
        (bid.price + ask.price) / 2.0
    }

    fn clear(
        &self,
        item_id: &str,
        bids: &[DoubleAuctionOrder],
        asks: &[DoubleAuctionOrder],
        now: Timestamp,
    ) -> MatchingResult<MarketClearingResult> {
        let mut bids = Self::build_book(item_id, OrderSide::Bid, bids)?;
        let mut asks = Self::build_book(item_id, OrderSide::Ask, asks)?;

        // Offered volume is taken before any fills
        let offered_demand: f64 = bids.iter().map(|o| o.quantity as f64).sum();
        let offered_supply: f64 = asks.iter().map(|o| o.quantity as f64).sum();

        let mut result = MarketClearingResult::empty(item_id);
        let (mut bid_idx, mut ask_idx) = (0, 0);

        while bid_idx < bids.len() && ask_idx < asks.len() {
            let (bid, ask) = (&bids[bid_idx], &asks[ask_idx]);
            if !self.can_match(bid, ask) {
                break;
            }

            let price = self.execution_price(bid, ask);
            let fill = bid.quantity.min(ask.quantity);
            let trade = ExecutedTrade::new_with_time(
                bid.participant_id.clone(),
                ask.participant_id.clone(),
                bid.id.clone(),
                ask.id.clone(),
                price,
                fill,
                now,
            );

            debug!(
                "Matched {} x{} @ {:.4}: bid {} ({:.4}) vs ask {} ({:.4})",
                item_id, fill, price, bid.id, bid.price, ask.id, ask.price
            );

            result.executed_trades.push(trade);
            result.volume += fill;

            bids[bid_idx].quantity -= fill;
            asks[ask_idx].quantity -= fill;

            if bids[bid_idx].quantity == 0 {
                bid_idx += 1;
            }
            if asks[ask_idx].quantity == 0 {
                ask_idx += 1;
            }
        }

        result.remaining_bids = bids.split_off(bid_idx);
        result.remaining_asks = asks.split_off(ask_idx);

        if result.volume > 0 {
            result.clearing_price = result.total_value() / result.volume as f64;
        }

        if offered_demand > 0.0 && offered_supply > 0.0 {
            let mean_offered = (offered_demand + offered_supply) / 2.0;
            result.market_efficiency = (result.volume as f64 / mean_offered).clamp(0.0, 1.0);
        }

        Ok(result)
    }
}
