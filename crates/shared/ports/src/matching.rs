use bazaar_core::{DoubleAuctionOrder, MarketClearingResult, Price, Timestamp};

use crate::error::MatchingResult;

/// Port for double-auction matching algorithms
///
/// Implementations clear one item's bids against its asks in a single call.
/// They must not keep per-call state: the pricing engine owns everything
/// that outlives a run (beliefs, history, clearing prices).
pub trait AuctionMatcher: Send + Sync {
    /// Check whether a bid and an ask cross
    fn can_match(&self, bid: &DoubleAuctionOrder, ask: &DoubleAuctionOrder) -> bool;

    /// Price at which a crossing pair executes
    fn execution_price(&self, bid: &DoubleAuctionOrder, ask: &DoubleAuctionOrder) -> Price;

    /// Match a batch of bids and asks for one item
    ///
    /// Caller orders are left untouched; partially filled copies come back
    /// in the result's remaining lists.
    fn clear(
        &self,
        item_id: &str,
        bids: &[DoubleAuctionOrder],
        asks: &[DoubleAuctionOrder],
        now: Timestamp,
    ) -> MatchingResult<MarketClearingResult>;

    /// Get the name of the algorithm
    fn name(&self) -> &str;
}
