use serde::{Deserialize, Serialize};

use super::{DoubleAuctionOrder, ExecutedTrade};
use crate::values::{ItemId, Price, Quantity};

/// Outcome of one double-auction run for a single item
///
/// Produced fresh on every matching call and never stored by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketClearingResult {
    pub item_id: ItemId,
    /// Volume-weighted average of the executed trade prices, 0 without trades
    pub clearing_price: Price,
    pub executed_trades: Vec<ExecutedTrade>,
    /// Active bids left with open quantity, best price first
    pub remaining_bids: Vec<DoubleAuctionOrder>,
    /// Active asks left with open quantity, best price first
    pub remaining_asks: Vec<DoubleAuctionOrder>,
    /// Total matched quantity
    pub volume: Quantity,
    /// Matched volume relative to the mean offered volume, in [0, 1]
    pub market_efficiency: f64,
}

impl MarketClearingResult {
    /// Result with no trades and nothing left on the book
    pub fn empty(item_id: impl Into<ItemId>) -> Self {
        Self {
            item_id: item_id.into(),
            clearing_price: 0.0,
            executed_trades: Vec::new(),
            remaining_bids: Vec::new(),
            remaining_asks: Vec::new(),
            volume: 0,
            market_efficiency: 0.0,
        }
    }

    pub fn has_trades(&self) -> bool {
        !self.executed_trades.is_empty()
    }

    /// Sum of price * quantity over all executed trades
    pub fn total_value(&self) -> f64 {
        self.executed_trades.iter().map(|t| t.notional()).sum()
    }
}
