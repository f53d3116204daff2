use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::OrderSide;
use crate::values::{ItemId, OrderId, ParticipantId, Price, Quantity};

/// Priced buy or sell interest submitted to a double auction
///
/// `quantity` is the amount still open. The matcher works on its own copies
/// and hands back partially filled copies, so a caller's order is never
/// mutated behind its back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoubleAuctionOrder {
    pub id: OrderId,
    pub item_id: ItemId,
    /// Player (or NPC) who placed the order
    pub participant_id: ParticipantId,
    pub side: OrderSide,
    /// Limit price: the most a bid pays, the least an ask accepts
    pub price: Price,
    pub quantity: Quantity,
    pub timestamp: DateTime<Utc>,
    /// Inactive orders are skipped entirely by the matcher
    pub active: bool,
}

impl DoubleAuctionOrder {
    /// Create a new active order with explicit timestamp
    pub fn new_with_time(
        id: impl Into<OrderId>,
        item_id: impl Into<ItemId>,
        participant_id: impl Into<ParticipantId>,
        side: OrderSide,
        price: Price,
        quantity: Quantity,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            item_id: item_id.into(),
            participant_id: participant_id.into(),
            side,
            price,
            quantity,
            timestamp,
            active: true,
        }
    }

    /// Create a new active bid using current system time
    pub fn bid(
        id: impl Into<OrderId>,
        item_id: impl Into<ItemId>,
        participant_id: impl Into<ParticipantId>,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self::new_with_time(
            id,
            item_id,
            participant_id,
            OrderSide::Bid,
            price,
            quantity,
            Utc::now(),
        )
    }

    /// Create a new active ask using current system time
    pub fn ask(
        id: impl Into<OrderId>,
        item_id: impl Into<ItemId>,
        participant_id: impl Into<ParticipantId>,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self::new_with_time(
            id,
            item_id,
            participant_id,
            OrderSide::Ask,
            price,
            quantity,
            Utc::now(),
        )
    }

    /// Builder-style deactivation, mostly useful when assembling order lists
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Returns true if the order still has open quantity
    pub fn is_open(&self) -> bool {
        self.quantity > 0
    }

    /// Returns true if the order can take part in matching
    pub fn is_matchable(&self) -> bool {
        self.active && self.is_open()
    }

    /// Limit price times open quantity
    pub fn notional(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_side_and_activity() {
        let bid = DoubleAuctionOrder::bid("b1", "iron-ore", "p1", 100.0, 5);
        let ask = DoubleAuctionOrder::ask("a1", "iron-ore", "p2", 90.0, 3);

        assert_eq!(bid.side, OrderSide::Bid);
        assert_eq!(ask.side, OrderSide::Ask);
        assert!(bid.active && ask.active);
        assert!(bid.is_matchable());
        assert_eq!(ask.notional(), 270.0);
    }

    #[test]
    fn test_inactive_or_empty_orders_are_not_matchable() {
        let inactive = DoubleAuctionOrder::bid("b1", "iron-ore", "p1", 100.0, 5).inactive();
        let empty = DoubleAuctionOrder::ask("a1", "iron-ore", "p2", 90.0, 0);

        assert!(!inactive.is_matchable());
        assert!(!empty.is_matchable());
        assert!(!empty.is_open());
    }

    #[test]
    fn test_side_serializes_lowercase() {
        let bid = DoubleAuctionOrder::bid("b1", "iron-ore", "p1", 100.0, 5);
        let json = serde_json::to_string(&bid).unwrap();
        assert!(json.contains("\"side\":\"bid\""));
    }
}
