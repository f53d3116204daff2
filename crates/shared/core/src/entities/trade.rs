use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::values::{OrderId, ParticipantId, Price, Quantity};

/// Unique identifier for an executed trade
pub type TradeId = Uuid;

/// Trade produced by pairing a crossing bid and ask
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutedTrade {
    pub id: TradeId,
    pub buyer_id: ParticipantId,
    pub seller_id: ParticipantId,
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
    pub timestamp: DateTime<Utc>,
}

impl ExecutedTrade {
    /// Create a new trade with explicit timestamp
    pub fn new_with_time(
        buyer_id: impl Into<ParticipantId>,
        seller_id: impl Into<ParticipantId>,
        buy_order_id: impl Into<OrderId>,
        sell_order_id: impl Into<OrderId>,
        price: Price,
        quantity: Quantity,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            buyer_id: buyer_id.into(),
            seller_id: seller_id.into(),
            buy_order_id: buy_order_id.into(),
            sell_order_id: sell_order_id.into(),
            price,
            quantity,
            timestamp,
        }
    }

    /// Returns the notional value of the trade (price * quantity)
    pub fn notional(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
