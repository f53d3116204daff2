use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::values::{ItemId, Price};

/// The engine's running estimate of an item's fair price
///
/// Created on first use and only changed by folding trades into it. The
/// update rule lives with the pricing engine; this is the record it keeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBelief {
    pub item_id: ItemId,
    /// Point estimate of fair price, always strictly positive
    pub current_belief: Price,
    /// Uncertainty of the estimate, never negative
    pub belief_variance: f64,
    /// Number of trades folded in since the belief was seeded
    pub trades_count: u64,
    /// Adaptive step size, lowered once the belief matures
    pub learning_rate: f64,
    /// Trust in the estimate, in [0, 1]
    pub confidence: f64,
    pub last_updated: DateTime<Utc>,
}

impl PriceBelief {
    /// Standard deviation of the belief
    pub fn std_dev(&self) -> f64 {
        self.belief_variance.max(0.0).sqrt()
    }
}
