use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::values::{Price, Quantity};

/// One snapshot of trading activity for an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyDemandPoint {
    pub timestamp: DateTime<Utc>,
    /// Units offered for sale
    pub supply: Quantity,
    /// Units requested by buyers
    pub demand: Quantity,
    pub clearing_price: Price,
    /// Units actually traded
    pub volume: Quantity,
}

impl SupplyDemandPoint {
    /// Traded value (clearing price * volume)
    pub fn value(&self) -> f64 {
        self.clearing_price * self.volume as f64
    }
}
