use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::values::{ItemId, Quantity};

/// Direction of a price trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
}

impl TrendDirection {
    /// Classify a regression slope; anything within `threshold` of zero is stable
    pub fn from_slope(slope: f64, threshold: f64) -> Self {
        if slope > threshold {
            TrendDirection::Rising
        } else if slope < -threshold {
            TrendDirection::Falling
        } else {
            TrendDirection::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "rising",
            TrendDirection::Falling => "falling",
            TrendDirection::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trend of one item's clearing prices over an analytics window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTrend {
    pub item_id: ItemId,
    pub direction: TrendDirection,
    /// Goodness of fit of the trend line, in [0.1, 1]
    pub confidence: f64,
    /// Slope scaled to percent
    pub predicted_change_percent: f64,
    /// Raw least-squares slope (price units per point)
    pub slope: f64,
}

/// Aggregated market statistics for an item over a time window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalytics {
    pub last_calculated: DateTime<Utc>,
    pub timeframe_hours: u32,
    /// 0..=100
    pub market_health: f64,
    pub price_trends: HashMap<ItemId, PriceTrend>,
    /// Traded volume keyed by UTC hour of day (0-23)
    pub volume_by_hour: BTreeMap<u32, Quantity>,
    pub total_volume: Quantity,
    pub total_value: f64,
    /// Number of history points inside the window
    pub data_points: usize,
    /// Variance of the most recent clearing prices in the window
    pub price_volatility: f64,
}

impl MarketAnalytics {
    /// Analytics for a window without any data
    pub fn empty(last_calculated: DateTime<Utc>, timeframe_hours: u32) -> Self {
        Self {
            last_calculated,
            timeframe_hours,
            market_health: 0.0,
            price_trends: HashMap::new(),
            volume_by_hour: BTreeMap::new(),
            total_volume: 0,
            total_value: 0.0,
            data_points: 0,
            price_volatility: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data_points == 0
    }

    pub fn trend(&self, item_id: &str) -> Option<&PriceTrend> {
        self.price_trends.get(item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_thresholds() {
        assert_eq!(TrendDirection::from_slope(0.5, 0.01), TrendDirection::Rising);
        assert_eq!(TrendDirection::from_slope(-0.5, 0.01), TrendDirection::Falling);
        assert_eq!(TrendDirection::from_slope(0.01, 0.01), TrendDirection::Stable);
        assert_eq!(TrendDirection::from_slope(-0.01, 0.01), TrendDirection::Stable);
        assert_eq!(TrendDirection::from_slope(0.0, 0.01), TrendDirection::Stable);
    }

    #[test]
    fn test_direction_labels() {
        assert_eq!(TrendDirection::Rising.to_string(), "rising");
        assert_eq!(TrendDirection::Falling.to_string(), "falling");
        assert_eq!(TrendDirection::Stable.to_string(), "stable");
    }

    #[test]
    fn test_empty_analytics() {
        let now = Utc::now();
        let analytics = MarketAnalytics::empty(now, 24);
        assert!(analytics.is_empty());
        assert_eq!(analytics.last_calculated, now);
        assert!(analytics.trend("iron-ore").is_none());
    }
}
