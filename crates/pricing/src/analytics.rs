//! Market analytics over a window of supply/demand history

use std::collections::HashMap;

use bazaar_core::{MarketAnalytics, PriceTrend, Quantity, SupplyDemandPoint, Timestamp};
use chrono::Timelike;

use crate::config::PricingConfig;
use crate::trend;

/// Aggregate the points of one item that fall inside the analytics window
///
/// `window` must already be filtered to the timeframe and ordered oldest
/// first. An empty window yields empty analytics stamped with `now`.
pub fn summarize(
    item_id: &str,
    window: &[&SupplyDemandPoint],
    now: Timestamp,
    timeframe_hours: u32,
    config: &PricingConfig,
) -> MarketAnalytics {
    let mut analytics = MarketAnalytics::empty(now, timeframe_hours);
    if window.is_empty() {
        return analytics;
    }

    let prices: Vec<f64> = window.iter().map(|p| p.clearing_price).collect();
    let slope = trend::slope(&prices);

    let price_trend = PriceTrend {
        item_id: item_id.to_string(),
        direction: trend::classify(slope, config.trend_threshold),
        confidence: trend::confidence(&prices),
        predicted_change_percent: slope * 100.0,
        slope,
    };
    analytics.price_trends = HashMap::from([(item_id.to_string(), price_trend)]);

    for point in window {
        let bucket = analytics.volume_by_hour.entry(point.timestamp.hour()).or_insert(0);
        *bucket = bucket.saturating_add(point.volume);
    }

    analytics.total_volume = window
        .iter()
        .fold(0, |total: Quantity, p| total.saturating_add(p.volume));
    analytics.total_value = window.iter().map(|p| p.value()).sum();
    analytics.data_points = window.len();
    analytics.price_volatility = trend::volatility(&prices, config.volatility_window);

    let average_volume = analytics.total_volume as f64 / window.len() as f64;
    analytics.market_health = (average_volume * config.health_volume_factor).min(100.0);

    analytics
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bazaar_core::TrendDirection;
    use chrono::{Duration, TimeZone, Utc};

    const ITEM: &str = "cyberdeck";

    fn point(at: Timestamp, price: f64, volume: u64) -> SupplyDemandPoint {
        SupplyDemandPoint {
            timestamp: at,
            supply: 20,
            demand: 25,
            clearing_price: price,
            volume,
        }
    }

    #[test]
    fn test_empty_window() {
        let now = Utc::now();
        let analytics = summarize(ITEM, &[], now, 24, &PricingConfig::default());

        assert!(analytics.is_empty());
        assert_eq!(analytics.last_calculated, now);
        assert_eq!(analytics.timeframe_hours, 24);
        assert!(analytics.price_trends.is_empty());
    }

    #[test]
    fn test_aggregates_window() {
        let base = Utc.with_ymd_and_hms(2024, 5, 10, 8, 15, 0).unwrap();
        let points = [
            point(base, 100.0, 2),
            point(base + Duration::minutes(30), 101.0, 4),
            point(base + Duration::hours(1), 102.0, 6),
            point(base + Duration::hours(2), 103.0, 8),
        ];
        let window: Vec<&SupplyDemandPoint> = points.iter().collect();
        let now = base + Duration::hours(3);

        let analytics = summarize(ITEM, &window, now, 24, &PricingConfig::default());

        let trend = analytics.trend(ITEM).unwrap();
        assert_eq!(trend.direction, TrendDirection::Rising);
        assert_relative_eq!(trend.slope, 1.0);
        assert_relative_eq!(trend.predicted_change_percent, 100.0);

        assert_eq!(analytics.volume_by_hour.get(&8), Some(&6));
        assert_eq!(analytics.volume_by_hour.get(&9), Some(&6));
        assert_eq!(analytics.volume_by_hour.get(&10), Some(&8));
        assert_eq!(analytics.total_volume, 20);
        assert_relative_eq!(
            analytics.total_value,
            100.0 * 2.0 + 101.0 * 4.0 + 102.0 * 6.0 + 103.0 * 8.0
        );
        assert_eq!(analytics.data_points, 4);
        // average volume 5 -> health 50
        assert_relative_eq!(analytics.market_health, 50.0);
    }

    #[test]
    fn test_health_is_capped() {
        let now = Utc::now();
        let points = [point(now, 10.0, 500)];
        let window: Vec<&SupplyDemandPoint> = points.iter().collect();

        let analytics = summarize(ITEM, &window, now, 1, &PricingConfig::default());
        assert_relative_eq!(analytics.market_health, 100.0);
        assert_eq!(analytics.trend(ITEM).unwrap().direction, TrendDirection::Stable);
    }

    #[test]
    fn test_hour_of_day_wraps_across_days() {
        let base = Utc.with_ymd_and_hms(2024, 5, 10, 23, 0, 0).unwrap();
        let points = [
            point(base, 10.0, 1),
            point(base + Duration::hours(24), 10.0, 2),
            point(base + Duration::hours(1), 10.0, 3),
        ];
        let window: Vec<&SupplyDemandPoint> = points.iter().collect();

        let analytics = summarize(ITEM, &window, base, 72, &PricingConfig::default());
        assert_eq!(analytics.volume_by_hour.get(&23), Some(&3));
        assert_eq!(analytics.volume_by_hour.get(&0), Some(&3));
        assert_eq!(analytics.volume_by_hour.len(), 2);
    }

    #[test]
    fn test_volume_totals_saturate() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let points = [point(now, 1.0, u64::MAX), point(now, 1.0, 10)];
        let window: Vec<&SupplyDemandPoint> = points.iter().collect();

        let analytics = summarize(ITEM, &window, now, 24, &PricingConfig::default());
        assert_eq!(analytics.total_volume, u64::MAX);
        assert_eq!(analytics.volume_by_hour.get(&12), Some(&u64::MAX));
        assert_relative_eq!(analytics.market_health, 100.0);
    }
}
