//! Supply/Demand History
//!
//! Bounded, append-only series of clearing snapshots per item. Once an
//! item's series is full the oldest point is evicted first.

use std::collections::{HashMap, VecDeque};

use bazaar_core::{ItemId, Price, SupplyDemandPoint, Timestamp};

#[derive(Debug)]
pub struct SupplyDemandHistory {
    capacity: usize,
    series: HashMap<ItemId, VecDeque<SupplyDemandPoint>>,
}

impl SupplyDemandHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            series: HashMap::new(),
        }
    }

    /// Append a point, returning the evicted oldest point if the series was full
    pub fn record(&mut self, item_id: &str, point: SupplyDemandPoint) -> Option<SupplyDemandPoint> {
        let capacity = self.capacity;
        let series = self
            .series
            .entry(item_id.to_string())
            .or_insert_with(|| VecDeque::with_capacity(capacity.min(64)));

        series.push_back(point);
        if series.len() > capacity {
            series.pop_front()
        } else {
            None
        }
    }

    /// All points for an item, oldest first
    pub fn points(&self, item_id: &str) -> impl Iterator<Item = &SupplyDemandPoint> {
        self.series.get(item_id).into_iter().flatten()
    }

    /// Points strictly newer than `cutoff`, oldest first
    pub fn since(&self, item_id: &str, cutoff: Timestamp) -> Vec<&SupplyDemandPoint> {
        self.points(item_id)
            .filter(|p| p.timestamp > cutoff)
            .collect()
    }

    /// Clearing prices for an item, oldest first
    pub fn prices(&self, item_id: &str) -> Vec<Price> {
        self.points(item_id).map(|p| p.clearing_price).collect()
    }

    pub fn latest(&self, item_id: &str) -> Option<&SupplyDemandPoint> {
        self.series.get(item_id).and_then(|s| s.back())
    }

    pub fn len(&self, item_id: &str) -> usize {
        self.series.get(item_id).map_or(0, |s| s.len())
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.series.keys()
    }
}
