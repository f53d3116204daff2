use std::collections::HashMap;
use std::sync::Arc;

use bazaar_clock::SystemClock;
use bazaar_core::{
    DoubleAuctionOrder, ItemId, MarketAnalytics, MarketClearingResult, Price, PriceBelief,
    Quantity, SupplyDemandPoint,
};
use bazaar_matching::DoubleAuctionMatcher;
use bazaar_ports::{AuctionMatcher, Clock, PricingError, PricingResult};
use chrono::Duration;
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::analytics;
use crate::belief::{BeliefStore, FoldOutcome};
use crate::config::PricingConfig;
use crate::history::SupplyDemandHistory;
use crate::trend;

/// Quoted market price for an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub item_id: ItemId,
    pub price: Price,
    pub confidence: f64,
}

/// Forecast of an item's price some hours ahead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePrediction {
    pub item_id: ItemId,
    pub price: Price,
    pub confidence: f64,
    pub hours_ahead: u32,
    /// False when there was too little history and the belief was returned as-is
    pub extrapolated: bool,
}

/// Supply and demand counts recorded alongside an auction's clearing price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketDepth {
    pub supply: Quantity,
    pub demand: Quantity,
}

impl MarketDepth {
    pub fn new(supply: Quantity, demand: Quantity) -> Self {
        Self { supply, demand }
    }

    /// Depth implied by an order batch: active ask volume is supply,
    /// active bid volume is demand
    pub fn offered(bids: &[DoubleAuctionOrder], asks: &[DoubleAuctionOrder]) -> Self {
        let active_volume = |orders: &[DoubleAuctionOrder]| -> Quantity {
            orders
                .iter()
                .filter(|o| o.active)
                .fold(0, |total: Quantity, o| total.saturating_add(o.quantity))
        };
        Self {
            supply: active_volume(asks),
            demand: active_volume(bids),
        }
    }
}

/// Everything guarded by the engine lock
struct MarketState {
    beliefs: BeliefStore,
    history: SupplyDemandHistory,
    clearing_prices: HashMap<ItemId, Price>,
}

/// Dynamic pricing engine and double-auction coordinator
///
/// Owns the per-item price beliefs, supply/demand history and last clearing
/// prices behind a single reader/writer lock. Queries take the read lock;
/// anything that changes state takes the write lock for its whole duration,
/// so an auction's match, belief fold and history append become visible
/// together or not at all.
pub struct PricingEngine {
    config: PricingConfig,
    clock: Arc<dyn Clock>,
    matcher: Box<dyn AuctionMatcher>,
    state: RwLock<MarketState>,
    /// Quote jitter source, kept apart so quoting stays a read-lock operation
    rng: Mutex<StdRng>,
}

impl PricingEngine {
    /// Create an engine with default parameters, wall-clock time and the
    /// price-time double auction
    pub fn new() -> Self {
        Self::build(
            PricingConfig::default(),
            Arc::new(SystemClock::new()),
            Box::new(DoubleAuctionMatcher::new()),
        )
    }

    /// Create with custom parameters
    pub fn with_config(config: PricingConfig) -> PricingResult<Self> {
        Self::with_components(
            config,
            Arc::new(SystemClock::new()),
            Box::new(DoubleAuctionMatcher::new()),
        )
    }

    /// Create with custom parameters, time source and matching algorithm
    pub fn with_components(
        config: PricingConfig,
        clock: Arc<dyn Clock>,
        matcher: Box<dyn AuctionMatcher>,
    ) -> PricingResult<Self> {
        config.validate()?;
        Ok(Self::build(config, clock, matcher))
    }

    fn build(config: PricingConfig, clock: Arc<dyn Clock>, matcher: Box<dyn AuctionMatcher>) -> Self {
        let rng = match config.noise_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            "Pricing engine ready: matcher={}, clock={}, history_capacity={}",
            matcher.name(),
            clock.name(),
            config.history_capacity
        );

        Self {
            state: RwLock::new(MarketState {
                beliefs: BeliefStore::new(),
                history: SupplyDemandHistory::new(config.history_capacity),
                clearing_prices: HashMap::new(),
            }),
            rng: Mutex::new(rng),
            config,
            clock,
            matcher,
        }
    }

    /// Seed (or reset) an item's belief from a reference price
    pub fn initialize_belief(&self, item_id: &str, price: Price) -> PricingResult<PriceBelief> {
        let mut state = self.state.write();
        let now = self.clock.now();
        state
            .beliefs
            .initialize(item_id, price, now, &self.config)
            .cloned()
            .inspect_err(|e| warn!("Rejected belief initialization for {}: {}", item_id, e))
    }

    /// Fold an observed trade into the item's belief, seeding it if absent
    pub fn fold_trade(&self, item_id: &str, price: Price, volume: Quantity) -> PricingResult<FoldOutcome> {
        let mut state = self.state.write();
        let now = self.clock.now();
        state
            .beliefs
            .fold_trade(item_id, price, volume, now, &self.config)
            .inspect_err(|e| warn!("Rejected trade for {}: {}", item_id, e))
    }

    /// Quote the current market price
    ///
    /// The belief is jittered by gaussian noise proportional to its standard
    /// deviation, so quotes are not perfectly predictable, and floored at the
    /// configured minimum price.
    pub fn current_price(&self, item_id: &str) -> PricingResult<PriceQuote> {
        let state = self.state.read();
        let belief = state
            .beliefs
            .get(item_id)
            .ok_or_else(|| PricingError::NotFound(item_id.to_string()))?;

        let z: f64 = self.rng.lock().sample(StandardNormal);
        let noise = z * belief.std_dev() * self.config.quote_noise_scale;
        let price = (belief.current_belief * (1.0 + noise)).max(self.config.price_floor);

        Ok(PriceQuote {
            item_id: item_id.to_string(),
            price,
            confidence: belief.confidence,
        })
    }

    /// Forecast the price `hours_ahead` hours out
    ///
    /// Extrapolates the clearing-price trend once enough history exists.
    /// Confidence decays exponentially with the horizon.
    pub fn predict_price(&self, item_id: &str, hours_ahead: u32) -> PricingResult<PricePrediction> {
        let state = self.state.read();
        let belief = state
            .beliefs
            .get(item_id)
            .ok_or_else(|| PricingError::NotFound(item_id.to_string()))?;

        if state.history.len(item_id) < self.config.min_prediction_points {
            return Ok(PricePrediction {
                item_id: item_id.to_string(),
                price: belief.current_belief,
                confidence: belief.confidence * 0.5,
                hours_ahead,
                extrapolated: false,
            });
        }

        let slope = trend::slope(&state.history.prices(item_id));
        let horizon = hours_ahead as f64;
        let price = (belief.current_belief + slope * horizon).max(self.config.price_floor);
        let confidence = belief.confidence * (-self.config.prediction_decay * horizon).exp();

        Ok(PricePrediction {
            item_id: item_id.to_string(),
            price,
            confidence,
            hours_ahead,
            extrapolated: true,
        })
    }

    /// Clear a batch of bids and asks for one item
    ///
    /// Supply and demand for the history point are taken from the active
    /// volume on each side of the batch.
    pub fn execute_double_auction(
        &self,
        item_id: &str,
        bids: &[DoubleAuctionOrder],
        asks: &[DoubleAuctionOrder],
    ) -> PricingResult<MarketClearingResult> {
        self.run_auction(item_id, bids, asks, MarketDepth::offered(bids, asks))
    }

    /// Clear a batch of bids and asks, recording caller-supplied supply and demand
    pub fn execute_double_auction_with_depth(
        &self,
        item_id: &str,
        bids: &[DoubleAuctionOrder],
        asks: &[DoubleAuctionOrder],
        depth: MarketDepth,
    ) -> PricingResult<MarketClearingResult> {
        self.run_auction(item_id, bids, asks, depth)
    }

    fn run_auction(
        &self,
        item_id: &str,
        bids: &[DoubleAuctionOrder],
        asks: &[DoubleAuctionOrder],
        depth: MarketDepth,
    ) -> PricingResult<MarketClearingResult> {
        let mut state = self.state.write();
        let now = self.clock.now();

        let result = self
            .matcher
            .clear(item_id, bids, asks, now)
            .inspect_err(|e| warn!("Rejected auction for {}: {}", item_id, e))?;

        if result.has_trades() {
            let outcome = state.beliefs.fold_trade(
                item_id,
                result.clearing_price,
                result.volume,
                now,
                &self.config,
            )?;
            debug!("Auction fold for {}: {:?}", item_id, outcome);

            state
                .clearing_prices
                .insert(item_id.to_string(), result.clearing_price);
            state.history.record(
                item_id,
                SupplyDemandPoint {
                    timestamp: now,
                    supply: depth.supply,
                    demand: depth.demand,
                    clearing_price: result.clearing_price,
                    volume: result.volume,
                },
            );
        }

        info!(
            "Auction cleared: item={}, trades={}, volume={}, clearing_price={:.4}, efficiency={:.3}, remaining_bids={}, remaining_asks={}",
            item_id,
            result.executed_trades.len(),
            result.volume,
            result.clearing_price,
            result.market_efficiency,
            result.remaining_bids.len(),
            result.remaining_asks.len()
        );

        Ok(result)
    }

    /// Append a supply/demand snapshot for an item
    pub fn update_supply_demand(
        &self,
        item_id: &str,
        supply: Quantity,
        demand: Quantity,
        clearing_price: Price,
        volume: Quantity,
    ) -> PricingResult<()> {
        if !clearing_price.is_finite() || clearing_price < 0.0 {
            warn!(
                "Rejected supply/demand update for {}: clearing price {}",
                item_id, clearing_price
            );
            return Err(PricingError::InvalidInput(format!(
                "clearing price must be finite and non-negative, got {clearing_price}"
            )));
        }

        let mut state = self.state.write();
        let point = SupplyDemandPoint {
            timestamp: self.clock.now(),
            supply,
            demand,
            clearing_price,
            volume,
        };
        if state.history.record(item_id, point).is_some() {
            debug!("History for {} at capacity, evicted oldest point", item_id);
        }

        Ok(())
    }

    /// Trend, volume and health statistics over the last `timeframe_hours`
    ///
    /// A timeframe reaching past the earliest representable time covers the
    /// item's whole history.
    pub fn calculate_market_analytics(&self, item_id: &str, timeframe_hours: u32) -> MarketAnalytics {
        let state = self.state.read();
        let now = self.clock.now();

        let window = match now.checked_sub_signed(Duration::hours(i64::from(timeframe_hours))) {
            Some(cutoff) => state.history.since(item_id, cutoff),
            None => state.history.points(item_id).collect(),
        };
        analytics::summarize(item_id, &window, now, timeframe_hours, &self.config)
    }

    /// Volume-weighted price of the item's most recent auction with trades
    pub fn last_clearing_price(&self, item_id: &str) -> Option<Price> {
        self.state.read().clearing_prices.get(item_id).copied()
    }

    /// Snapshot of the item's belief record
    pub fn belief(&self, item_id: &str) -> Option<PriceBelief> {
        self.state.read().beliefs.get(item_id).cloned()
    }

    /// Snapshot of the item's supply/demand history, oldest first
    pub fn history(&self, item_id: &str) -> Vec<SupplyDemandPoint> {
        self.state.read().history.points(item_id).cloned().collect()
    }

    /// Items with a belief or history, sorted
    pub fn tracked_items(&self) -> Vec<ItemId> {
        let state = self.state.read();
        let mut items: Vec<ItemId> = state
            .beliefs
            .item_ids()
            .chain(state.history.item_ids())
            .cloned()
            .collect();
        items.sort();
        items.dedup();
        items
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new()
    }
}
