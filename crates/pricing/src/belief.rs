//! Belief Store
//!
//! Per-item fair-price estimates and the recursive update that folds
//! observed trades into them. The store is plain data; the engine wraps
//! it in its lock.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use bazaar_core::{ItemId, Price, PriceBelief, Quantity, Timestamp};
use bazaar_ports::{PricingError, PricingResult};
use log::{debug, info};

use crate::config::PricingConfig;

/// What folding a trade did to the belief
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FoldOutcome {
    /// No belief existed; the trade price became the seed
    Seeded,
    /// The belief moved toward the trade price with this gain
    Updated { gain: f64 },
}

#[derive(Debug, Default)]
pub struct BeliefStore {
    beliefs: HashMap<ItemId, PriceBelief>,
}

/// Reject prices the estimator cannot work with
pub(crate) fn ensure_positive_price(what: &str, price: Price) -> PricingResult<()> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidInput(format!(
            "{what} must be positive and finite, got {price}"
        )))
    }
}

fn seed_belief(item_id: &str, seed_price: Price, now: Timestamp, config: &PricingConfig) -> PriceBelief {
    PriceBelief {
        item_id: item_id.to_string(),
        current_belief: seed_price,
        belief_variance: seed_price * config.initial_variance_ratio,
        trades_count: 0,
        learning_rate: config.initial_learning_rate,
        confidence: config.initial_confidence,
        last_updated: now,
    }
}

impl BeliefStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or reset) the belief for an item from a reference price
    ///
    /// Overwrites any existing belief, so callers should reserve this for
    /// items entering the catalog.
    pub fn initialize(
        &mut self,
        item_id: &str,
        seed_price: Price,
        now: Timestamp,
        config: &PricingConfig,
    ) -> PricingResult<&PriceBelief> {
        ensure_positive_price("seed price", seed_price)?;

        let belief = seed_belief(item_id, seed_price, now, config);
        info!(
            "Initialized price belief: item={}, price={:.4}, variance={:.4}",
            item_id, belief.current_belief, belief.belief_variance
        );

        match self.beliefs.entry(item_id.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(belief);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => Ok(entry.insert(belief)),
        }
    }

    /// Get the belief for an item, seeding it from `seed_price` if absent
    ///
    /// Returns the belief and whether it was created by this call.
    pub fn get_or_seed(
        &mut self,
        item_id: &str,
        seed_price: Price,
        now: Timestamp,
        config: &PricingConfig,
    ) -> (&mut PriceBelief, bool) {
        match self.beliefs.entry(item_id.to_string()) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(entry) => {
                info!(
                    "Seeded price belief from first trade: item={}, price={:.4}",
                    item_id, seed_price
                );
                (entry.insert(seed_belief(item_id, seed_price, now, config)), true)
            }
        }
    }

    /// Fold an observed trade into the item's belief
    ///
    /// The first trade for an unknown item seeds the belief and is not
    /// passed through the update. Later trades apply a Kalman-style step:
    /// the gain is the share of belief variance in total variance, with the
    /// observation noise taken as a fixed fraction of the trade price.
    pub fn fold_trade(
        &mut self,
        item_id: &str,
        trade_price: Price,
        trade_volume: Quantity,
        now: Timestamp,
        config: &PricingConfig,
    ) -> PricingResult<FoldOutcome> {
        ensure_positive_price("trade price", trade_price)?;

        let (belief, seeded) = self.get_or_seed(item_id, trade_price, now, config);
        if seeded {
            return Ok(FoldOutcome::Seeded);
        }

        let measurement_error = trade_price * config.measurement_noise_ratio;
        let gain = belief.belief_variance / (belief.belief_variance + measurement_error);

        let previous = belief.current_belief;
        belief.current_belief =
            (previous + gain * (trade_price - previous)).max(config.price_floor);
        belief.belief_variance = ((1.0 - gain) * belief.belief_variance).max(0.0);

        belief.trades_count += 1;
        belief.confidence =
            (belief.trades_count as f64 / config.confidence_saturation_trades as f64).min(1.0);

        // One-way: the rate never goes back up
        if belief.trades_count > config.maturity_trades {
            belief.learning_rate = config.mature_learning_rate;
        }
        belief.last_updated = now;

        debug!(
            "Folded trade: item={}, price={:.4}, volume={}, belief {:.4} -> {:.4}, gain={:.4}, variance={:.4}",
            item_id,
            trade_price,
            trade_volume,
            previous,
            belief.current_belief,
            gain,
            belief.belief_variance
        );

        Ok(FoldOutcome::Updated { gain })
    }

    pub fn get(&self, item_id: &str) -> Option<&PriceBelief> {
        self.beliefs.get(item_id)
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.beliefs.keys()
    }

    pub fn len(&self) -> usize {
        self.beliefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beliefs.is_empty()
    }
}
