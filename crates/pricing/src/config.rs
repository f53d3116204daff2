//! Pricing Engine Parameters
//!
//! Every tunable constant of the belief model, the forecaster and the
//! analytics lives here. The defaults reproduce the live auction-house
//! behavior; tests and balancing experiments override single fields.

use bazaar_ports::{PricingError, PricingResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Seed variance as a fraction of the seed price
    pub initial_variance_ratio: f64,
    /// Confidence of a freshly seeded belief
    pub initial_confidence: f64,
    pub initial_learning_rate: f64,
    /// Learning rate once `maturity_trades` has been exceeded
    pub mature_learning_rate: f64,
    pub maturity_trades: u64,
    /// Trade count at which confidence reaches 1
    pub confidence_saturation_trades: u64,
    /// Observation noise as a fraction of the trade price
    pub measurement_noise_ratio: f64,
    /// Scale of the gaussian jitter applied to quoted prices
    pub quote_noise_scale: f64,
    /// Lowest price ever quoted
    pub price_floor: f64,
    /// Supply/demand points kept per item
    pub history_capacity: usize,
    /// History points needed before a forecast extrapolates the trend
    pub min_prediction_points: usize,
    /// Confidence decay per forecast hour
    pub prediction_decay: f64,
    /// Slopes within this distance of zero count as stable
    pub trend_threshold: f64,
    /// Market health per unit of average volume, capped at 100
    pub health_volume_factor: f64,
    /// Most recent prices used for volatility
    pub volatility_window: usize,
    /// Fixed seed for the quote jitter, random when absent
    pub noise_seed: Option<u64>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            initial_variance_ratio: 0.5,
            initial_confidence: 0.1,
            initial_learning_rate: 0.05,
            mature_learning_rate: 0.02,
            maturity_trades: 10,
            confidence_saturation_trades: 100,
            measurement_noise_ratio: 0.1,
            quote_noise_scale: 0.1,
            price_floor: 0.01,
            history_capacity: 1000,
            min_prediction_points: 5,
            prediction_decay: 0.1,
            trend_threshold: 0.01,
            health_volume_factor: 10.0,
            volatility_window: 5,
            noise_seed: None,
        }
    }
}

impl PricingConfig {
    /// Default parameters with a deterministic quote jitter
    pub fn seeded(seed: u64) -> Self {
        Self {
            noise_seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        fn check(ok: bool, msg: &str) -> PricingResult<()> {
            if ok {
                Ok(())
            } else {
                Err(PricingError::InvalidConfig(msg.to_string()))
            }
        }

        check(
            self.initial_variance_ratio.is_finite() && self.initial_variance_ratio >= 0.0,
            "initial_variance_ratio must be finite and non-negative",
        )?;
        check(
            (0.0..=1.0).contains(&self.initial_confidence),
            "initial_confidence must be within [0, 1]",
        )?;
        check(
            self.initial_learning_rate > 0.0 && self.mature_learning_rate > 0.0,
            "learning rates must be positive",
        )?;
        check(
            self.confidence_saturation_trades > 0,
            "confidence_saturation_trades must be positive",
        )?;
        check(
            self.measurement_noise_ratio.is_finite() && self.measurement_noise_ratio > 0.0,
            "measurement_noise_ratio must be finite and positive",
        )?;
        check(
            self.quote_noise_scale.is_finite() && self.quote_noise_scale >= 0.0,
            "quote_noise_scale must be finite and non-negative",
        )?;
        check(
            self.price_floor.is_finite() && self.price_floor > 0.0,
            "price_floor must be finite and positive",
        )?;
        check(self.history_capacity > 0, "history_capacity must be positive")?;
        check(
            self.prediction_decay.is_finite() && self.prediction_decay >= 0.0,
            "prediction_decay must be finite and non-negative",
        )?;
        check(
            self.trend_threshold.is_finite() && self.trend_threshold >= 0.0,
            "trend_threshold must be finite and non-negative",
        )?;
        check(
            self.health_volume_factor.is_finite() && self.health_volume_factor >= 0.0,
            "health_volume_factor must be finite and non-negative",
        )?;
        check(self.volatility_window > 0, "volatility_window must be positive")
    }
}
