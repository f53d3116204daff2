//! Bazaar Pricing Engine
//!
//! The economic core of the auction house:
//!
//! - [`belief`]: per-item fair-price beliefs and their recursive update
//! - [`history`]: bounded supply/demand history per item
//! - [`trend`]: least-squares trend, fit confidence and volatility
//! - [`analytics`]: windowed market statistics
//! - [`engine`]: the [`PricingEngine`] tying auctions back into beliefs
//!
//! ## Usage
//!
//! ```ignore
//! use bazaar_core::DoubleAuctionOrder;
//! use bazaar_pricing::PricingEngine;
//!
//! let engine = PricingEngine::new();
//! engine.initialize_belief("iron-ore", 12.0)?;
//!
//! let bids = vec![DoubleAuctionOrder::bid("b1", "iron-ore", "p1", 13.0, 10)];
//! let asks = vec![DoubleAuctionOrder::ask("a1", "iron-ore", "p2", 11.0, 4)];
//! let result = engine.execute_double_auction("iron-ore", &bids, &asks)?;
//!
//! let quote = engine.current_price("iron-ore")?;
//! let forecast = engine.predict_price("iron-ore", 6)?;
//! ```

pub mod analytics;
pub mod belief;
pub mod config;
pub mod engine;
pub mod history;
pub mod trend;

pub use belief::{BeliefStore, FoldOutcome};
pub use config::PricingConfig;
pub use engine::{MarketDepth, PricePrediction, PriceQuote, PricingEngine};
pub use history::SupplyDemandHistory;

// Re-export the error types from ports for convenience
pub use bazaar_ports::{PricingError, PricingResult};
