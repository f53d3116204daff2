//! Bazaar Core Domain
//!
//! Pure domain types for the Bazaar pricing and double-auction engine.
//! This crate contains no locking, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Analytics
    MarketAnalytics,
    PriceTrend,
    TrendDirection,
    // Pricing state
    PriceBelief,
    SupplyDemandPoint,
    // Auction entities
    DoubleAuctionOrder,
    ExecutedTrade,
    MarketClearingResult,
    OrderSide,
    TradeId,
};
pub use values::{ItemId, OrderId, ParticipantId, Price, Quantity, Timestamp};
