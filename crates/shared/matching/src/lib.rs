//! Bazaar Matching Algorithms
//!
//! Double-auction matching for the Bazaar pricing engine.

mod double_auction;

pub use double_auction::DoubleAuctionMatcher;

// Re-export the trait from ports for convenience
pub use bazaar_ports::{AuctionMatcher, MatchingError, MatchingResult};
