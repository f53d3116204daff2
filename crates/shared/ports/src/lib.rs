//! Bazaar Ports
//!
//! Port definitions (traits) for the Bazaar pricing engine.
//! These define the boundaries between domain logic and infrastructure.

mod clock;
mod error;
mod matching;

pub use clock::Clock;
pub use error::{MatchingError, MatchingResult, PricingError, PricingResult};
pub use matching::AuctionMatcher;
