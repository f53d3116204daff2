//! Bazaar Clock Infrastructure
//!
//! Time sources for the pricing engine:
//!
//! - [`SystemClock`]: wall-clock UTC time for production
//! - [`ManualClock`]: time that only moves when told to, for tests and replays
//!
//! ## Usage
//!
//! ```ignore
//! use bazaar_clock::{Clock, ManualClock};
//! use chrono::Duration;
//!
//! let clock = ManualClock::starting_now();
//! let t0 = clock.now();
//! clock.advance(Duration::hours(2));
//! assert_eq!(clock.now() - t0, Duration::hours(2));
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use bazaar_ports::Clock;
