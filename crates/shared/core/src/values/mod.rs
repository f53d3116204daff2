use chrono::{DateTime, Utc};

/// Price value in in-game currency
pub type Price = f64;

/// Item quantity - whole units only, so it can never go negative
pub type Quantity = u64;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Opaque identifier of a tradable item
pub type ItemId = String;

/// Opaque identifier of an order, assigned by the caller
pub type OrderId = String;

/// Opaque identifier of a player or NPC taking part in an auction
pub type ParticipantId = String;
