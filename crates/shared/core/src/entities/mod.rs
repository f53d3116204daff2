mod analytics;
mod belief;
mod clearing;
mod history;
mod order;
mod side;
mod trade;

pub use analytics::{MarketAnalytics, PriceTrend, TrendDirection};
pub use belief::PriceBelief;
pub use clearing::MarketClearingResult;
pub use history::SupplyDemandPoint;
pub use order::DoubleAuctionOrder;
pub use side::OrderSide;
pub use trade::{ExecutedTrade, TradeId};
