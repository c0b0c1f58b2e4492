//! Market data access port trait.
//!
//! The polling interval is fixed when an adapter is constructed; callers ask
//! for a trailing window of history or the most recent close per ticker.

use crate::domain::error::RsitraderError;
use crate::domain::price_bar::PriceBar;

pub trait MarketDataPort {
    /// Bars for the trailing `period_days` window, oldest first.
    /// An empty result means the ticker has no usable data this tick.
    fn fetch_history(&self, ticker: &str, period_days: u32)
        -> Result<Vec<PriceBar>, RsitraderError>;

    /// Most recent close for the ticker, if any data exists.
    fn latest_close(&self, ticker: &str) -> Result<Option<f64>, RsitraderError>;
}
