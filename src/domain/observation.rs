//! Per-poll (ETF, price, RSI) observations.

use chrono::NaiveDateTime;

use crate::domain::holdings::round2;
use crate::domain::price_bar::PriceBar;
use crate::domain::rsi;

/// One observation per ETF per poll. Ephemeral; feeds the tick engine.
#[derive(Debug, Clone)]
pub struct Observation {
    pub etf: String,
    pub ticker: String,
    pub timestamp: NaiveDateTime,
    /// Close price rounded to 2 dp.
    pub price: f64,
    pub rsi: f64,
}

impl Observation {
    /// Build from a price history: the latest bar that has a valid RSI.
    /// Returns `None` when the series is too short for the lookback.
    pub fn from_history(
        etf: &str,
        ticker: &str,
        bars: &[PriceBar],
        rsi_length: usize,
    ) -> Option<Observation> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let series = rsi::rsi(&closes, rsi_length);

        bars.iter()
            .zip(series)
            .rev()
            .find_map(|(bar, value)| value.map(|rsi| (bar, rsi)))
            .map(|(bar, rsi)| Observation {
                etf: etf.to_string(),
                ticker: ticker.to_string(),
                timestamp: bar.timestamp,
                price: round2(bar.close),
                rsi,
            })
    }
}
