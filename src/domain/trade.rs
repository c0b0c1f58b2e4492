//! Append-only trade log records.

use chrono::NaiveDateTime;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }

    pub fn parse(s: &str) -> Option<TradeSide> {
        if s.eq_ignore_ascii_case("BUY") {
            Some(TradeSide::Buy)
        } else if s.eq_ignore_ascii_case("SELL") {
            Some(TradeSide::Sell)
        } else {
            None
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub etf: String,
    pub timestamp: NaiveDateTime,
    pub price: f64,
    pub rsi: f64,
    pub side: TradeSide,
}
