//! Trade decision engine: threshold rule applied to a batch of observations.
//!
//! Each observation is handled independently of the others in the batch.
//! Trade size is fixed at one unit per signal per poll; there is no cooldown,
//! so consecutive polls can each fire while RSI stays beyond a threshold.

use crate::domain::holdings::HoldingsBook;
use crate::domain::observation::Observation;
use crate::domain::trade::{TradeRecord, TradeSide};

#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Buy one unit when RSI is strictly below this value.
    pub buy_below: f64,
    /// Sell one unit when RSI is strictly above this value and units are held.
    pub sell_above: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            buy_below: 30.0,
            sell_above: 70.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub holdings: HoldingsBook,
    pub trades: Vec<TradeRecord>,
}

/// Apply the threshold rule to one batch of observations against the current
/// holdings. Pure: the input book is not mutated.
pub fn run_tick(
    observations: &[Observation],
    holdings: &HoldingsBook,
    thresholds: &Thresholds,
) -> TickOutcome {
    let mut book = holdings.clone();
    let mut trades = Vec::new();

    for obs in observations {
        if obs.rsi < thresholds.buy_below {
            book.buy(&obs.etf, obs.price);
            trades.push(trade(obs, TradeSide::Buy));
        } else if obs.rsi > thresholds.sell_above && book.sell(&obs.etf) {
            trades.push(trade(obs, TradeSide::Sell));
        }
    }

    TickOutcome {
        holdings: book,
        trades,
    }
}

fn trade(obs: &Observation, side: TradeSide) -> TradeRecord {
    TradeRecord {
        etf: obs.etf.clone(),
        timestamp: obs.timestamp,
        price: obs.price,
        rsi: obs.rsi,
        side,
    }
}
