//! Daily P&L reconciliation over the trade log and current holdings.

use std::collections::HashMap;

use crate::domain::holdings::{round2, HoldingsBook};
use crate::domain::trade::{TradeRecord, TradeSide};

#[derive(Debug, Clone, PartialEq)]
pub struct PnlReport {
    pub realized: f64,
    pub unrealized: f64,
    /// round2(realized + unrealized)
    pub total: f64,
}

/// Combine trade history, the holdings snapshot and latest market prices into
/// a single P&L figure. Deterministic for fixed inputs.
///
/// Realized P&L prices every SELL against the average cost in the *current*
/// holdings snapshot, not the cost basis at the time of each historical sale.
/// This approximation is intentional; changing it would make new P&L rows
/// incomparable with rows already in the ledger.
pub fn compute_daily_pnl(
    trades: &[TradeRecord],
    holdings: &HoldingsBook,
    latest_prices: &HashMap<String, f64>,
) -> PnlReport {
    let mut realized = 0.0;
    for trade in trades.iter().filter(|t| t.side == TradeSide::Sell) {
        if let Some(holding) = holdings.get(&trade.etf) {
            realized += trade.price - holding.average_price;
        }
    }

    let mut unrealized = 0.0;
    for (etf, holding) in holdings.iter() {
        if let Some(&price) = latest_prices.get(etf) {
            unrealized += (price - holding.average_price) * holding.units as f64;
        }
    }

    PnlReport {
        realized,
        unrealized,
        total: round2(realized + unrealized),
    }
}
