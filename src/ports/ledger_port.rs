//! Ledger store port trait.
//!
//! The ledger is a flat tabular store with three named tables: an append-only
//! trade log, a holdings table that is always rewritten whole, and a daily
//! P&L log created on demand.

use chrono::NaiveDate;

use crate::domain::error::RsitraderError;
use crate::domain::holdings::HoldingsBook;
use crate::domain::trade::TradeRecord;

pub trait LedgerPort {
    fn read_trades(&self) -> Result<Vec<TradeRecord>, RsitraderError>;

    fn read_holdings(&self) -> Result<HoldingsBook, RsitraderError>;

    /// Append trade rows. Existing rows are never touched.
    fn append_trades(&self, trades: &[TradeRecord]) -> Result<(), RsitraderError>;

    /// Replace the holdings table with the given book.
    fn overwrite_holdings(&self, holdings: &HoldingsBook) -> Result<(), RsitraderError>;

    /// Append a dated total to the daily P&L table, creating it if absent.
    fn append_pnl(&self, date: NaiveDate, total: f64) -> Result<(), RsitraderError>;
}
