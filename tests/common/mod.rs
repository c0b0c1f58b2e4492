#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use rsitrader::domain::error::RsitraderError;
use rsitrader::domain::holdings::HoldingsBook;
pub use rsitrader::domain::price_bar::PriceBar;
use rsitrader::domain::trade::TradeRecord;
use rsitrader::domain::universe::Etf;
use rsitrader::ports::ledger_port::LedgerPort;
use rsitrader::ports::market_data_port::MarketDataPort;
use std::cell::RefCell;
use std::collections::HashMap;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn ts(day: u32) -> NaiveDateTime {
    date(2024, 1, day).and_hms_opt(15, 0, 0).unwrap()
}

pub fn etf(name: &str, ticker: &str) -> Etf {
    Etf {
        name: name.to_string(),
        ticker: ticker.to_string(),
    }
}

pub fn make_bar(ticker: &str, day: u32, close: f64) -> PriceBar {
    PriceBar {
        ticker: ticker.to_string(),
        timestamp: ts(day),
        open: close,
        high: close,
        low: close,
        close,
        volume: 1_000,
    }
}

/// Strictly falling closes; once past the RSI warmup the indicator is pinned
/// at 0 (deep oversold).
pub fn falling_bars(ticker: &str, count: u32, start: f64) -> Vec<PriceBar> {
    (1..=count)
        .map(|day| make_bar(ticker, day, start - day as f64))
        .collect()
}

/// Strictly rising closes; RSI pinned at 100 (deep overbought).
pub fn rising_bars(ticker: &str, count: u32, start: f64) -> Vec<PriceBar> {
    (1..=count)
        .map(|day| make_bar(ticker, day, start + day as f64))
        .collect()
}

pub struct MockMarketDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockMarketDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketDataPort {
    fn fetch_history(
        &self,
        ticker: &str,
        _period_days: u32,
    ) -> Result<Vec<PriceBar>, RsitraderError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(RsitraderError::MarketData {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }

    fn latest_close(&self, ticker: &str) -> Result<Option<f64>, RsitraderError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(RsitraderError::MarketData {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(ticker)
            .and_then(|bars| bars.last())
            .map(|bar| bar.close))
    }
}

/// In-memory ledger fake. `holdings: None` simulates an unreadable table.
pub struct MemoryLedger {
    pub trades: RefCell<Vec<TradeRecord>>,
    pub holdings: RefCell<Option<HoldingsBook>>,
    pub pnl_rows: RefCell<Vec<(NaiveDate, f64)>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            trades: RefCell::new(Vec::new()),
            holdings: RefCell::new(Some(HoldingsBook::new())),
            pnl_rows: RefCell::new(Vec::new()),
        }
    }

    pub fn with_holdings(book: HoldingsBook) -> Self {
        let ledger = Self::new();
        *ledger.holdings.borrow_mut() = Some(book);
        ledger
    }

    pub fn failing_holdings() -> Self {
        let ledger = Self::new();
        *ledger.holdings.borrow_mut() = None;
        ledger
    }
}

impl LedgerPort for MemoryLedger {
    fn read_trades(&self) -> Result<Vec<TradeRecord>, RsitraderError> {
        Ok(self.trades.borrow().clone())
    }

    fn read_holdings(&self) -> Result<HoldingsBook, RsitraderError> {
        self.holdings
            .borrow()
            .clone()
            .ok_or_else(|| RsitraderError::Ledger {
                reason: "holdings table unavailable".into(),
            })
    }

    fn append_trades(&self, trades: &[TradeRecord]) -> Result<(), RsitraderError> {
        self.trades.borrow_mut().extend_from_slice(trades);
        Ok(())
    }

    fn overwrite_holdings(&self, holdings: &HoldingsBook) -> Result<(), RsitraderError> {
        *self.holdings.borrow_mut() = Some(holdings.clone());
        Ok(())
    }

    fn append_pnl(&self, date: NaiveDate, total: f64) -> Result<(), RsitraderError> {
        self.pnl_rows.borrow_mut().push((date, total));
        Ok(())
    }
}
