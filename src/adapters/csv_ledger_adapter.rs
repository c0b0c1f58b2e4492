//! CSV ledger adapter: three flat tables under one directory.
//!
//! - `trades.csv`    — `ETF,Timestamp,Price,RSI,Type`, append-only
//! - `holdings.csv`  — `ETF,Units,Average Price`, rewritten whole
//! - `daily_pnl.csv` — `Date,P&L`, created on demand, append-only
//!
//! Timestamps are `YYYY-MM-DD HH:MM:SS`; the P&L date column uses the
//! `DD.MM.YYYY` form. Money columns are written with two decimals.

use chrono::{NaiveDate, NaiveDateTime};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::domain::error::RsitraderError;
use crate::domain::holdings::{Holding, HoldingsBook};
use crate::domain::trade::{TradeRecord, TradeSide};
use crate::ports::ledger_port::LedgerPort;

const TRADES_FILE: &str = "trades.csv";
const HOLDINGS_FILE: &str = "holdings.csv";
const PNL_FILE: &str = "daily_pnl.csv";

const TRADES_HEADER: [&str; 5] = ["ETF", "Timestamp", "Price", "RSI", "Type"];
const HOLDINGS_HEADER: [&str; 3] = ["ETF", "Units", "Average Price"];
const PNL_HEADER: [&str; 2] = ["Date", "P&L"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PNL_DATE_FORMAT: &str = "%d.%m.%Y";

pub struct CsvLedgerAdapter {
    dir: PathBuf,
}

impl CsvLedgerAdapter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Create the ledger directory and the trade/holdings tables with their
    /// header rows when absent. Idempotent.
    pub fn initialize(&self) -> Result<(), RsitraderError> {
        fs::create_dir_all(&self.dir)?;
        ensure_table(&self.dir.join(TRADES_FILE), &TRADES_HEADER)?;
        ensure_table(&self.dir.join(HOLDINGS_FILE), &HOLDINGS_HEADER)?;
        Ok(())
    }

    fn table_path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

fn ensure_table(path: &Path, header: &[&str]) -> Result<(), RsitraderError> {
    if path.exists() {
        return Ok(());
    }
    let mut wtr = csv::Writer::from_path(path).map_err(|e| RsitraderError::Ledger {
        reason: format!("failed to create {}: {}", path.display(), e),
    })?;
    wtr.write_record(header)
        .and_then(|()| wtr.flush().map_err(csv::Error::from))
        .map_err(|e| RsitraderError::Ledger {
            reason: format!("failed to write header to {}: {}", path.display(), e),
        })
}

fn append_writer(path: &Path) -> Result<csv::Writer<std::fs::File>, RsitraderError> {
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| RsitraderError::Ledger {
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;
    Ok(csv::Writer::from_writer(file))
}

impl LedgerPort for CsvLedgerAdapter {
    fn read_trades(&self) -> Result<Vec<TradeRecord>, RsitraderError> {
        let path = self.table_path(TRADES_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).map_err(|e| RsitraderError::Ledger {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let parse = |reason: String| RsitraderError::LedgerParse {
            table: "trades".into(),
            reason,
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut trades = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| parse(e.to_string()))?;

            let field = |idx: usize, name: &str| {
                record
                    .get(idx)
                    .ok_or_else(|| parse(format!("missing {} column", name)))
            };

            let timestamp = NaiveDateTime::parse_from_str(field(1, "Timestamp")?, TIMESTAMP_FORMAT)
                .map_err(|e| parse(format!("invalid timestamp: {}", e)))?;
            let price: f64 = field(2, "Price")?
                .parse()
                .map_err(|e| parse(format!("invalid price: {}", e)))?;
            let rsi: f64 = field(3, "RSI")?
                .parse()
                .map_err(|e| parse(format!("invalid RSI: {}", e)))?;
            let side_str = field(4, "Type")?;
            let side = TradeSide::parse(side_str)
                .ok_or_else(|| parse(format!("unknown trade type {:?}", side_str)))?;

            trades.push(TradeRecord {
                etf: field(0, "ETF")?.to_string(),
                timestamp,
                price,
                rsi,
                side,
            });
        }

        Ok(trades)
    }

    fn read_holdings(&self) -> Result<HoldingsBook, RsitraderError> {
        let path = self.table_path(HOLDINGS_FILE);
        let content = fs::read_to_string(&path).map_err(|e| RsitraderError::Ledger {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let parse = |reason: String| RsitraderError::LedgerParse {
            table: "holdings".into(),
            reason,
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut book = HoldingsBook::new();

        for result in rdr.records() {
            let record = result.map_err(|e| parse(e.to_string()))?;

            let etf = record
                .get(0)
                .ok_or_else(|| parse("missing ETF column".into()))?;
            let units: u32 = record
                .get(1)
                .ok_or_else(|| parse("missing Units column".into()))?
                .parse()
                .map_err(|e| parse(format!("invalid units: {}", e)))?;
            let average_price: f64 = record
                .get(2)
                .ok_or_else(|| parse("missing Average Price column".into()))?
                .parse()
                .map_err(|e| parse(format!("invalid average price: {}", e)))?;

            book.set(
                etf,
                Holding {
                    units,
                    average_price,
                },
            );
        }

        Ok(book)
    }

    fn append_trades(&self, trades: &[TradeRecord]) -> Result<(), RsitraderError> {
        if trades.is_empty() {
            return Ok(());
        }

        let path = self.table_path(TRADES_FILE);
        ensure_table(&path, &TRADES_HEADER)?;

        let mut wtr = append_writer(&path)?;
        for trade in trades {
            wtr.write_record([
                trade.etf.as_str(),
                &trade.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                &format!("{:.2}", trade.price),
                &format!("{:.2}", trade.rsi),
                trade.side.as_str(),
            ])
            .map_err(|e| RsitraderError::Ledger {
                reason: format!("failed to append trade: {}", e),
            })?;
        }
        wtr.flush().map_err(|e| RsitraderError::Ledger {
            reason: format!("failed to flush trades: {}", e),
        })
    }

    fn overwrite_holdings(&self, holdings: &HoldingsBook) -> Result<(), RsitraderError> {
        let path = self.table_path(HOLDINGS_FILE);
        let mut wtr = csv::Writer::from_path(&path).map_err(|e| RsitraderError::Ledger {
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;

        wtr.write_record(HOLDINGS_HEADER)
            .map_err(|e| RsitraderError::Ledger {
                reason: format!("failed to write holdings header: {}", e),
            })?;

        for (etf, holding) in holdings.iter() {
            wtr.write_record([
                etf.as_str(),
                &holding.units.to_string(),
                &format!("{:.2}", holding.average_price),
            ])
            .map_err(|e| RsitraderError::Ledger {
                reason: format!("failed to write holdings row: {}", e),
            })?;
        }

        wtr.flush().map_err(|e| RsitraderError::Ledger {
            reason: format!("failed to flush holdings: {}", e),
        })
    }

    fn append_pnl(&self, date: NaiveDate, total: f64) -> Result<(), RsitraderError> {
        let path = self.table_path(PNL_FILE);
        ensure_table(&path, &PNL_HEADER)?;

        let mut wtr = append_writer(&path)?;
        wtr.write_record([
            date.format(PNL_DATE_FORMAT).to_string(),
            format!("{:.2}", total),
        ])
        .map_err(|e| RsitraderError::Ledger {
            reason: format!("failed to append P&L row: {}", e),
        })?;
        wtr.flush().map_err(|e| RsitraderError::Ledger {
            reason: format!("failed to flush P&L: {}", e),
        })
    }
}
