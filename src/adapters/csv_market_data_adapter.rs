//! CSV market data adapter.
//!
//! Reads per-ticker OHLC history files maintained by an external downloader.
//! Files are named `{ticker}_{interval}.csv` with columns
//! `timestamp,open,high,low,close,volume`; timestamps accept either
//! `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD` for daily files.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

use crate::domain::error::RsitraderError;
use crate::domain::price_bar::PriceBar;
use crate::ports::market_data_port::MarketDataPort;

pub struct CsvMarketDataAdapter {
    base_path: PathBuf,
    interval: String,
}

impl CsvMarketDataAdapter {
    pub fn new(base_path: PathBuf, interval: String) -> Self {
        Self {
            base_path,
            interval,
        }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path
            .join(format!("{}_{}.csv", ticker, self.interval))
    }

    fn parse_timestamp(value: &str, ticker: &str) -> Result<NaiveDateTime, RsitraderError> {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map(|d| d.and_time(chrono::NaiveTime::MIN))
            })
            .map_err(|e| RsitraderError::MarketData {
                ticker: ticker.to_string(),
                reason: format!("invalid timestamp {value:?}: {e}"),
            })
    }

    fn read_all_bars(&self, ticker: &str) -> Result<Vec<PriceBar>, RsitraderError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| RsitraderError::MarketData {
            ticker: ticker.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| RsitraderError::MarketData {
                ticker: ticker.to_string(),
                reason: format!("CSV parse error: {}", e),
            })?;

            let field = |idx: usize, name: &str| -> Result<&str, RsitraderError> {
                record.get(idx).ok_or_else(|| RsitraderError::MarketData {
                    ticker: ticker.to_string(),
                    reason: format!("missing {} column", name),
                })
            };

            let parse_f64 = |value: &str, name: &str| -> Result<f64, RsitraderError> {
                value.parse().map_err(|e| RsitraderError::MarketData {
                    ticker: ticker.to_string(),
                    reason: format!("invalid {} value: {}", name, e),
                })
            };

            let timestamp = Self::parse_timestamp(field(0, "timestamp")?, ticker)?;
            let open = parse_f64(field(1, "open")?, "open")?;
            let high = parse_f64(field(2, "high")?, "high")?;
            let low = parse_f64(field(3, "low")?, "low")?;
            let close = parse_f64(field(4, "close")?, "close")?;
            let volume: i64 =
                field(5, "volume")?
                    .parse()
                    .map_err(|e| RsitraderError::MarketData {
                        ticker: ticker.to_string(),
                        reason: format!("invalid volume value: {}", e),
                    })?;

            bars.push(PriceBar {
                ticker: ticker.to_string(),
                timestamp,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        bars.sort_by_key(|b| b.timestamp);
        Ok(bars)
    }
}

impl MarketDataPort for CsvMarketDataAdapter {
    fn fetch_history(
        &self,
        ticker: &str,
        period_days: u32,
    ) -> Result<Vec<PriceBar>, RsitraderError> {
        let mut bars = self.read_all_bars(ticker)?;

        // Trailing window anchored at the newest bar in the file.
        if let Some(last) = bars.last() {
            let cutoff = last.timestamp - Duration::days(i64::from(period_days));
            bars.retain(|b| b.timestamp >= cutoff);
        }

        Ok(bars)
    }

    fn latest_close(&self, ticker: &str) -> Result<Option<f64>, RsitraderError> {
        let bars = self.read_all_bars(ticker)?;
        Ok(bars.last().map(|b| b.close))
    }
}
