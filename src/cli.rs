//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_ledger_adapter::CsvLedgerAdapter;
use crate::adapters::csv_market_data_adapter::CsvMarketDataAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::validate_config;
use crate::domain::engine::{run_tick, Thresholds};
use crate::domain::error::RsitraderError;
use crate::domain::holdings::{round2, HoldingsBook};
use crate::domain::market_clock::MarketClock;
use crate::domain::observation::Observation;
use crate::domain::pnl::{compute_daily_pnl, PnlReport};
use crate::domain::universe::{load_universe, universe_names, Etf};
use crate::ports::config_port::ConfigPort;
use crate::ports::ledger_port::LedgerPort;
use crate::ports::market_data_port::MarketDataPort;

#[derive(Parser, Debug)]
#[command(name = "rsitrader", about = "RSI threshold trading bot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one polling tick: fetch, decide, persist
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Validate config and print the resolved universe without trading
        #[arg(long)]
        dry_run: bool,
    },
    /// Reconcile and log the daily P&L
    Pnl {
        #[arg(short, long)]
        config: PathBuf,
        /// Bypass the market-closed gate
        #[arg(long)]
        force: bool,
    },
    /// Print the current holdings table
    Holdings {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run { config, dry_run } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_tick_command(&config)
            }
        }
        Command::Pnl { config, force } => run_pnl_command(&config, force),
        Command::Holdings { config } => run_holdings_command(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = RsitraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Bot settings resolved from config once per invocation.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub data_dir: PathBuf,
    pub ledger_dir: PathBuf,
    pub interval: String,
    pub period_days: u32,
    pub rsi_length: usize,
    pub thresholds: Thresholds,
}

pub fn build_bot_config(adapter: &dyn ConfigPort) -> Result<BotConfig, RsitraderError> {
    let data_dir =
        adapter
            .get_string("market", "data_dir")
            .ok_or_else(|| RsitraderError::ConfigMissing {
                section: "market".into(),
                key: "data_dir".into(),
            })?;
    let ledger_dir =
        adapter
            .get_string("ledger", "dir")
            .ok_or_else(|| RsitraderError::ConfigMissing {
                section: "ledger".into(),
                key: "dir".into(),
            })?;

    Ok(BotConfig {
        data_dir: PathBuf::from(data_dir),
        ledger_dir: PathBuf::from(ledger_dir),
        interval: adapter
            .get_string("market", "interval")
            .unwrap_or_else(|| "1d".to_string()),
        period_days: adapter.get_int("market", "period_days", 30).max(1) as u32,
        rsi_length: adapter.get_int("market", "rsi_length", 14).max(1) as usize,
        thresholds: Thresholds {
            buy_below: adapter.get_double("strategy", "buy_threshold", 30.0),
            sell_above: adapter.get_double("strategy", "sell_threshold", 70.0),
        },
    })
}

/// One observation per ETF with usable data; fetch failures and too-short
/// histories skip the ETF for this tick with a warning.
pub fn collect_observations(
    market: &dyn MarketDataPort,
    universe: &[Etf],
    period_days: u32,
    rsi_length: usize,
) -> Vec<Observation> {
    let mut observations = Vec::with_capacity(universe.len());

    for etf in universe {
        let bars = match market.fetch_history(&etf.ticker, period_days) {
            Ok(bars) => bars,
            Err(e) => {
                eprintln!("warning: skipping {} ({})", etf.name, e);
                continue;
            }
        };

        match Observation::from_history(&etf.name, &etf.ticker, &bars, rsi_length) {
            Some(obs) => observations.push(obs),
            None => eprintln!(
                "warning: skipping {} (not enough bars for RSI-{})",
                etf.name, rsi_length
            ),
        }
    }

    observations
}

/// Read the holdings table, falling back to an all-zero book over the
/// configured ETFs when it cannot be read or parsed. The fallback drops any
/// previously persisted state; it is warned about, not retried.
pub fn load_holdings_or_zeroed(ledger: &dyn LedgerPort, names: &[String]) -> HoldingsBook {
    match ledger.read_holdings() {
        Ok(book) => book,
        Err(e) => {
            eprintln!("warning: failed to load holdings ({e}); starting from a zeroed book");
            HoldingsBook::zeroed(names)
        }
    }
}

/// Fetch latest closes, combine with the persisted trade log and holdings
/// snapshot, and append the dated total to the P&L table.
pub fn run_reconciliation(
    market: &dyn MarketDataPort,
    ledger: &dyn LedgerPort,
    universe: &[Etf],
    date: NaiveDate,
) -> Result<PnlReport, RsitraderError> {
    let trades = ledger.read_trades()?;
    let holdings = ledger.read_holdings()?;

    let mut latest_prices = HashMap::new();
    for etf in universe {
        match market.latest_close(&etf.ticker) {
            Ok(Some(price)) => {
                latest_prices.insert(etf.name.clone(), round2(price));
            }
            Ok(None) => eprintln!("warning: no latest price for {}", etf.name),
            Err(e) => eprintln!("warning: failed to price {} ({})", etf.name, e),
        }
    }

    let report = compute_daily_pnl(&trades, &holdings, &latest_prices);
    ledger.append_pnl(date, report.total)?;
    Ok(report)
}

fn run_tick_command(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let (cfg, universe, clock) = match resolve_run_inputs(&adapter) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let market = CsvMarketDataAdapter::new(cfg.data_dir.clone(), cfg.interval.clone());
    let ledger = CsvLedgerAdapter::new(cfg.ledger_dir.clone());
    if let Err(e) = ledger.initialize() {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let observations =
        collect_observations(&market, &universe, cfg.period_days, cfg.rsi_length);
    if observations.is_empty() {
        eprintln!("error: no ETF produced an observation this tick");
        return ExitCode::from(5);
    }

    println!("{:<12} {:<19} {:>10} {:>7}", "ETF", "Timestamp", "Close", "RSI");
    for obs in &observations {
        println!(
            "{:<12} {:<19} {:>10.2} {:>7.2}",
            obs.etf,
            obs.timestamp.format("%Y-%m-%d %H:%M:%S"),
            obs.price,
            obs.rsi
        );
    }

    let names = universe_names(&universe);
    let holdings = load_holdings_or_zeroed(&ledger, &names);
    let outcome = run_tick(&observations, &holdings, &cfg.thresholds);

    if let Err(e) = ledger.append_trades(&outcome.trades) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = ledger.overwrite_holdings(&outcome.holdings) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!(
        "Tick complete: {} observation(s), {} trade(s)",
        observations.len(),
        outcome.trades.len()
    );

    if clock.is_market_closed() {
        match run_reconciliation(&market, &ledger, &universe, clock.today()) {
            Ok(report) => {
                eprintln!("Logged daily P&L: {:.2} on {}", report.total, clock.today());
            }
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    } else {
        eprintln!("Market not closed yet or today is not a trading day; skipping daily P&L.");
    }

    ExitCode::SUCCESS
}

fn run_pnl_command(config_path: &PathBuf, force: bool) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let (cfg, universe, clock) = match resolve_run_inputs(&adapter) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if !force && !clock.is_market_closed() {
        eprintln!("Market not closed yet or today is not a trading day.");
        return ExitCode::SUCCESS;
    }

    let market = CsvMarketDataAdapter::new(cfg.data_dir.clone(), cfg.interval.clone());
    let ledger = CsvLedgerAdapter::new(cfg.ledger_dir.clone());

    match run_reconciliation(&market, &ledger, &universe, clock.today()) {
        Ok(report) => {
            println!(
                "realized: {:.2}  unrealized: {:.2}  total: {:.2}",
                report.realized, report.unrealized, report.total
            );
            eprintln!("Logged daily P&L: {:.2} on {}", report.total, clock.today());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_holdings_command(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let cfg = match build_bot_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let ledger = CsvLedgerAdapter::new(cfg.ledger_dir);
    let book = match ledger.read_holdings() {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    println!("{:<12} {:>6} {:>14}", "ETF", "Units", "Average Price");
    for (etf, holding) in book.iter() {
        println!(
            "{:<12} {:>6} {:>14.2}",
            etf, holding.units, holding.average_price
        );
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match validate_config(&adapter) {
        Ok(()) => {
            eprintln!("Configuration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Config validated successfully");

    let (cfg, universe, _clock) = match resolve_run_inputs(&adapter) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nStrategy:");
    eprintln!("  buy below RSI:  {}", cfg.thresholds.buy_below);
    eprintln!("  sell above RSI: {}", cfg.thresholds.sell_above);
    eprintln!("  RSI lookback:   {}", cfg.rsi_length);

    eprintln!("\nUniverse:");
    for etf in &universe {
        eprintln!("  {} -> {}", etf.name, etf.ticker);
    }

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn resolve_run_inputs(
    adapter: &dyn ConfigPort,
) -> Result<(BotConfig, Vec<Etf>, MarketClock), RsitraderError> {
    let cfg = build_bot_config(adapter)?;
    let universe = load_universe(adapter)?;
    let clock = MarketClock::from_config(adapter)?;
    Ok((cfg, universe, clock))
}
