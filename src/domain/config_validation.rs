//! Configuration validation.
//!
//! Validates every config field before a tick or reconciliation runs.

use crate::domain::error::RsitraderError;
use crate::domain::market_clock::MarketClock;
use crate::domain::universe::load_universe;
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), RsitraderError> {
    validate_data_dir(config)?;
    validate_ledger_dir(config)?;
    validate_period_days(config)?;
    validate_rsi_length(config)?;
    validate_thresholds(config)?;
    load_universe(config)?;
    MarketClock::from_config(config)?;
    Ok(())
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), RsitraderError> {
    match config.get_string("market", "data_dir") {
        Some(dir) if !dir.trim().is_empty() => Ok(()),
        _ => Err(RsitraderError::ConfigMissing {
            section: "market".to_string(),
            key: "data_dir".to_string(),
        }),
    }
}

fn validate_ledger_dir(config: &dyn ConfigPort) -> Result<(), RsitraderError> {
    match config.get_string("ledger", "dir") {
        Some(dir) if !dir.trim().is_empty() => Ok(()),
        _ => Err(RsitraderError::ConfigMissing {
            section: "ledger".to_string(),
            key: "dir".to_string(),
        }),
    }
}

fn validate_period_days(config: &dyn ConfigPort) -> Result<(), RsitraderError> {
    let value = config.get_int("market", "period_days", 30);
    if value <= 0 {
        return Err(RsitraderError::ConfigInvalid {
            section: "market".to_string(),
            key: "period_days".to_string(),
            reason: "period_days must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_rsi_length(config: &dyn ConfigPort) -> Result<(), RsitraderError> {
    let value = config.get_int("market", "rsi_length", 14);
    if value <= 0 {
        return Err(RsitraderError::ConfigInvalid {
            section: "market".to_string(),
            key: "rsi_length".to_string(),
            reason: "rsi_length must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_thresholds(config: &dyn ConfigPort) -> Result<(), RsitraderError> {
    let buy = config.get_double("strategy", "buy_threshold", 30.0);
    let sell = config.get_double("strategy", "sell_threshold", 70.0);

    if !(0.0..=100.0).contains(&buy) {
        return Err(RsitraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "buy_threshold".to_string(),
            reason: "buy_threshold must be within 0..=100".to_string(),
        });
    }
    if !(0.0..=100.0).contains(&sell) {
        return Err(RsitraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "sell_threshold".to_string(),
            reason: "sell_threshold must be within 0..=100".to_string(),
        });
    }
    if buy >= sell {
        return Err(RsitraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "buy_threshold".to_string(),
            reason: "buy_threshold must be below sell_threshold".to_string(),
        });
    }
    Ok(())
}
