//! Core domain types and logic.

pub mod price_bar;
pub mod rsi;
pub mod observation;
pub mod holdings;
pub mod trade;
pub mod engine;
pub mod pnl;
pub mod market_clock;
pub mod universe;
pub mod config_validation;
pub mod error;
