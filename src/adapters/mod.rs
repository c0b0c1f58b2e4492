//! Concrete port implementations.

pub mod file_config_adapter;
pub mod csv_market_data_adapter;
pub mod csv_ledger_adapter;
