//! Port traits decoupling the domain from config, market data and the ledger.

pub mod config_port;
pub mod market_data_port;
pub mod ledger_port;
