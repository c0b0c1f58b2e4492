//! ETF universe: display name to ticker mapping from the `[etfs]` section.

use crate::domain::error::RsitraderError;
use crate::ports::config_port::ConfigPort;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Etf {
    /// Display name, uppercased; the key used in the ledger tables.
    pub name: String,
    pub ticker: String,
}

/// Load the configured universe, name-sorted. At least one mapping with a
/// non-empty ticker is required.
pub fn load_universe(config: &dyn ConfigPort) -> Result<Vec<Etf>, RsitraderError> {
    let entries = config.get_section("etfs");
    if entries.is_empty() {
        return Err(RsitraderError::ConfigInvalid {
            section: "etfs".into(),
            key: "*".into(),
            reason: "at least one ETF mapping is required".into(),
        });
    }

    let mut universe = Vec::with_capacity(entries.len());
    for (name, ticker) in entries {
        let ticker = ticker.trim().to_string();
        if ticker.is_empty() {
            return Err(RsitraderError::ConfigInvalid {
                section: "etfs".into(),
                key: name,
                reason: "ticker must not be empty".into(),
            });
        }
        universe.push(Etf {
            name: name.trim().to_uppercase(),
            ticker,
        });
    }

    Ok(universe)
}

pub fn universe_names(universe: &[Etf]) -> Vec<String> {
    universe.iter().map(|etf| etf.name.clone()).collect()
}
