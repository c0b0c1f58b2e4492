//! Domain error types.

/// Top-level error type for rsitrader.
#[derive(Debug, thiserror::Error)]
pub enum RsitraderError {
    #[error("ledger error: {reason}")]
    Ledger { reason: String },

    #[error("ledger parse error in {table}: {reason}")]
    LedgerParse { table: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("market data error for {ticker}: {reason}")]
    MarketData { ticker: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&RsitraderError> for std::process::ExitCode {
    fn from(err: &RsitraderError) -> Self {
        let code: u8 = match err {
            RsitraderError::Io(_) => 1,
            RsitraderError::ConfigParse { .. }
            | RsitraderError::ConfigMissing { .. }
            | RsitraderError::ConfigInvalid { .. } => 2,
            RsitraderError::Ledger { .. } | RsitraderError::LedgerParse { .. } => 3,
            RsitraderError::MarketData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
