use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    // The provider could not be reached or rejected the request. The run aborts.
    #[error("Failed to fetch candles for '{symbol}': {reason}")]
    DataFetch { symbol: String, reason: String },

    #[error("Insufficient data: need at least {required} candles, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid candle at index {index}: {reason}")]
    InvalidCandle { index: usize, reason: String },

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    pub fn data_fetch(symbol: &str, reason: impl Into<String>) -> Self {
        EngineError::DataFetch {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}
