// Market-data boundary: where candle series come from.
pub mod csv_parser;
pub mod market_data;

pub use csv_parser::{CsvCandleProvider, OhlcvCsvParser};
pub use market_data::MarketDataStore;

use crate::error::EngineError;
use crate::models::CandleSeries;
use shared::models::TimeFrame;

/// Supplies the most recent `limit` candles for an instrument.
pub trait CandleProvider {
    fn fetch_candles(&self, symbol: &str, timeframe: TimeFrame, limit: usize) -> Result<CandleSeries, EngineError>;
}
