// In-memory candle store, usable directly as a CandleProvider
use super::CandleProvider;
use crate::error::EngineError;
use crate::models::CandleSeries;
use shared::models::{Candle, TimeFrame};
use std::collections::HashMap;

pub struct MarketDataStore {
    data: HashMap<String, HashMap<TimeFrame, Vec<Candle>>>,
}

impl MarketDataStore {
    pub fn new() -> Self {
        MarketDataStore { data: HashMap::new() }
    }

    pub fn add_candles(&mut self, symbol: &str, timeframe: TimeFrame, new_candles: Vec<Candle>) {
        let symbol_data = self.data.entry(symbol.to_string()).or_default();
        let timeframe_data = symbol_data.entry(timeframe).or_default();

        timeframe_data.extend(new_candles);
        timeframe_data.sort_by_key(|c| c.timestamp);
        timeframe_data.dedup_by_key(|c| c.timestamp);
    }
}

impl Default for MarketDataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CandleProvider for MarketDataStore {
    fn fetch_candles(&self, symbol: &str, timeframe: TimeFrame, limit: usize) -> Result<CandleSeries, EngineError> {
        let candles = self
            .data
            .get(symbol)
            .and_then(|symbol_data| symbol_data.get(&timeframe))
            .ok_or_else(|| EngineError::data_fetch(symbol, format!("no {} data loaded", timeframe)))?;

        let start = candles.len().saturating_sub(limit);
        CandleSeries::new(candles[start..].to_vec())
    }
}
