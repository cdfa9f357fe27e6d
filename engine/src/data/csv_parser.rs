use super::{CandleProvider, MarketDataStore};
use crate::error::EngineError;
use crate::models::CandleSeries;
use csv::{ReaderBuilder, StringRecord};
use shared::models::{Candle, TimeFrame};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// Field formats found in exchange OHLCV exports.
pub mod ohlcv_format {
    use anyhow::{anyhow, Result};
    use chrono::{DateTime, Utc};

    /// Accepts epoch milliseconds ("1704067200000") or RFC 3339.
    pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
        let trimmed = s.trim();
        if let Ok(millis) = trimmed.parse::<i64>() {
            return DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| anyhow!("Timestamp out of range: '{}'", s));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| anyhow!("Failed to parse timestamp '{}': {}", s, e))
    }

    pub fn parse_decimal(s: &str) -> Result<f64> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))?;
        if !value.is_finite() {
            return Err(anyhow!("Non-finite value '{}'", s));
        }
        Ok(value)
    }

}

pub struct OhlcvCsvParser;

impl OhlcvCsvParser {
    // CSV Header: timestamp,open,high,low,close,volume
    // Example Row: 1704067200000,42283.58,42554.57,42261.02,42475.23,1271.68
    pub fn load_candles_from_csv(file_path: &Path) -> Result<Vec<Candle>, EngineError> {
        let file = File::open(file_path)?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let headers = rdr.headers()?.clone();
        let mut candles = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2;

            let timestamp = ohlcv_format::parse_timestamp(Self::required(&record, &headers, "timestamp", line)?)
                .map_err(|e| {
                    EngineError::CsvDataFormatError(format!("Error parsing 'timestamp' at line {}: {}", line, e))
                })?;

            candles.push(Candle {
                timestamp,
                open: Self::required_number(&record, &headers, "open", line)?,
                high: Self::required_number(&record, &headers, "high", line)?,
                low: Self::required_number(&record, &headers, "low", line)?,
                close: Self::required_number(&record, &headers, "close", line)?,
                volume: Self::required_number(&record, &headers, "volume", line)?,
            });
        }

        tracing::debug!(path = %file_path.display(), count = candles.len(), "Loaded candles from CSV");
        Ok(candles)
    }

    fn required<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<&'a str, EngineError> {
        Self::get_field(record, headers, name).ok_or_else(|| {
            EngineError::CsvDataFormatError(format!("Missing '{}' field in CSV record at line {}", name, line))
        })
    }

    fn required_number(record: &StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<f64, EngineError> {
        ohlcv_format::parse_decimal(Self::required(record, headers, name, line)?).map_err(|e| {
            EngineError::CsvDataFormatError(format!("Error parsing '{}' at line {}: {}", name, line, e))
        })
    }

    // Looks a field up by header name, case-insensitively.
    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|pos| record.get(pos))
    }
}

/// Reads `<data_dir>/<SYMBOL>_<timeframe>.csv`, with `/` in the symbol
/// written as `-` (`BTC/USDT` on 1h -> `BTC-USDT_1h.csv`).
pub struct CsvCandleProvider {
    data_dir: PathBuf,
}

impl CsvCandleProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn path_for(&self, symbol: &str, timeframe: TimeFrame) -> PathBuf {
        self.data_dir
            .join(format!("{}_{}.csv", symbol.replace('/', "-"), timeframe))
    }
}

impl CandleProvider for CsvCandleProvider {
    fn fetch_candles(&self, symbol: &str, timeframe: TimeFrame, limit: usize) -> Result<CandleSeries, EngineError> {
        let path = self.path_for(symbol, timeframe);
        let candles = OhlcvCsvParser::load_candles_from_csv(&path).map_err(|e| {
            tracing::warn!(symbol, path = %path.display(), error = %e, "Candle fetch failed");
            EngineError::data_fetch(symbol, e.to_string())
        })?;

        let mut store = MarketDataStore::new();
        store.add_candles(symbol, timeframe, candles);
        store.fetch_candles(symbol, timeframe, limit)
    }
}
