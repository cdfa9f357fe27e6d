use crate::error::EngineError;
use shared::models::Candle;

/// Chronologically ordered candles for one instrument, oldest first.
///
/// Construction checks that every field is finite, the OHLC bounds of every
/// candle, and that timestamps strictly increase, so downstream code can index without re-validating.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self, EngineError> {
        for (index, c) in candles.iter().enumerate() {
            let fields = [("open", c.open), ("high", c.high), ("low", c.low), ("close", c.close), ("volume", c.volume)];
            if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
                return Err(EngineError::InvalidCandle {
                    index,
                    reason: format!("{} is not finite ({})", name, value),
                });
            }
            if c.high < c.open.max(c.close).max(c.low) {
                return Err(EngineError::InvalidCandle {
                    index,
                    reason: format!("high {} is below open/close/low", c.high),
                });
            }
            if c.low > c.open.min(c.close).min(c.high) {
                return Err(EngineError::InvalidCandle {
                    index,
                    reason: format!("low {} is above open/close/high", c.low),
                });
            }
            if index > 0 && candles[index - 1].timestamp >= c.timestamp {
                return Err(EngineError::InvalidCandle {
                    index,
                    reason: format!(
                        "timestamp {} does not follow {}",
                        c.timestamp,
                        candles[index - 1].timestamp
                    ),
                });
            }
        }
        Ok(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn latest(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.low).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}

/// Derived columns, each the same length as the source series.
/// `None` marks an index where the indicator is not yet computable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,
    pub bb_upper: Vec<Option<f64>>,
    pub bb_middle: Vec<Option<f64>>,
    pub bb_lower: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
}

impl IndicatorSet {
    /// Values at the newest index, plus the previous MACD pair for crossovers.
    pub fn snapshot(&self, series: &CandleSeries) -> Option<IndicatorSnapshot> {
        let last = series.len().checked_sub(1)?;
        let at = |col: &[Option<f64>], i: usize| col.get(i).copied().flatten();
        let prev = last.checked_sub(1);

        Some(IndicatorSnapshot {
            close: series.candles()[last].close,
            rsi: at(&self.rsi, last),
            macd: at(&self.macd, last),
            macd_signal: at(&self.macd_signal, last),
            prev_macd: prev.and_then(|p| at(&self.macd, p)),
            prev_macd_signal: prev.and_then(|p| at(&self.macd_signal, p)),
            bb_upper: at(&self.bb_upper, last),
            bb_middle: at(&self.bb_middle, last),
            bb_lower: at(&self.bb_lower, last),
            atr: at(&self.atr, last),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub prev_macd: Option<f64>,
    pub prev_macd_signal: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub atr: Option<f64>,
}
