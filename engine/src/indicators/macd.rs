// Moving Average Convergence Divergence (MACD) indicator implementation
use super::{ema, Ema, IndicatorCalculator};
use serde_json::Value;
use shared::models::Candle;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdOutput {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// MACD line = EMA(fast) - EMA(slow); signal = EMA(MACD, signal span);
/// histogram = MACD - signal. Every index is defined because the EMAs are
/// seeded with the first close, although the first `slow - 1` values are
/// still settling.
pub struct Macd {
    name: String,
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            name: format!("MACD({},{},{})", fast, slow, signal),
            fast,
            slow,
            signal,
        }
    }
}

impl IndicatorCalculator for Macd {
    type Output = MacdOutput;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "fast": self.fast, "slow": self.slow, "signal": self.signal })
    }

    fn calculate(&self, data: &[Candle]) -> MacdOutput {
        if self.fast == 0 || self.slow == 0 || self.signal == 0 {
            let undefined = vec![None; data.len()];
            return MacdOutput {
                macd: undefined.clone(),
                signal: undefined.clone(),
                histogram: undefined,
            };
        }

        let fast = Ema::new(self.fast).calculate(data);
        let slow = Ema::new(self.slow).calculate(data);
        let macd: Vec<f64> = fast
            .into_iter()
            .zip(slow)
            .filter_map(|(f, s)| Some(f? - s?))
            .collect();
        let signal = ema(&macd, self.signal);

        MacdOutput {
            histogram: macd.iter().zip(&signal).map(|(m, s)| Some(m - s)).collect(),
            macd: macd.into_iter().map(Some).collect(),
            signal: signal.into_iter().map(Some).collect(),
        }
    }
}
