// Bollinger Bands indicator implementation
use super::{rolling_sample_std, IndicatorCalculator, Sma};
use serde_json::Value;
use shared::models::Candle;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BollingerOutput {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// middle = SMA(close, period); upper/lower = middle ± k·σ with σ the sample
/// standard deviation over the same window.
pub struct BollingerBands {
    name: String,
    period: usize,
    std_dev: f64,
}

impl BollingerBands {
    pub fn new(period: usize, std_dev: f64) -> Self {
        Self {
            name: format!("BB({},{})", period, std_dev),
            period,
            std_dev,
        }
    }
}

impl IndicatorCalculator for BollingerBands {
    type Output = BollingerOutput;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "std_dev": self.std_dev })
    }

    fn calculate(&self, data: &[Candle]) -> BollingerOutput {
        let closes: Vec<f64> = data.iter().map(|c| c.close).collect();
        let sma = Sma::new(self.period).calculate(data);
        let sigma = rolling_sample_std(&closes, self.period);

        let mut out = BollingerOutput::default();
        for (mean, sd) in sma.into_iter().zip(sigma) {
            match (mean, sd) {
                (Some(m), Some(s)) => {
                    out.upper.push(Some(m + self.std_dev * s));
                    out.middle.push(Some(m));
                    out.lower.push(Some(m - self.std_dev * s));
                }
                _ => {
                    out.upper.push(None);
                    out.middle.push(None);
                    out.lower.push(None);
                }
            }
        }
        out
    }
}
