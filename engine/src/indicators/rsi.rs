// Relative Strength Index (RSI) indicator implementation
use super::{rolling_mean, IndicatorCalculator};
use serde_json::Value;
use shared::models::Candle;

/// RSI over simple trailing means of gains and losses (not Wilder smoothing).
///
/// The first `period` entries are undefined: the window needs `period`
/// close-to-close changes, and index 0 has no change. When the window has no
/// losses the value saturates to 100, or sits at 50 if it has no gains either.
pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Rsi {
    type Output = Vec<Option<f64>>;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        if data.len() <= self.period || self.period == 0 {
            return vec![None; data.len()];
        }

        let (gains, losses): (Vec<f64>, Vec<f64>) = data
            .windows(2)
            .map(|pair| {
                let change = pair[1].close - pair[0].close;
                (change.max(0.0), (-change).max(0.0))
            })
            .unzip();

        let avg_gains = rolling_mean(&gains, self.period);
        let avg_losses = rolling_mean(&losses, self.period);

        let mut results = vec![None]; // no change at index 0
        for (gain, loss) in avg_gains.into_iter().zip(avg_losses) {
            results.push(match (gain, loss) {
                (Some(g), Some(l)) => Some(rsi_value(g, l)),
                _ => None,
            });
        }
        results
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
