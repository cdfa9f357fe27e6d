// Exponential Moving Average (EMA) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::Candle;

pub struct Ema {
    name: String,
    span: usize,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self {
            name: format!("EMA({})", span),
            span,
        }
    }
}

impl IndicatorCalculator for Ema {
    type Output = Vec<Option<f64>>;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "span": self.span })
    }

    // Defined from the first candle on: EMA[0] is the first close.
    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        if self.span == 0 {
            return vec![None; data.len()];
        }
        let closes: Vec<f64> = data.iter().map(|c| c.close).collect();
        super::ema(&closes, self.span).into_iter().map(Some).collect()
    }
}
