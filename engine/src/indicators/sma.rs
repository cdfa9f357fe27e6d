// Simple Moving Average (SMA) indicator implementation
use super::{rolling_mean, IndicatorCalculator};
use serde_json::Value;
use shared::models::Candle;

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Sma {
    type Output = Vec<Option<f64>>;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = data.iter().map(|c| c.close).collect();
        rolling_mean(&closes, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_close;
    use crate::models::series::test_support::series_from_closes;

    #[test]
    fn test_sma_calculation() {
        let series = series_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let results = Sma::new(3).calculate(series.candles());
        // expected: None, None, (1+2+3)/3=2.0, (2+3+4)/3=3.0, (3+4+5)/3=4.0
        assert_eq!(results[0], None);
        assert_eq!(results[1], None);
        assert_close(results[2], 2.0);
        assert_close(results[3], 3.0);
        assert_close(results[4], 4.0);
    }

    #[test]
    fn test_sma_period_one() {
        let series = series_from_closes(&[1.0, 2.0, 3.0]);
        let results = Sma::new(1).calculate(series.candles());
        assert_eq!(results, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_sma_empty_data() {
        assert!(Sma::new(3).calculate(&[]).is_empty());
    }

    #[test]
    fn test_sma_period_zero_is_undefined() {
        let series = series_from_closes(&[1.0, 2.0]);
        assert_eq!(Sma::new(0).calculate(series.candles()), vec![None, None]);
    }
}
