// Range-based volatility proxy used for entry planning
use super::{rolling_mean, IndicatorCalculator};
use serde_json::Value;
use shared::models::Candle;

/// mean(high, period) - mean(low, period).
///
/// This is not Wilder's Average True Range: gaps between a close and the next
/// open are ignored. The first `period - 1` entries are undefined.
pub struct RangeAtr {
    name: String,
    period: usize,
}

impl RangeAtr {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("ATR({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for RangeAtr {
    type Output = Vec<Option<f64>>;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        let highs: Vec<f64> = data.iter().map(|c| c.high).collect();
        let lows: Vec<f64> = data.iter().map(|c| c.low).collect();

        rolling_mean(&highs, self.period)
            .into_iter()
            .zip(rolling_mean(&lows, self.period))
            .map(|(h, l)| Some(h? - l?))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_close;
    use crate::models::series::test_support::{candle_at, series_from_closes};

    #[test]
    fn test_constant_wicks() {
        // every candle spans close ± 1
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let series = series_from_closes(&closes);
        let out = RangeAtr::new(14).calculate(series.candles());
        assert!(out[..13].iter().all(Option::is_none));
        for value in &out[13..] {
            assert_close(*value, 2.0);
        }
    }

    #[test]
    fn test_ignores_gaps() {
        // A gap up between candles would widen classic ATR but not this proxy.
        let candles = vec![
            candle_at(0, 10.0, 11.0, 9.0, 10.0, 1.0),
            candle_at(1, 20.0, 21.0, 19.0, 20.0, 1.0),
        ];
        let out = RangeAtr::new(2).calculate(&candles);
        assert_eq!(out[0], None);
        assert_close(out[1], 2.0);
    }
}
