// Technical indicators module
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use atr::RangeAtr;
pub use bollinger::{BollingerBands, BollingerOutput};
pub use ema::Ema;
pub use macd::{Macd, MacdOutput};
pub use rsi::Rsi;
pub use sma::Sma;

use crate::config::settings::IndicatorSettings;
use crate::models::{CandleSeries, IndicatorSet};
use serde_json::Value;
use shared::models::Candle;

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    /// Single-line indicators produce `Vec<Option<f64>>`; multi-line ones a struct of columns.
    type Output;

    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, data: &[Candle]) -> Self::Output;
}

/// Runs every indicator the signal pipeline consumes over `series`.
pub fn compute_all(series: &CandleSeries, settings: &IndicatorSettings) -> IndicatorSet {
    let data = series.candles();

    let rsi = Rsi::new(settings.rsi_period);
    let macd = Macd::new(settings.macd_fast, settings.macd_slow, settings.macd_signal);
    let bands = BollingerBands::new(settings.bb_period, settings.bb_std_dev);
    let atr = RangeAtr::new(settings.atr_period);

    for (name, params) in [
        (rsi.name(), rsi.parameters()),
        (macd.name(), macd.parameters()),
        (bands.name(), bands.parameters()),
        (atr.name(), atr.parameters()),
    ] {
        tracing::debug!(indicator = %name, parameters = %params, candles = data.len(), "Computing indicator");
    }

    let macd_out = macd.calculate(data);
    let bb_out = bands.calculate(data);

    IndicatorSet {
        rsi: rsi.calculate(data),
        macd: macd_out.macd,
        macd_signal: macd_out.signal,
        macd_histogram: macd_out.histogram,
        bb_upper: bb_out.upper,
        bb_middle: bb_out.middle,
        bb_lower: bb_out.lower,
        atr: atr.calculate(data),
    }
}

// Windowing helpers over plain value columns. Each returns a vector the same
// length as its input, with `None` wherever the trailing window is incomplete.

/// Mean of each trailing window of `period` values.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }

    // Summed per window so an all-zero window averages to exactly 0.0.
    let mut results = vec![None; period - 1];
    results.extend(
        values
            .windows(period)
            .map(|window| Some(window.iter().sum::<f64>() / period as f64)),
    );
    results
}

/// Sample (n - 1) standard deviation of each trailing window.
pub fn rolling_sample_std(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period < 2 || values.len() < period {
        return vec![None; values.len()];
    }

    let mut results = vec![None; period - 1];
    for window in values.windows(period) {
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (period - 1) as f64;
        results.push(Some(variance.sqrt()));
    }
    results
}

/// Exponential moving average with α = 2 / (span + 1), seeded with the first value.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut results = Vec::with_capacity(values.len());
    let mut previous: Option<f64> = None;
    for &value in values {
        let next = match previous {
            Some(prev) => alpha * value + (1.0 - alpha) * prev,
            None => value,
        };
        results.push(next);
        previous = Some(next);
    }
    results
}

#[cfg(test)]
pub(crate) fn assert_close(actual: Option<f64>, expected: f64) {
    let value = actual.unwrap_or_else(|| panic!("expected {}, got None", expected));
    assert!((value - expected).abs() < 1e-9, "{} != {}", value, expected);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::series::test_support::series_from_closes;

    #[test]
    fn test_rolling_mean() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_close(out[2], 2.0);
        assert_close(out[3], 3.0);
        assert_close(out[4], 4.0);
    }

    #[test]
    fn test_rolling_mean_insufficient() {
        assert_eq!(rolling_mean(&[1.0, 2.0], 3), vec![None, None]);
        assert_eq!(rolling_mean(&[1.0, 2.0], 0), vec![None, None]);
    }

    #[test]
    fn test_rolling_sample_std() {
        // Sample std of [2, 4, 4, 4, 5, 5, 7, 9] is sqrt(32 / 7).
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let out = rolling_sample_std(&values, 8);
        assert!(out[..7].iter().all(Option::is_none));
        assert_close(out[7], (32.0f64 / 7.0).sqrt());
    }

    #[test]
    fn test_rolling_sample_std_period_one_is_undefined() {
        assert_eq!(rolling_sample_std(&[1.0, 2.0], 1), vec![None, None]);
    }

    #[test]
    fn test_ema_seeded_with_first_value() {
        // span 3 -> alpha 0.5
        let out = ema(&[10.0, 12.0, 14.0], 3);
        assert_eq!(out, vec![10.0, 11.0, 12.5]);
    }

    #[test]
    fn test_compute_all_lengths_match() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let series = series_from_closes(&closes);
        let set = compute_all(&series, &IndicatorSettings::default());
        for col in [
            &set.rsi,
            &set.macd,
            &set.macd_signal,
            &set.macd_histogram,
            &set.bb_upper,
            &set.bb_middle,
            &set.bb_lower,
            &set.atr,
        ] {
            assert_eq!(col.len(), 40);
        }
    }

    #[test]
    fn test_compute_all_is_deterministic() {
        let closes: Vec<f64> = (0..60).map(|i| 50.0 + (i % 7) as f64).collect();
        let series = series_from_closes(&closes);
        let settings = IndicatorSettings::default();
        assert_eq!(compute_all(&series, &settings), compute_all(&series, &settings));
    }
}
