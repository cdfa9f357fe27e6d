// The analysis pipeline: candles in, report out.
use crate::analysis::{detect_divergence, find_support_resistance, generate_signal, plan_entry, volume_profile};
use crate::config::settings::AnalyzerSettings;
use crate::data::CandleProvider;
use crate::error::EngineError;
use crate::indicators::compute_all;
use crate::models::CandleSeries;
use shared::models::AnalysisReport;

pub struct OrderPointAnalyzer {
    settings: AnalyzerSettings,
}

impl OrderPointAnalyzer {
    pub fn new(settings: AnalyzerSettings) -> Self {
        OrderPointAnalyzer { settings }
    }

    /// Runs every detector over `series`. Holds no state between calls, so
    /// the same input always yields the same report.
    pub fn analyze(&self, symbol: &str, series: &CandleSeries) -> Result<AnalysisReport, EngineError> {
        let latest = series.latest().ok_or(EngineError::InsufficientData {
            required: 1,
            available: 0,
        })?;
        let params = &self.settings.indicators;

        let indicators = compute_all(series, params);
        let snapshot = indicators.snapshot(series).ok_or(EngineError::InsufficientData {
            required: 1,
            available: series.len(),
        })?;

        let divergence = detect_divergence(series, &indicators.rsi);
        let signal = generate_signal(&snapshot, divergence);
        let entry_plan = snapshot.atr.map(|atr| plan_entry(snapshot.close, atr));
        if entry_plan.is_none() {
            tracing::warn!(symbol, candles = series.len(), atr_period = params.atr_period, "ATR undefined, no entry plan");
        }
        let levels = find_support_resistance(series, params.level_window);
        let volume = volume_profile(series, params.high_volume_ratio);

        tracing::info!(
            symbol,
            action = %signal.action,
            confidence = signal.confidence,
            candles = series.len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            symbol: symbol.to_string(),
            timeframe: self.settings.timeframe,
            generated_for: latest.timestamp,
            signal,
            entry_plan,
            levels,
            volume,
            divergence,
            rsi: snapshot.rsi,
            macd: snapshot.macd,
        })
    }

    /// Fetches candles for `symbol` and analyzes them. A fetch failure aborts
    /// the run; no partial report is produced.
    pub fn run(&self, provider: &dyn CandleProvider, symbol: &str) -> Result<AnalysisReport, EngineError> {
        tracing::info!(symbol, timeframe = %self.settings.timeframe, limit = self.settings.limit, "Analyzing");
        let series = provider.fetch_candles(symbol, self.settings.timeframe, self.settings.limit)?;
        self.analyze(symbol, &series)
    }

    /// Analyzes each configured symbol independently.
    pub fn run_all(&self, provider: &dyn CandleProvider) -> Vec<(String, Result<AnalysisReport, EngineError>)> {
        self.settings
            .symbols
            .iter()
            .map(|symbol| (symbol.clone(), self.run(provider, symbol)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::IndicatorSettings;
    use crate::data::MarketDataStore;
    use crate::models::series::test_support::{candle_at, series_from_closes};
    use shared::models::{Divergence, SignalAction, TimeFrame};

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 1000.0 + (i as f64 * 0.3).sin() * 40.0 + (i as f64 * 0.05).cos() * 15.0)
            .collect()
    }

    fn analyzer() -> OrderPointAnalyzer {
        OrderPointAnalyzer::new(AnalyzerSettings::default())
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let series = series_from_closes(&wave(300));
        let a = analyzer().analyze("BTC/USDT", &series).unwrap();
        let b = analyzer().analyze("BTC/USDT", &series).unwrap();
        assert_eq!(a, b);
        assert!(a.entry_plan.is_some());
        assert!(a.volume.is_some());
        assert!(a.divergence.is_some());
        assert!(a.rsi.is_some());
        assert!(a.signal.confidence <= 100);
    }

    #[test]
    fn test_entry_plan_uses_latest_close_and_atr() {
        // every candle spans close ± 1, so the ATR proxy is exactly 2
        let series = series_from_closes(&wave(50));
        let report = analyzer().analyze("ETH/USDT", &series).unwrap();
        let plan = report.entry_plan.unwrap();
        let close = series.latest().unwrap().close;
        assert!((plan.current_price - close).abs() < 1e-9);
        assert!((plan.stop_loss - (close - 4.0)).abs() < 1e-9);
        assert!((plan.take_profit_2 - (close + 12.0)).abs() < 1e-9);
    }

    #[test]
    fn test_short_series_skips_undefined_rules() {
        // 10 rising candles: no RSI, no bands, no divergence, no ATR
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let series = series_from_closes(&closes);
        let report = analyzer().analyze("SOL/USDT", &series).unwrap();
        assert_eq!(report.rsi, None);
        assert_eq!(report.divergence, None);
        assert_eq!(report.entry_plan, None);
        assert!(report.levels.support.is_empty());
        assert!(!report.signal.reasons.iter().any(|r| r.contains("Bollinger")));
        assert!(!report.signal.reasons.iter().any(|r| r.contains("RSI")));
    }

    #[test]
    fn test_empty_series_is_insufficient_data() {
        let series = CandleSeries::new(Vec::new()).unwrap();
        let err = analyzer().analyze("BTC/USDT", &series).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData { available: 0, .. }));
    }

    #[test]
    fn test_selloff_reads_oversold() {
        // Flat, a steady slide, then a capitulation candle through the lower band.
        let mut closes = vec![500.0; 60];
        closes.extend((1..=19).map(|i| 500.0 - i as f64 * 5.0));
        closes.push(300.0);
        let series = series_from_closes(&closes);
        let report = analyzer().analyze("BTC/USDT", &series).unwrap();
        assert_eq!(report.rsi, Some(0.0));
        assert!(report.signal.reasons.contains(&"RSI oversold".to_string()));
        assert!(report.signal.reasons.contains(&"Price below lower Bollinger Band".to_string()));
        assert_ne!(report.signal.action, SignalAction::Sell);
        assert_ne!(report.signal.action, SignalAction::StrongSell);
    }

    #[test]
    fn test_capitulation_bounce_fires_every_bullish_rule() {
        // Flat base, a rally, a crash (RSI pinned at 0), then a drift lower on
        // shrinking losses. The last close sits below the close 20 candles back
        // with a higher RSI, and MACD crosses its signal line on the last candle.
        let mut closes = vec![100.0; 30];
        closes.extend([
            56.1, 92.6, 132.8, 59.9, 99.4, 138.6, 125.6, 128.9, 131.5, 154.2, 252.4, 250.4, 327.9,
            398.6, 488.0, 527.0, 532.8, 592.2, 628.3, 667.4, 641.2, 665.8, 723.0, 776.8, 881.7,
            885.3, 882.5, 879.4, 866.0, 860.2, 858.4, 857.6, 815.0, 780.2, 768.1, 726.8, 699.9,
            580.4, 496.9, 392.9, 321.1, 327.0, 318.4, 324.2, 309.0, 332.2, 335.5, 316.0, 321.7,
            322.0, 328.9, 316.8, 315.7, 306.8, 305.3, 290.7, 283.7, 266.5, 258.3, 256.6,
        ]);
        let series = series_from_closes(&closes);
        let report = analyzer().analyze("BTC/USDT", &series).unwrap();

        assert_eq!(
            report.signal.reasons,
            vec![
                "RSI oversold".to_string(),
                "MACD bullish crossover".to_string(),
                "Price below lower Bollinger Band".to_string(),
                "Bullish divergence detected".to_string(),
            ]
        );
        assert_eq!(report.signal.confidence, 80);
        assert_eq!(report.signal.action, SignalAction::StrongBuy);
        assert_eq!(report.divergence, Some(Divergence { bullish: true, bearish: false }));
        assert!(report.rsi.unwrap() < 30.0);
    }

    #[test]
    fn test_run_all_isolates_symbols() {
        let mut store = MarketDataStore::new();
        let good: Vec<_> = wave(120)
            .into_iter()
            .enumerate()
            .map(|(i, c)| candle_at(i, c, c + 2.0, c - 2.0, c, 500.0))
            .collect();
        store.add_candles("BTC/USDT", TimeFrame::Hour1, good);

        let settings = AnalyzerSettings {
            symbols: vec!["BTC/USDT".to_string(), "MISSING/USDT".to_string()],
            indicators: IndicatorSettings::default(),
            ..AnalyzerSettings::default()
        };
        let results = OrderPointAnalyzer::new(settings).run_all(&store);
        assert_eq!(results.len(), 2);
        assert!(results[0].1.is_ok());
        assert!(matches!(results[1].1, Err(EngineError::DataFetch { .. })));

        let report = results[0].1.as_ref().unwrap();
        assert_eq!(report.symbol, "BTC/USDT");
        assert_eq!(report.timeframe, TimeFrame::Hour1);
        let plan = report.entry_plan.as_ref().unwrap();
        assert!((plan.entry_high - plan.entry_low - 4.0).abs() < 1e-9);
    }
}
