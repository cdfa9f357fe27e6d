// Analyzer settings, loaded from a JSON config file or defaulted.
use crate::error::EngineError;
use serde::Deserialize;
use shared::models::TimeFrame;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnalyzerSettings {
    pub symbols: Vec<String>,
    pub timeframe: TimeFrame,
    /// Number of most recent candles requested per symbol.
    pub limit: usize,
    /// Directory holding `<SYMBOL>_<timeframe>.csv` files.
    pub data_dir: PathBuf,
    pub output: OutputFormat,
    pub indicators: IndicatorSettings,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        AnalyzerSettings {
            symbols: vec!["BTC/USDT".to_string()],
            timeframe: TimeFrame::Hour1,
            limit: 500,
            data_dir: PathBuf::from("data"),
            output: OutputFormat::Text,
            indicators: IndicatorSettings::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IndicatorSettings {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bb_period: usize,
    pub bb_std_dev: f64,
    pub atr_period: usize,
    pub level_window: usize,
    pub high_volume_ratio: f64,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        IndicatorSettings {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_period: 20,
            bb_std_dev: 2.0,
            atr_period: 14,
            level_window: 20,
            high_volume_ratio: 1.5,
        }
    }
}

impl AnalyzerSettings {
    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file found, using default settings");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let settings: AnalyzerSettings = serde_json::from_str(&content)
            .map_err(|e| EngineError::ConfigError(format!("Invalid config '{}': {}", path.display(), e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.symbols.is_empty() {
            return Err(EngineError::ConfigError("At least one symbol is required".to_string()));
        }
        if self.limit == 0 {
            return Err(EngineError::ConfigError("limit must be greater than 0".to_string()));
        }
        self.indicators.validate()
    }
}

impl IndicatorSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bb_period", self.bb_period),
            ("atr_period", self.atr_period),
            ("level_window", self.level_window),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(EngineError::ConfigError(format!("{} must be greater than 0", name)));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(EngineError::ConfigError(format!(
                "macd_fast ({}) must be below macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if !(self.bb_std_dev > 0.0) || !(self.high_volume_ratio > 0.0) {
            return Err(EngineError::ConfigError(
                "bb_std_dev and high_volume_ratio must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
