// Engine library root: indicator computation, level/divergence detection and
// signal aggregation over OHLCV candle series.

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod models;
pub mod report;
pub mod services;

pub use error::EngineError;
pub use services::OrderPointAnalyzer;
