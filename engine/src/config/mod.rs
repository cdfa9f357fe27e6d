pub mod settings;

pub use settings::{AnalyzerSettings, IndicatorSettings, OutputFormat};
