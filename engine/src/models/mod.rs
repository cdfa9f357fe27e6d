// Engine-side views over the shared candle model: the validated series and
// the indicator columns derived from it.
pub mod series;

pub use series::{CandleSeries, IndicatorSet, IndicatorSnapshot};
