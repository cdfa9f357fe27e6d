// Price/RSI divergence over a fixed lookback.
use crate::models::CandleSeries;
use shared::models::Divergence;

/// Candles between the two compared points. Independent of any indicator window.
pub const DIVERGENCE_LOOKBACK: usize = 20;

/// Compares the latest close and RSI with the values `DIVERGENCE_LOOKBACK`
/// candles earlier.
///
/// Bullish: price fell while RSI rose. Bearish: price rose while RSI fell.
/// Returns `None` when the series holds fewer than `DIVERGENCE_LOOKBACK + 1`
/// candles or either RSI value is undefined.
pub fn detect_divergence(series: &CandleSeries, rsi: &[Option<f64>]) -> Option<Divergence> {
    let last = series.len().checked_sub(1)?;
    let earlier = last.checked_sub(DIVERGENCE_LOOKBACK)?;

    let closes = series.closes();
    let (close_now, close_then) = (closes[last], closes[earlier]);
    let rsi_now = rsi.get(last).copied().flatten()?;
    let rsi_then = rsi.get(earlier).copied().flatten()?;

    Some(Divergence {
        bullish: close_now < close_then && rsi_now > rsi_then,
        bearish: close_now > close_then && rsi_now < rsi_then,
    })
}
