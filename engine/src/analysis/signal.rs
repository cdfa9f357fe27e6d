// Point-scoring aggregation of the indicator snapshot into one action.
use crate::models::IndicatorSnapshot;
use shared::models::{Divergence, Signal, SignalAction};

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;

const RSI_POINTS: i32 = 20;
const MACD_CROSS_POINTS: i32 = 25;
const BAND_POINTS: i32 = 15;
const DIVERGENCE_POINTS: i32 = 20;

/// Scores the snapshot rule by rule, in a fixed order.
///
/// Within each rule the bullish and bearish branches are exclusive: at most
/// one fires. A rule whose inputs are undefined is skipped entirely.
/// Reported confidence is the absolute value of the signed score.
pub fn generate_signal(snapshot: &IndicatorSnapshot, divergence: Option<Divergence>) -> Signal {
    let mut reasons = Vec::new();
    let mut score: i32 = 0;

    if let Some(rsi) = snapshot.rsi {
        if rsi < RSI_OVERSOLD {
            reasons.push("RSI oversold".to_string());
            score += RSI_POINTS;
        } else if rsi > RSI_OVERBOUGHT {
            reasons.push("RSI overbought".to_string());
            score -= RSI_POINTS;
        }
    }

    if let (Some(macd), Some(signal), Some(prev_macd), Some(prev_signal)) = (
        snapshot.macd,
        snapshot.macd_signal,
        snapshot.prev_macd,
        snapshot.prev_macd_signal,
    ) {
        if macd > signal && prev_macd <= prev_signal {
            reasons.push("MACD bullish crossover".to_string());
            score += MACD_CROSS_POINTS;
        } else if macd < signal && prev_macd >= prev_signal {
            reasons.push("MACD bearish crossover".to_string());
            score -= MACD_CROSS_POINTS;
        }
    }

    if let (Some(lower), Some(upper)) = (snapshot.bb_lower, snapshot.bb_upper) {
        if snapshot.close < lower {
            reasons.push("Price below lower Bollinger Band".to_string());
            score += BAND_POINTS;
        } else if snapshot.close > upper {
            reasons.push("Price above upper Bollinger Band".to_string());
            score -= BAND_POINTS;
        }
    }

    if let Some(div) = divergence {
        if div.bullish {
            reasons.push("Bullish divergence detected".to_string());
            score += DIVERGENCE_POINTS;
        } else if div.bearish {
            reasons.push("Bearish divergence detected".to_string());
            score -= DIVERGENCE_POINTS;
        }
    }

    let action = SignalAction::from_score(score);
    tracing::debug!(score, ?action, reasons = reasons.len(), "Signal scored");

    Signal {
        action,
        confidence: score.unsigned_abs(),
        reasons,
    }
}
