// Support/resistance extrema and volume statistics.
use crate::models::CandleSeries;
use shared::models::{SupportResistance, VolumeProfile};

const MAX_LEVELS: usize = 3;

/// Scans every index in `[window, n - window)` for local extrema.
///
/// `low[i]` is a support candidate when it equals the minimum low of the
/// half-open slice `[i - window, i + window)`; `high[i]` is a resistance
/// candidate when it equals the maximum high of the same slice. Candidates
/// are deduplicated by value. Returns the three highest supports (descending)
/// and the three lowest resistances (ascending).
pub fn find_support_resistance(series: &CandleSeries, window: usize) -> SupportResistance {
    let n = series.len();
    if window == 0 || n <= 2 * window {
        return SupportResistance::default();
    }

    let lows = series.lows();
    let highs = series.highs();
    let mut support = Vec::new();
    let mut resistance = Vec::new();

    for i in window..n - window {
        let slice = (i - window)..(i + window);
        let min_low = lows[slice.clone()].iter().copied().fold(f64::INFINITY, f64::min);
        let max_high = highs[slice].iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if lows[i] == min_low {
            support.push(lows[i]);
        }
        if highs[i] == max_high {
            resistance.push(highs[i]);
        }
    }

    support.sort_by(|a, b| b.total_cmp(a));
    support.dedup();
    support.truncate(MAX_LEVELS);

    resistance.sort_by(f64::total_cmp);
    resistance.dedup();
    resistance.truncate(MAX_LEVELS);

    tracing::debug!(window, supports = ?support, resistances = ?resistance, "Detected levels");
    SupportResistance { support, resistance }
}

/// Latest volume relative to the full-series average. `None` for an empty series.
pub fn volume_profile(series: &CandleSeries, high_volume_ratio: f64) -> Option<VolumeProfile> {
    let current = series.latest()?.volume;
    let volumes = series.volumes();
    let average = volumes.iter().sum::<f64>() / volumes.len() as f64;
    let ratio = if average > 0.0 { current / average } else { 0.0 };

    Some(VolumeProfile {
        average,
        current,
        ratio,
        high_volume: ratio > high_volume_ratio,
    })
}
