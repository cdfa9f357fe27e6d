use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1d")]
    Day1,
}

impl TimeFrame {
    /// Exchange-style label ("1m", "1h", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::Minute1 => "1m",
            TimeFrame::Minute5 => "5m",
            TimeFrame::Minute15 => "15m",
            TimeFrame::Hour1 => "1h",
            TimeFrame::Hour4 => "4h",
            TimeFrame::Day1 => "1d",
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1m" => Ok(TimeFrame::Minute1),
            "5m" => Ok(TimeFrame::Minute5),
            "15m" => Ok(TimeFrame::Minute15),
            "1h" => Ok(TimeFrame::Hour1),
            "4h" => Ok(TimeFrame::Hour4),
            "1d" => Ok(TimeFrame::Day1),
            other => Err(format!("Unknown timeframe '{}'. Use 1m, 5m, 15m, 1h, 4h or 1d.", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SignalAction {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl SignalAction {
    /// Maps a signed point score onto an action.
    pub fn from_score(score: i32) -> Self {
        if score > 40 {
            SignalAction::StrongBuy
        } else if score > 20 {
            SignalAction::Buy
        } else if score < -40 {
            SignalAction::StrongSell
        } else if score < -20 {
            SignalAction::Sell
        } else {
            SignalAction::Hold
        }
    }
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SignalAction::StrongBuy => "STRONG BUY",
            SignalAction::Buy => "BUY",
            SignalAction::Hold => "HOLD",
            SignalAction::Sell => "SELL",
            SignalAction::StrongSell => "STRONG SELL",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub action: SignalAction,
    /// Absolute value of the signed score, 0..=100.
    pub confidence: u32,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryPlan {
    pub current_price: f64,
    pub entry_low: f64,
    pub entry_high: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub risk_reward_ratio: f64,
}

impl EntryPlan {
    pub fn risk(&self) -> f64 {
        self.current_price - self.stop_loss
    }

    /// Copy with every price rounded to cents for presentation.
    pub fn rounded(&self) -> EntryPlan {
        use crate::utils::round_to;
        EntryPlan {
            current_price: round_to(self.current_price, 2),
            entry_low: round_to(self.entry_low, 2),
            entry_high: round_to(self.entry_high, 2),
            stop_loss: round_to(self.stop_loss, 2),
            take_profit_1: round_to(self.take_profit_1, 2),
            take_profit_2: round_to(self.take_profit_2, 2),
            risk_reward_ratio: self.risk_reward_ratio,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    /// Up to three levels, highest first.
    pub support: Vec<f64>,
    /// Up to three levels, lowest first.
    pub resistance: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfile {
    pub average: f64,
    pub current: f64,
    pub ratio: f64,
    pub high_volume: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divergence {
    pub bullish: bool,
    pub bearish: bool,
}

/// Everything one analysis run produces for a single instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub timeframe: TimeFrame,
    pub generated_for: DateTime<Utc>,
    pub signal: Signal,
    pub entry_plan: Option<EntryPlan>,
    pub levels: SupportResistance,
    pub volume: Option<VolumeProfile>,
    pub divergence: Option<Divergence>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_thresholds() {
        assert_eq!(SignalAction::from_score(80), SignalAction::StrongBuy);
        assert_eq!(SignalAction::from_score(41), SignalAction::StrongBuy);
        assert_eq!(SignalAction::from_score(40), SignalAction::Buy);
        assert_eq!(SignalAction::from_score(21), SignalAction::Buy);
        assert_eq!(SignalAction::from_score(20), SignalAction::Hold);
        assert_eq!(SignalAction::from_score(0), SignalAction::Hold);
        assert_eq!(SignalAction::from_score(-20), SignalAction::Hold);
        assert_eq!(SignalAction::from_score(-21), SignalAction::Sell);
        assert_eq!(SignalAction::from_score(-40), SignalAction::Sell);
        assert_eq!(SignalAction::from_score(-41), SignalAction::StrongSell);
    }

    #[test]
    fn test_timeframe_parse_and_serde() {
        assert_eq!("4h".parse::<TimeFrame>().unwrap(), TimeFrame::Hour4);
        assert!("2h".parse::<TimeFrame>().is_err());
        let json = serde_json::to_string(&TimeFrame::Minute15).unwrap();
        assert_eq!(json, "\"15m\"");
        let back: TimeFrame = serde_json::from_str("\"1d\"").unwrap();
        assert_eq!(back, TimeFrame::Day1);
    }

    #[test]
    fn test_entry_plan_rounding() {
        let plan = EntryPlan {
            current_price: 100.126,
            entry_low: 95.004,
            entry_high: 105.255,
            stop_loss: 80.0,
            take_profit_1: 140.0,
            take_profit_2: 160.0,
            risk_reward_ratio: 3.0,
        };
        let rounded = plan.rounded();
        assert_eq!(rounded.current_price, 100.13);
        assert_eq!(rounded.entry_low, 95.0);
        assert_eq!(rounded.stop_loss, 80.0);
        assert!((plan.risk() - 20.126).abs() < 1e-9);
    }
}
