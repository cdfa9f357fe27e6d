// Console rendering of an analysis report.
use shared::models::AnalysisReport;
use shared::utils::format_price;
use std::fmt;

const RULE_WIDTH: usize = 50;

fn join_prices(levels: &[f64]) -> String {
    if levels.is_empty() {
        return "n/a".to_string();
    }
    levels.iter().map(|&p| format_price(p)).collect::<Vec<_>>().join(", ")
}

fn or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}

pub fn render_text(report: &AnalysisReport) -> String {
    TextReport(report).to_string()
}

/// Display adapter producing the console layout.
pub struct TextReport<'a>(pub &'a AnalysisReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{}", rule)?;
        writeln!(f, "{} Analysis ({})", report.symbol, report.timeframe)?;
        writeln!(f, "{}\n", rule)?;

        writeln!(f, "Signal: {}", report.signal.action)?;
        writeln!(f, "Confidence: {}%\n", report.signal.confidence)?;

        match &report.entry_plan {
            Some(plan) => {
                let plan = plan.rounded();
                writeln!(f, "Current Price: {}", format_price(plan.current_price))?;
                writeln!(
                    f,
                    "Entry Range: {} - {}",
                    format_price(plan.entry_low),
                    format_price(plan.entry_high)
                )?;
                writeln!(f, "Stop Loss: {}", format_price(plan.stop_loss))?;
                writeln!(f, "Take Profit 1: {}", format_price(plan.take_profit_1))?;
                writeln!(f, "Take Profit 2: {}", format_price(plan.take_profit_2))?;
                writeln!(f, "Risk/Reward: 1:{}\n", plan.risk_reward_ratio)?;
            }
            None => writeln!(f, "Entry plan unavailable: not enough candles for ATR\n")?,
        }

        writeln!(f, "Technical Indicators:")?;
        writeln!(f, "- RSI(14): {}", or_na(report.rsi))?;
        writeln!(f, "- MACD: {}", or_na(report.macd))?;
        writeln!(f, "- Support Levels: {}", join_prices(&report.levels.support))?;
        writeln!(f, "- Resistance Levels: {}", join_prices(&report.levels.resistance))?;
        match &report.volume {
            Some(volume) => {
                let flag = if volume.high_volume { " (high volume)" } else { "" };
                writeln!(f, "- Volume Ratio: {:.2}x{}\n", volume.ratio, flag)?;
            }
            None => writeln!(f, "- Volume Ratio: n/a\n")?,
        }

        writeln!(f, "Reasoning:")?;
        if report.signal.reasons.is_empty() {
            writeln!(f, "- No rule fired")?;
        }
        for reason in &report.signal.reasons {
            writeln!(f, "- {}", reason)?;
        }
        Ok(())
    }
}
