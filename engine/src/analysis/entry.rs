// Entry range, stop and targets derived from price and the range-ATR proxy.
use shared::models::EntryPlan;

const ENTRY_BAND_ATR: f64 = 0.5;
const STOP_ATR: f64 = 2.0;
const TARGET_1_RISK: f64 = 2.0;
const TARGET_2_RISK: f64 = 3.0;
/// Reported as-is; not derived from the computed risk and reward.
const RISK_REWARD_RATIO: f64 = 3.0;

/// Builds the plan at full precision. Use [`EntryPlan::rounded`] for display.
pub fn plan_entry(price: f64, atr: f64) -> EntryPlan {
    let stop_loss = price - atr * STOP_ATR;
    let risk = price - stop_loss;

    EntryPlan {
        current_price: price,
        entry_low: price - atr * ENTRY_BAND_ATR,
        entry_high: price + atr * ENTRY_BAND_ATR,
        stop_loss,
        take_profit_1: price + risk * TARGET_1_RISK,
        take_profit_2: price + risk * TARGET_2_RISK,
        risk_reward_ratio: RISK_REWARD_RATIO,
    }
}
