// Detectors and scorers that run over a series and its indicator columns.
pub mod divergence;
pub mod entry;
pub mod levels;
pub mod signal;

pub use divergence::{detect_divergence, DIVERGENCE_LOOKBACK};
pub use entry::plan_entry;
pub use levels::{find_support_resistance, volume_profile};
pub use signal::generate_signal;
