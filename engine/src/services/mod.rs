pub mod order_point;

pub use order_point::OrderPointAnalyzer;
