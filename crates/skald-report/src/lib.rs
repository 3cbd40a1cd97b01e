pub mod advice;
pub mod export;
pub mod stats;

pub use advice::{suggest_optimizations, Thresholds};
pub use export::{export_analytics, export_analytics_at, AnalyticsExport};
pub use stats::{modal_statistics, ModalStats};
