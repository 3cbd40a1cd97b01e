pub mod config;
pub mod scope;
pub mod tracker;

pub use config::TrackerConfig;
pub use scope::ScopedSession;
pub use tracker::{InteractionTracker, TrackerHandle};
