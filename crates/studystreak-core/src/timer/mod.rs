mod engine;
mod stats;

pub use engine::{DurationConfig, Mode, TimerEngine, TimerState};
pub use stats::TimerStats;
