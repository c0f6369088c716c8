//! # StudyStreak Core Library
//!
//! Core business logic for StudyStreak: an exam-countdown and study
//! companion. The CLI binary is a thin layer over this library; any other
//! front end would consume the same engines and events.
//!
//! ## Architecture
//!
//! - **Streak Engine**: idempotent once-per-day reconciliation of the
//!   daily-study streak against the persisted record
//! - **Timer Engine**: a wall-clock-anchored Pomodoro state machine that
//!   requires the caller to invoke `tick()` periodically
//! - **Storage**: SQLite-backed key-value records with soft-failure
//!   semantics and an in-memory degraded mode
//! - **Events**: engine transitions published to registered subscribers
//!
//! ## Key Components
//!
//! - [`StreakEngine`]: streak reconciliation and milestone emission
//! - [`TimerEngine`]: core timer state machine
//! - [`Store`]: record persistence
//! - [`Config`]: application configuration management

pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod messages;
pub mod storage;
pub mod streak;
pub mod timer;

pub use config::Config;
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::{Event, EventBridge};
pub use messages::PersonalMessage;
pub use storage::Store;
pub use streak::{StreakEngine, StreakRecord, MILESTONES};
pub use timer::{DurationConfig, Mode, TimerEngine, TimerState, TimerStats};
