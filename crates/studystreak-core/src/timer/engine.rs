//! Pomodoro timer engine.
//!
//! A wall-clock-anchored state machine with no internal threads: the caller
//! invokes `tick()` on a 1-second cadence while running, plus once
//! immediately after regaining foreground, and passes `now` into every
//! operation. Remaining time is always derived from the absolute end
//! instant, never decremented, so callback delay, throttling, and device
//! sleep cannot drift the countdown.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ... -> Idle (complete/reset)
//! ```
//!
//! Completion auto-switches the mode and re-arms the opposite duration but
//! never auto-starts: the next interval waits for an explicit `start()`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stats::TimerStats;
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Work,
    Break,
}

impl Mode {
    pub fn other(self) -> Mode {
        match self {
            Mode::Work => Mode::Break,
            Mode::Break => Mode::Work,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Work/break interval lengths in seconds, both strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationConfig {
    pub work_secs: u64,
    pub break_secs: u64,
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            break_secs: 5 * 60,
        }
    }
}

impl DurationConfig {
    /// Build from user-facing minutes, rejecting non-positive values.
    ///
    /// # Errors
    /// Returns a validation error when either duration is zero.
    pub fn from_minutes(work_min: u64, break_min: u64) -> Result<Self, ValidationError> {
        if work_min == 0 || break_min == 0 {
            return Err(ValidationError::InvalidValue {
                field: "timer durations".into(),
                message: "work and break minutes must both be greater than zero".into(),
            });
        }
        Ok(Self {
            work_secs: work_min.saturating_mul(60),
            break_secs: break_min.saturating_mul(60),
        })
    }

    pub fn for_mode(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Work => self.work_secs,
            Mode::Break => self.break_secs,
        }
    }
}

/// Core timer engine.
///
/// Serializable so a host can park it in the key-value store between
/// invocations; the absolute `end_epoch_ms` anchor makes the reloaded
/// engine resume correctly however much wall time passed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    durations: DurationConfig,
    mode: Mode,
    state: TimerState,
    /// Frozen remaining time; authoritative only while not running.
    remaining_secs: u64,
    /// Absolute completion instant while running.
    #[serde(default)]
    end_epoch_ms: Option<i64>,
    #[serde(default)]
    stats: TimerStats,
}

impl TimerEngine {
    /// Idle in work mode, armed with the work duration.
    pub fn new(durations: DurationConfig) -> Self {
        Self {
            durations,
            mode: Mode::Work,
            state: TimerState::Idle,
            remaining_secs: durations.work_secs,
            end_epoch_ms: None,
            stats: TimerStats::default(),
        }
    }

    pub fn with_stats(durations: DurationConfig, stats: TimerStats) -> Self {
        Self {
            stats,
            ..Self::new(durations)
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn durations(&self) -> DurationConfig {
        self.durations
    }

    pub fn stats(&self) -> &TimerStats {
        &self.stats
    }

    /// Remaining seconds as of `now`.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u64 {
        match self.state {
            TimerState::Running => self.derive_remaining(now),
            _ => self.remaining_secs,
        }
    }

    pub fn total_secs(&self) -> u64 {
        self.durations.for_mode(self.mode)
    }

    /// 0.0 .. 1.0 progress within the current interval.
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs(now) as f64 / total as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            state: self.state,
            mode: self.mode,
            remaining_secs: self.remaining_secs(now),
            total_secs: self.total_secs(),
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm the countdown: `Idle | Paused -> Running`.
    ///
    /// The end instant is recomputed from the frozen remaining time, so
    /// time spent paused is excluded from the countdown. No-op while
    /// already running.
    pub fn start(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.arm(now);
                Some(Event::TimerStarted {
                    mode: self.mode,
                    duration_secs: self.remaining_secs,
                    at: now,
                })
            }
            TimerState::Paused => {
                self.arm(now);
                Some(Event::TimerResumed {
                    remaining_secs: self.remaining_secs,
                    at: now,
                })
            }
            TimerState::Running => None,
        }
    }

    /// Freeze the countdown: `Running -> Paused`. No-op otherwise.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.derive_remaining(now);
        self.end_epoch_ms = None;
        self.state = TimerState::Paused;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: now,
        })
    }

    /// Recompute remaining time from the wall clock while running.
    ///
    /// Returns the completion event when the countdown reaches zero.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.derive_remaining(now);
        if self.remaining_secs == 0 {
            return Some(self.complete(now));
        }
        None
    }

    /// Any state -> Idle, re-armed with the current mode's full duration.
    pub fn reset(&mut self, now: DateTime<Utc>) -> Event {
        self.state = TimerState::Idle;
        self.end_epoch_ms = None;
        self.remaining_secs = self.durations.for_mode(self.mode);
        Event::TimerReset { at: now }
    }

    /// Stop and switch to `mode`, idle with that mode's full duration.
    pub fn change_mode(&mut self, mode: Mode, now: DateTime<Utc>) -> Event {
        self.state = TimerState::Idle;
        self.end_epoch_ms = None;
        self.mode = mode;
        self.remaining_secs = self.durations.for_mode(mode);
        Event::ModeChanged {
            mode,
            duration_secs: self.remaining_secs,
            at: now,
        }
    }

    /// Reconfigure interval lengths; resets the timer for the current mode.
    ///
    /// # Errors
    /// Returns a validation error when either duration is zero.
    pub fn set_durations(
        &mut self,
        work_min: u64,
        break_min: u64,
        now: DateTime<Utc>,
    ) -> Result<Event, ValidationError> {
        self.durations = DurationConfig::from_minutes(work_min, break_min)?;
        Ok(self.reset(now))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn arm(&mut self, now: DateTime<Utc>) {
        self.end_epoch_ms = Some(now.timestamp_millis() + self.remaining_secs as i64 * 1000);
        self.state = TimerState::Running;
    }

    /// `max(0, ceil((end - now) / 1000))`.
    fn derive_remaining(&self, now: DateTime<Utc>) -> u64 {
        let Some(end) = self.end_epoch_ms else {
            return self.remaining_secs;
        };
        let diff_ms = end - now.timestamp_millis();
        if diff_ms <= 0 {
            0
        } else {
            ((diff_ms + 999) / 1000) as u64
        }
    }

    fn complete(&mut self, now: DateTime<Utc>) -> Event {
        self.state = TimerState::Idle;
        self.end_epoch_ms = None;

        let finished = self.mode;
        let message = match finished {
            Mode::Work => "Session complete. Take your break!",
            Mode::Break => "Break's over. Ready for the next session?",
        };
        if finished == Mode::Work {
            self.stats
                .record_work_session(self.durations.work_secs as f64 / 60.0, now);
        }

        // Auto-switch, never auto-start.
        self.mode = finished.other();
        self.remaining_secs = self.durations.for_mode(self.mode);

        Event::TimerCompleted {
            mode: finished,
            message: message.into(),
            at: now,
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(DurationConfig::default())
    }
}
