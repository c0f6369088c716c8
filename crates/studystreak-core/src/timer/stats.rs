//! Persisted Pomodoro completion statistics (`timer_data`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::dates::day_key;

/// Session counters. `sessions_today` rolls over to 0 the first time a
/// session completes on a new calendar day; the totals only grow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerStats {
    pub sessions_today: u32,
    pub total_sessions: u32,
    pub total_minutes: f64,
    /// Date-only key of the most recent completed work session.
    pub last_session: Option<String>,
}

impl TimerStats {
    /// Account for one completed work session of `minutes` length.
    pub fn record_work_session(&mut self, minutes: f64, now: DateTime<Utc>) {
        let today = day_key(now);
        if self.last_session.as_deref() != Some(today.as_str()) {
            self.sessions_today = 0;
        }
        self.sessions_today += 1;
        self.total_sessions += 1;
        self.total_minutes += minutes;
        self.last_session = Some(today);
    }
}
