//! Events and the notification bridge.
//!
//! Every state change in the engines produces an [`Event`]. Display
//! collaborators register callbacks on an [`EventBridge`]; dispatch is
//! synchronous, fire-and-forget, at most once per triggering transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Mode, TimerState};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// First-ever qualifying visit; streak begins at 1.
    StreakStarted {
        streak: u32,
        at: DateTime<Utc>,
    },
    /// Consecutive-day visit extended the streak.
    StreakExtended {
        streak: u32,
        longest: u32,
        at: DateTime<Utc>,
    },
    /// A missed day broke the streak; it restarts at 1.
    StreakReset {
        previous: u32,
        at: DateTime<Utc>,
    },
    /// The streak reached a designated milestone length.
    StreakMilestone {
        streak: u32,
        message: String,
        at: DateTime<Utc>,
    },
    TimerStarted {
        mode: Mode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A work or break interval ran down to zero.
    TimerCompleted {
        mode: Mode,
        message: String,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    ModeChanged {
        mode: Mode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        mode: Mode,
        remaining_secs: u64,
        total_secs: u64,
        at: DateTime<Utc>,
    },
}

type Subscriber = Box<dyn FnMut(&Event)>;

/// Decouples engine transitions from UI reaction.
///
/// Subscribers are registered explicitly; there is no ambient dispatch,
/// no queueing, and no retry.
#[derive(Default)]
pub struct EventBridge {
    subscribers: Vec<Subscriber>,
}

impl EventBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, f: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.subscribers.push(Box::new(f));
    }

    /// Dispatch one event to every subscriber, in registration order.
    pub fn publish(&mut self, event: &Event) {
        for sub in &mut self.subscribers {
            sub(event);
        }
    }

    pub fn publish_all(&mut self, events: &[Event]) {
        for event in events {
            self.publish(event);
        }
    }
}
