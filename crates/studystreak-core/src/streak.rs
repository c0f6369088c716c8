//! Daily-study streak bookkeeping.
//!
//! [`StreakEngine::reconcile`] runs once per session and brings the
//! persisted record in line with the current date: it starts, extends, or
//! resets the streak, and is idempotent for repeat visits on the same
//! calendar day. The same-day check compares calendar dates *before* the
//! millisecond day distance is consulted, so a just-past-midnight visit is
//! never mistaken for a same-day replay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::messages::milestone_message;
use crate::storage::dates::{days_between, from_epoch_ms, is_same_day};
use crate::storage::Store;

/// Streak lengths that trigger a one-time celebratory notification.
pub const MILESTONES: [u32; 6] = [3, 7, 14, 30, 50, 100];

/// Persisted streak state (`streak_data`).
///
/// Timestamps are epoch milliseconds; `last_visit` is `None` only before
/// the first visit and `start_date` is set once on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreakRecord {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_days: u32,
    pub last_visit: Option<i64>,
    pub start_date: i64,
}

/// Streak state machine over the store.
pub struct StreakEngine<'a> {
    store: &'a Store,
    record: StreakRecord,
}

impl<'a> StreakEngine<'a> {
    /// Load the persisted record, creating defaults if absent.
    pub fn load(store: &'a Store) -> Self {
        let record = store.streak_record();
        Self { store, record }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn record(&self) -> &StreakRecord {
        &self.record
    }

    pub fn current_streak(&self) -> u32 {
        self.record.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.record.longest_streak
    }

    pub fn total_days(&self) -> u32 {
        self.record.total_days
    }

    /// True iff a qualifying visit was already recorded today.
    pub fn visited_today(&self, now: DateTime<Utc>) -> bool {
        self.record
            .last_visit
            .map(|ms| is_same_day(from_epoch_ms(ms), now))
            .unwrap_or(false)
    }

    /// True iff an active streak would break without a visit today.
    pub fn is_at_risk(&self, now: DateTime<Utc>) -> bool {
        self.record.current_streak > 0 && !self.visited_today(now)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Reconcile the persisted streak against the current date.
    ///
    /// Mutates and persists the record at most once per calendar day;
    /// a repeat call the same day returns no events and changes nothing.
    pub fn reconcile(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let now_ms = now.timestamp_millis();
        let mut events = Vec::new();

        match self.record.last_visit {
            None => {
                self.record.current_streak = 1;
                self.record.longest_streak = self.record.longest_streak.max(1);
                self.record.total_days = 1;
                self.record.last_visit = Some(now_ms);
                self.record.start_date = now_ms;
                events.push(Event::StreakStarted { streak: 1, at: now });
                events.extend(self.milestone_event(now));
            }
            Some(last_ms) => {
                let last = from_epoch_ms(last_ms);
                if is_same_day(last, now) {
                    return events;
                }
                if days_between(last, now) == 1 {
                    self.record.current_streak += 1;
                    self.record.total_days += 1;
                    self.record.last_visit = Some(now_ms);
                    self.record.longest_streak =
                        self.record.longest_streak.max(self.record.current_streak);
                    events.push(Event::StreakExtended {
                        streak: self.record.current_streak,
                        longest: self.record.longest_streak,
                        at: now,
                    });
                    events.extend(self.milestone_event(now));
                } else {
                    // Covers both a gap of several days and the sub-24h
                    // midnight crossing where the day distance floors to 0.
                    let previous = self.record.current_streak;
                    self.record.current_streak = 1;
                    self.record.total_days += 1;
                    self.record.last_visit = Some(now_ms);
                    events.push(Event::StreakReset { previous, at: now });
                }
            }
        }

        self.store.set_streak_record(&self.record);
        events
    }

    fn milestone_event(&self, now: DateTime<Utc>) -> Option<Event> {
        let streak = self.record.current_streak;
        if !MILESTONES.contains(&streak) {
            return None;
        }
        Some(Event::StreakMilestone {
            streak,
            message: milestone_message(streak).unwrap_or_default().to_string(),
            at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn day(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0).unwrap()
    }

    fn milestones_in(events: &[Event]) -> Vec<u32> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::StreakMilestone { streak, .. } => Some(*streak),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn first_visit_starts_streak() {
        let store = Store::open_memory();
        let mut engine = StreakEngine::load(&store);
        let events = engine.reconcile(day(1, 9));

        assert_eq!(engine.current_streak(), 1);
        assert_eq!(engine.longest_streak(), 1);
        assert_eq!(engine.total_days(), 1);
        assert!(matches!(events[0], Event::StreakStarted { streak: 1, .. }));
        assert!(milestones_in(&events).is_empty());
    }

    #[test]
    fn same_day_repeat_is_a_noop() {
        let store = Store::open_memory();
        let mut engine = StreakEngine::load(&store);
        engine.reconcile(day(1, 9));
        let before = engine.record().clone();

        let events = engine.reconcile(day(1, 22));
        assert!(events.is_empty());
        assert_eq!(engine.record(), &before);
    }

    #[test]
    fn next_day_extends() {
        let store = Store::open_memory();
        let mut engine = StreakEngine::load(&store);
        engine.reconcile(day(1, 9));
        engine.reconcile(day(2, 9));

        assert_eq!(engine.current_streak(), 2);
        assert_eq!(engine.longest_streak(), 2);
        assert_eq!(engine.total_days(), 2);
    }

    #[test]
    fn skipped_day_resets_but_keeps_longest() {
        let store = Store::open_memory();
        let mut engine = StreakEngine::load(&store);
        engine.reconcile(day(1, 9));
        engine.reconcile(day(2, 9));
        let events = engine.reconcile(day(4, 9));

        assert_eq!(engine.current_streak(), 1);
        assert_eq!(engine.longest_streak(), 2);
        assert_eq!(engine.total_days(), 3);
        assert!(matches!(events[0], Event::StreakReset { previous: 2, .. }));
    }

    #[test]
    fn midnight_crossing_under_24h_resets() {
        // Different dates but floor distance 0: falls to the reset branch,
        // matching the two-step check order.
        let store = Store::open_memory();
        let mut engine = StreakEngine::load(&store);
        engine.reconcile(day(1, 23));
        engine.reconcile(day(2, 0));

        assert_eq!(engine.current_streak(), 1);
        assert_eq!(engine.total_days(), 2);
    }

    #[test]
    fn milestone_fires_exactly_once_per_transition() {
        let store = Store::open_memory();
        store.set_streak_record(&StreakRecord {
            current_streak: 2,
            longest_streak: 2,
            total_days: 2,
            last_visit: Some(day(2, 9).timestamp_millis()),
            start_date: day(1, 9).timestamp_millis(),
        });

        let mut engine = StreakEngine::load(&store);
        let events = engine.reconcile(day(3, 9));
        assert_eq!(milestones_in(&events), vec![3]);

        // Same-day replay emits nothing.
        let events = engine.reconcile(day(3, 21));
        assert!(events.is_empty());
    }

    #[test]
    fn reset_emits_no_milestone() {
        let store = Store::open_memory();
        store.set_streak_record(&StreakRecord {
            current_streak: 7,
            longest_streak: 7,
            total_days: 7,
            last_visit: Some(day(1, 9).timestamp_millis()),
            start_date: day(1, 9).timestamp_millis(),
        });

        let mut engine = StreakEngine::load(&store);
        let events = engine.reconcile(day(5, 9));
        assert!(milestones_in(&events).is_empty());
        assert_eq!(engine.longest_streak(), 7);
    }

    #[test]
    fn at_risk_until_visited() {
        let store = Store::open_memory();
        let mut engine = StreakEngine::load(&store);
        assert!(!engine.is_at_risk(day(1, 9))); // no streak yet

        engine.reconcile(day(1, 9));
        assert!(!engine.is_at_risk(day(1, 20)));
        assert!(engine.visited_today(day(1, 20)));
        assert!(engine.is_at_risk(day(2, 9)));
    }

    #[test]
    fn start_date_survives_reset() {
        let store = Store::open_memory();
        let mut engine = StreakEngine::load(&store);
        engine.reconcile(day(1, 9));
        let start = engine.record().start_date;
        engine.reconcile(day(4, 9));
        assert_eq!(engine.record().start_date, start);
    }

    proptest! {
        #[test]
        fn invariants_hold_over_visit_sequences(offsets in proptest::collection::vec(0u32..4, 1..30)) {
            let store = Store::open_memory();
            let mut engine = StreakEngine::load(&store);
            let mut d = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
            let mut prev_total = 0;

            for gap in offsets {
                d += chrono::Duration::days(gap as i64);
                engine.reconcile(d);
                let r = engine.record().clone();
                prop_assert!(r.longest_streak >= r.current_streak);
                prop_assert!(r.total_days >= prev_total);
                prev_total = r.total_days;
            }
        }
    }
}
