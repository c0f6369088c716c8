//! End-to-end tests over the engines, store, and event bridge.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use studystreak_core::{
    DurationConfig, Event, EventBridge, Mode, Store, StreakEngine, TimerEngine, TimerState,
};

fn day(d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, d, h, 0, 0).unwrap()
}

// ── Streak walk across day boundaries ───────────────────────────────

#[test]
fn streak_walk_day0_day1_skip_day3() {
    let store = Store::open_memory();
    let mut engine = StreakEngine::load(&store);

    engine.reconcile(day(1, 9));
    assert_eq!(
        (engine.current_streak(), engine.longest_streak(), engine.total_days()),
        (1, 1, 1)
    );

    engine.reconcile(day(2, 9));
    assert_eq!(
        (engine.current_streak(), engine.longest_streak(), engine.total_days()),
        (2, 2, 2)
    );

    // Day 3 skipped.
    engine.reconcile(day(4, 9));
    assert_eq!(
        (engine.current_streak(), engine.longest_streak(), engine.total_days()),
        (1, 2, 3)
    );
}

#[test]
fn streak_state_survives_engine_reload() {
    let store = Store::open_memory();
    StreakEngine::load(&store).reconcile(day(1, 9));

    // A fresh engine over the same store sees the persisted record and
    // treats the second visit that day as a no-op.
    let mut engine = StreakEngine::load(&store);
    assert!(engine.reconcile(day(1, 20)).is_empty());
    assert_eq!(engine.current_streak(), 1);
}

// ── Timer completion flow through the bridge ────────────────────────

#[test]
fn work_session_completion_flows_to_subscribers() {
    let store = Store::open_memory();
    let mut engine = TimerEngine::new(DurationConfig::default());
    let mut bridge = EventBridge::new();

    let completions: Rc<RefCell<Vec<(Mode, String)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&completions);
    bridge.subscribe(move |e| {
        if let Event::TimerCompleted { mode, message, .. } = e {
            sink.borrow_mut().push((*mode, message.clone()));
        }
    });

    let t0 = day(1, 9);
    engine.start(t0);
    for s in [1, 2, 900, 1499, 1500] {
        if let Some(event) = engine.tick(t0 + Duration::seconds(s)) {
            bridge.publish(&event);
        }
    }

    let completions = completions.borrow();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].0, Mode::Work);
    assert!(!completions[0].1.is_empty());

    assert_eq!(engine.mode(), Mode::Break);
    assert_eq!(engine.state(), TimerState::Idle);
    assert_eq!(engine.remaining_secs(t0 + Duration::seconds(1500)), 300);
    assert_eq!(engine.stats().sessions_today, 1);
    assert_eq!(engine.stats().total_sessions, 1);
    assert_eq!(engine.stats().total_minutes, 25.0);

    // Persist stats the way a host does after each command.
    assert!(store.set_timer_stats(engine.stats()));
    assert_eq!(store.timer_stats().total_sessions, 1);
}

#[test]
fn sessions_today_rolls_over_at_midnight() {
    let mut engine = TimerEngine::new(DurationConfig::default());

    let t0 = day(1, 9);
    engine.start(t0);
    engine.tick(t0 + Duration::seconds(1500));
    assert_eq!(engine.stats().sessions_today, 1);

    // Next day: start a fresh work session after skipping the break.
    engine.change_mode(Mode::Work, day(2, 9));
    engine.start(day(2, 9));
    engine.tick(day(2, 9) + Duration::seconds(1500));

    assert_eq!(engine.stats().sessions_today, 1);
    assert_eq!(engine.stats().total_sessions, 2);
}

#[test]
fn pause_resume_preserves_remaining_time() {
    let mut engine = TimerEngine::new(DurationConfig::default());
    let t0 = day(1, 9);

    engine.start(t0);
    engine.tick(t0 + Duration::seconds(5));
    engine.pause(t0 + Duration::seconds(5));
    // 10 wall-clock seconds pass with no ticks.
    engine.start(t0 + Duration::seconds(15));
    engine.tick(t0 + Duration::seconds(15));

    // Reduced by the 5 running seconds only, not 15.
    assert_eq!(engine.remaining_secs(t0 + Duration::seconds(15)), 1495);
}

#[test]
fn engine_parks_in_the_store_between_invocations() {
    let store = Store::open_memory();
    let t0 = day(1, 9);

    let mut engine = TimerEngine::new(DurationConfig::default());
    engine.start(t0);
    assert!(store.set("timer_engine", &engine));

    // A later invocation reloads and the absolute anchor still holds.
    let mut restored: TimerEngine = store.get("timer_engine", TimerEngine::default());
    let event = restored.tick(t0 + Duration::seconds(1500));
    assert!(matches!(event, Some(Event::TimerCompleted { mode: Mode::Work, .. })));
}

// ── On-disk store behavior ──────────────────────────────────────────

#[test]
fn records_survive_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studystreak.db");

    {
        let store = Store::open_at(&path).unwrap();
        assert!(store.is_persistent());
        let mut engine = StreakEngine::load(&store);
        engine.reconcile(day(1, 9));
    }

    let store = Store::open_at(&path).unwrap();
    let record = store.streak_record();
    assert_eq!(record.current_streak, 1);
    assert_eq!(record.total_days, 1);
}

#[test]
fn corrupt_record_on_disk_reads_as_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studystreak.db");

    {
        let store = Store::open_at(&path).unwrap();
        store.set("streak_data", &"definitely not a streak record");
    }

    let store = Store::open_at(&path).unwrap();
    assert_eq!(store.streak_record().current_streak, 0);
}

#[test]
fn clear_all_wipes_every_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studystreak.db");

    let store = Store::open_at(&path).unwrap();
    let mut engine = StreakEngine::load(&store);
    engine.reconcile(day(1, 9));
    store.migrate("0.1.0");

    store.clear_all();
    assert_eq!(store.streak_record().current_streak, 0);
    assert_eq!(store.app_version(), None);
}

// ── Milestones end to end ───────────────────────────────────────────

#[test]
fn milestones_fire_once_across_a_week() {
    let store = Store::open_memory();
    let mut engine = StreakEngine::load(&store);
    let mut bridge = EventBridge::new();

    let milestones: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&milestones);
    bridge.subscribe(move |e| {
        if let Event::StreakMilestone { streak, .. } = e {
            sink.borrow_mut().push(*streak);
        }
    });

    for d in 1..=7 {
        // Morning and evening visits; only the first each day counts.
        bridge.publish_all(&engine.reconcile(day(d, 9)));
        bridge.publish_all(&engine.reconcile(day(d, 21)));
    }

    assert_eq!(*milestones.borrow(), vec![3, 7]);
}
