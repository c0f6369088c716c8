use chrono::Utc;
use clap::{Subcommand, ValueEnum};
use studystreak_core::{Config, Mode, Store, TimerEngine};

const ENGINE_KEY: &str = "timer_engine";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Resume a paused countdown
    Resume,
    /// Recompute remaining time; completes the interval when it reaches zero
    Tick,
    /// Reset to idle with the current mode's full duration
    Reset,
    /// Switch between work and break
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },
    /// Reconfigure interval lengths in minutes (resets the timer)
    Set {
        #[arg(long)]
        work: u64,
        #[arg(long = "break")]
        break_minutes: u64,
    },
    /// Print the current timer state as JSON
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Work,
    Break,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Mode {
        match arg {
            ModeArg::Work => Mode::Work,
            ModeArg::Break => Mode::Break,
        }
    }
}

pub(crate) fn load_engine(store: &Store) -> TimerEngine {
    if let Some(engine) = store
        .get::<Option<TimerEngine>>(ENGINE_KEY, None)
    {
        return engine;
    }
    let config = Config::load_or_default();
    let durations = config.durations().unwrap_or_default();
    TimerEngine::with_stats(durations, store.timer_stats())
}

pub(crate) fn save_engine(store: &Store, engine: &TimerEngine) {
    store.set(ENGINE_KEY, engine);
    store.set_timer_stats(engine.stats());
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store();
    let mut engine = load_engine(&store);
    let now = Utc::now();

    match action {
        TimerAction::Start | TimerAction::Resume => {
            if let Some(event) = engine.start(now) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot(now))?);
            }
        }
        TimerAction::Pause => {
            if let Some(event) = engine.pause(now) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot(now))?);
            }
        }
        TimerAction::Tick => {
            let completed = engine.tick(now);
            println!("{}", serde_json::to_string_pretty(&engine.snapshot(now))?);
            if let Some(event) = completed {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        TimerAction::Reset => {
            let event = engine.reset(now);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Mode { mode } => {
            let event = engine.change_mode(mode.into(), now);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Set { work, break_minutes } => {
            let event = engine.set_durations(work, break_minutes, now)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot(now))?);
        }
    }

    save_engine(&store, &engine);
    Ok(())
}
