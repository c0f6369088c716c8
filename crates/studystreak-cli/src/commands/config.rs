use chrono::{DateTime, Utc};
use clap::Subcommand;
use studystreak_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Set the exam date and/or target score
    SetExam {
        /// Exam date-time, RFC 3339 (e.g. 2026-06-08T08:30:00Z)
        #[arg(long)]
        date: Option<String>,
        /// Goal score, 120-180
        #[arg(long)]
        score: Option<u32>,
    },
    /// Set timer durations in minutes (resets the timer to the new lengths)
    SetTimer {
        #[arg(long)]
        work: u64,
        #[arg(long = "break")]
        break_minutes: u64,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;

    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::SetExam { date, score } => {
            if let Some(date) = date {
                let parsed: DateTime<Utc> = DateTime::parse_from_rfc3339(&date)?.with_timezone(&Utc);
                config.exam.lsat_date = Some(parsed);
            }
            if let Some(score) = score {
                config.exam.target_score = Some(score);
            }
            config.validate()?;
            config.save()?;
            println!("{}", serde_json::to_string_pretty(&config.exam)?);
        }
        ConfigAction::SetTimer { work, break_minutes } => {
            config.timer.work_minutes = work;
            config.timer.break_minutes = break_minutes;
            config.validate()?;
            config.save()?;

            // A persisted engine carries its own durations, so push the new
            // lengths into it; otherwise they would only apply to a fresh
            // engine.
            let store = super::open_store();
            let mut engine = super::timer::load_engine(&store);
            engine.set_durations(work, break_minutes, Utc::now())?;
            super::timer::save_engine(&store, &engine);

            println!("{}", serde_json::to_string_pretty(&config.timer)?);
        }
    }
    Ok(())
}
