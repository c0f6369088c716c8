use chrono::Utc;
use clap::Subcommand;
use studystreak_core::storage::dates::day_key;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's completed sessions
    Today,
    /// All-time totals
    All,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store();
    let stats = store.timer_stats();

    match action {
        StatsAction::Today => {
            let today = day_key(Utc::now());
            // The daily counter only rolls over on completion; a stale
            // last_session date means nothing finished yet today.
            let sessions = if stats.last_session.as_deref() == Some(today.as_str()) {
                stats.sessions_today
            } else {
                0
            };
            let out = serde_json::json!({
                "date": today,
                "sessionsToday": sessions,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::All => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
