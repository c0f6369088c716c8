use chrono::Utc;
use clap::Subcommand;
use studystreak_core::StreakEngine;

#[derive(Subcommand)]
pub enum StreakAction {
    /// Record today's visit and print the updated record plus any events
    Reconcile,
    /// Print the current streak record
    Status,
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store();
    let now = Utc::now();
    let mut engine = StreakEngine::load(&store);

    match action {
        StreakAction::Reconcile => {
            let events = engine.reconcile(now);
            let out = serde_json::json!({
                "record": engine.record(),
                "events": events,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StreakAction::Status => {
            let out = serde_json::json!({
                "record": engine.record(),
                "visitedToday": engine.visited_today(now),
                "atRisk": engine.is_at_risk(now),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
