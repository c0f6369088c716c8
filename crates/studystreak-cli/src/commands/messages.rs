use chrono::Utc;
use clap::Subcommand;
use studystreak_core::content::days_until_exam;
use studystreak_core::messages::active_messages;
use studystreak_core::storage::dates::day_key;
use studystreak_core::{messages, Config, StreakEngine};

#[derive(Subcommand)]
pub enum MessagesAction {
    /// Banners that fire today and have not been dismissed
    List,
    /// Dismiss a banner by id (e.g. days_until_30)
    Dismiss { id: String },
}

pub fn run(action: MessagesAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store();

    match action {
        MessagesAction::List => {
            let config = Config::load_or_default();
            let now = Utc::now();
            let days = config.exam.lsat_date.map(|exam| days_until_exam(exam, now));
            let streak = StreakEngine::load(&store).current_streak();

            let active = active_messages(
                &config.personal_messages,
                days,
                streak,
                &day_key(now),
                &store.dismissed_messages(),
            );
            let out: Vec<_> = active
                .iter()
                .map(|m| serde_json::json!({ "id": m.id(), "message": m.message }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        MessagesAction::Dismiss { id } => {
            messages::dismiss(&store, &id);
            println!("{}", serde_json::json!({ "dismissed": id }));
        }
    }
    Ok(())
}
