use chrono::Utc;
use clap::Subcommand;
use studystreak_core::content::{is_answered, mark_answered, question_of_day};
use studystreak_core::Config;

#[derive(Subcommand)]
pub enum QuestionAction {
    /// Print today's question
    Today,
    /// Mark today's question as answered
    Answer,
}

pub fn run(action: QuestionAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = super::open_store();
    let now = Utc::now();

    let Some(question) = question_of_day(&config.daily_questions, now) else {
        println!("No questions configured. Add some under daily_questions in config.toml.");
        return Ok(());
    };

    match action {
        QuestionAction::Today => {
            let out = serde_json::json!({
                "question": question,
                "answered": is_answered(&store.answered_questions(), &question.id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        QuestionAction::Answer => {
            mark_answered(&store, &question.id, now);
            let out = serde_json::json!({
                "id": question.id,
                "answer": question.answer,
                "explanation": question.explanation,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
