use chrono::Utc;
use studystreak_core::content::days_until_exam;
use studystreak_core::Config;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let out = match config.exam.lsat_date {
        Some(exam) => serde_json::json!({
            "examDate": exam,
            "daysRemaining": days_until_exam(exam, Utc::now()),
            "targetScore": config.exam.target_score,
        }),
        None => serde_json::json!({
            "examDate": null,
            "hint": "set one with: studystreak config set-exam --date <rfc3339>",
        }),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
