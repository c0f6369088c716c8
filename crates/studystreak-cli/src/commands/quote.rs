use chrono::Utc;
use studystreak_core::content::quote_of_day;
use studystreak_core::Config;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    match quote_of_day(&config.motivational_quotes, Utc::now()) {
        Some(quote) => println!("{quote}"),
        None => println!("No quotes configured. Add some under motivational_quotes in config.toml."),
    }
    Ok(())
}
