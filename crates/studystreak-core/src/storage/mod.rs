pub mod dates;
mod store;

pub use store::{keys, Store, APP_VERSION};

use std::path::PathBuf;

/// Returns `~/.config/studystreak[-dev]/` based on STUDYSTREAK_ENV.
///
/// Set STUDYSTREAK_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYSTREAK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studystreak-dev")
    } else {
        base_dir.join("studystreak")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
