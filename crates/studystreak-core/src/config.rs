//! TOML-based application configuration.
//!
//! Stores the exam target, timer durations, and the motivational content
//! lists (quotes, personal messages, daily questions).
//!
//! Configuration is stored at `~/.config/studystreak/config.toml`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::content::DailyQuestion;
use crate::error::{ConfigError, ValidationError};
use crate::messages::PersonalMessage;
use crate::storage::data_dir;
use crate::timer::DurationConfig;

/// Exam countdown target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamConfig {
    /// Exam date-time; countdown widgets stay hidden while unset.
    #[serde(default)]
    pub lsat_date: Option<DateTime<Utc>>,
    /// Goal score, 120-180.
    #[serde(default)]
    pub target_score: Option<u32>,
}

/// Timer durations in user-facing minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,
}

fn default_work_minutes() -> u64 {
    25
}
fn default_break_minutes() -> u64 {
    5
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studystreak/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub exam: ExamConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub motivational_quotes: Vec<String>,
    #[serde(default)]
    pub personal_messages: Vec<PersonalMessage>,
    #[serde(default)]
    pub daily_questions: Vec<DailyQuestion>,
}

impl Config {
    fn path() -> Result<PathBuf, std::io::Error> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/studystreak"),
            message: e.to_string(),
        })?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("~/.config/studystreak"),
            message: e.to_string(),
        })?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Validate user-editable fields.
    ///
    /// # Errors
    /// Returns the first violated constraint: score outside 120-180 or a
    /// non-positive timer duration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(score) = self.exam.target_score {
            if !(120..=180).contains(&score) {
                return Err(ValidationError::InvalidValue {
                    field: "exam.target_score".into(),
                    message: format!("{score} is outside the valid range 120-180"),
                });
            }
        }
        self.durations().map(|_| ())
    }

    /// Timer durations in seconds, validated.
    ///
    /// # Errors
    /// Returns a validation error when either duration is zero.
    pub fn durations(&self) -> Result<DurationConfig, ValidationError> {
        DurationConfig::from_minutes(self.timer.work_minutes, self.timer.break_minutes)
    }
}
