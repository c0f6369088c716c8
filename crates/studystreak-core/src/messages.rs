//! Personal-message banners and milestone texts.
//!
//! Banners come from configuration and fire on one of three triggers:
//! days remaining until the exam, the current streak length, or an exact
//! calendar date. Each banner has a stable id `"{trigger}_{value}"`;
//! dismissed ids are persisted and filtered out of the active set.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::storage::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    #[serde(alias = "daysUntil")]
    DaysUntil,
    Streak,
    Date,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trigger::DaysUntil => "days_until",
            Trigger::Streak => "streak",
            Trigger::Date => "date",
        };
        f.write_str(s)
    }
}

/// Trigger payload: a count for `days_until`/`streak`, a date string for
/// `date`. Untagged so config authors write the natural literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for TriggerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerValue::Number(n) => write!(f, "{n}"),
            TriggerValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalMessage {
    pub trigger: Trigger,
    pub value: TriggerValue,
    pub message: String,
}

impl PersonalMessage {
    /// Stable dismissal id, `"{trigger}_{value}"`.
    pub fn id(&self) -> String {
        format!("{}_{}", self.trigger, self.value)
    }

    /// Whether this banner fires for the given day.
    pub fn matches(&self, days_until_exam: Option<i64>, streak: u32, today_key: &str) -> bool {
        match (self.trigger, &self.value) {
            (Trigger::DaysUntil, TriggerValue::Number(n)) => days_until_exam == Some(*n),
            (Trigger::Streak, TriggerValue::Number(n)) => i64::from(streak) == *n,
            (Trigger::Date, TriggerValue::Text(date)) => date == today_key,
            _ => false,
        }
    }
}

/// Banners that fire today and have not been dismissed.
pub fn active_messages<'a>(
    messages: &'a [PersonalMessage],
    days_until_exam: Option<i64>,
    streak: u32,
    today_key: &str,
    dismissed: &BTreeSet<String>,
) -> Vec<&'a PersonalMessage> {
    messages
        .iter()
        .filter(|m| m.matches(days_until_exam, streak, today_key))
        .filter(|m| !dismissed.contains(&m.id()))
        .collect()
}

/// Persist a dismissal. Returns `false` when the write is lost.
pub fn dismiss(store: &Store, id: &str) -> bool {
    let mut dismissed = store.dismissed_messages();
    dismissed.insert(id.to_string());
    store.set_dismissed_messages(&dismissed)
}

/// Celebratory text for a milestone streak length.
pub fn milestone_message(streak: u32) -> Option<&'static str> {
    let msg = match streak {
        3 => "3 days in a row. You're building a habit!",
        7 => "A full week of studying. Keep it up!",
        14 => "Two weeks straight. Seriously impressive.",
        30 => "30 days. This is who you are now.",
        50 => "50 days of showing up. Incredible.",
        100 => "100 days. Nothing can stop you.",
        _ => return None,
    };
    Some(msg)
}
