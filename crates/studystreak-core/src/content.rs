//! Exam countdown and rotating daily content.
//!
//! Quote and question selection is deterministic by calendar day: the same
//! item shows all day and rotates at midnight, with no stored cursor.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::dates::MS_PER_DAY;
use crate::storage::Store;

/// A practice question from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyQuestion {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// Calendar days from `now` until the exam; negative once it has passed.
pub fn days_until_exam(exam: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (exam.date_naive() - now.date_naive()).num_days()
}

fn day_number(now: DateTime<Utc>) -> i64 {
    now.timestamp_millis().div_euclid(MS_PER_DAY)
}

/// Today's quote, rotating through the list one per day.
pub fn quote_of_day(quotes: &[String], now: DateTime<Utc>) -> Option<&str> {
    if quotes.is_empty() {
        return None;
    }
    let idx = day_number(now).rem_euclid(quotes.len() as i64) as usize;
    Some(&quotes[idx])
}

/// Today's question, rotating through the list one per day.
pub fn question_of_day(questions: &[DailyQuestion], now: DateTime<Utc>) -> Option<&DailyQuestion> {
    if questions.is_empty() {
        return None;
    }
    let idx = day_number(now).rem_euclid(questions.len() as i64) as usize;
    Some(&questions[idx])
}

pub fn is_answered(answered: &HashMap<String, String>, question_id: &str) -> bool {
    answered.contains_key(question_id)
}

/// Record the answer timestamp. Returns `false` when the write is lost.
pub fn mark_answered(store: &Store, question_id: &str, now: DateTime<Utc>) -> bool {
    let mut answered = store.answered_questions();
    answered.insert(question_id.to_string(), now.to_rfc3339());
    store.set_answered_questions(&answered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, d, h, 0, 0).unwrap()
    }

    #[test]
    fn countdown_in_calendar_days() {
        let exam = Utc.with_ymd_and_hms(2026, 6, 8, 8, 30, 0).unwrap();
        assert_eq!(days_until_exam(exam, at(8, 23)), 61);
        assert_eq!(days_until_exam(exam, Utc.with_ymd_and_hms(2026, 6, 8, 20, 0, 0).unwrap()), 0);
        assert_eq!(days_until_exam(exam, Utc.with_ymd_and_hms(2026, 6, 9, 1, 0, 0).unwrap()), -1);
    }

    #[test]
    fn quote_is_stable_within_a_day_and_rotates() {
        let quotes: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        let morning = quote_of_day(&quotes, at(1, 8)).unwrap();
        let night = quote_of_day(&quotes, at(1, 23)).unwrap();
        assert_eq!(morning, night);

        let tomorrow = quote_of_day(&quotes, at(2, 8)).unwrap();
        assert_ne!(morning, tomorrow);
    }

    #[test]
    fn empty_content_yields_none() {
        assert!(quote_of_day(&[], at(1, 8)).is_none());
        assert!(question_of_day(&[], at(1, 8)).is_none());
    }

    #[test]
    fn answered_bookkeeping_roundtrip() {
        let store = Store::open_memory();
        assert!(!is_answered(&store.answered_questions(), "q1"));

        assert!(mark_answered(&store, "q1", at(1, 8)));
        let answered = store.answered_questions();
        assert!(is_answered(&answered, "q1"));
        // Stored value is the ISO timestamp of the answer.
        assert!(answered["q1"].starts_with("2026-04-01T08:00:00"));
    }
}
