//! Daily mood/progress check-ins.
//!
//! Check-ins are an append-only log owned by the state container. Each
//! entry rates mood and progress on a 1 to 5 scale with free-form notes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

const MOOD_LABELS: [&str; 5] = ["Struggling", "Okay", "Good", "Great", "Amazing"];
const PROGRESS_LABELS: [&str; 5] = ["Minimal", "Some", "Moderate", "Good", "Excellent"];

/// One check-in entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    /// How the user feels, 1 (struggling) to 5 (amazing)
    pub mood: u8,
    /// Self-rated progress, 1 (minimal) to 5 (excellent)
    pub progress: u8,
    pub notes: String,
    pub date: NaiveDate,
}

impl CheckIn {
    /// Build a check-in, rejecting levels outside 1..=5.
    pub fn new(
        mood: u8,
        progress: u8,
        notes: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        check_level("mood", mood)?;
        check_level("progress", progress)?;
        Ok(Self {
            mood,
            progress,
            notes: notes.into(),
            date,
        })
    }

    pub fn mood_label(&self) -> &'static str {
        mood_label(self.mood).unwrap_or("Unknown")
    }

    pub fn progress_label(&self) -> &'static str {
        progress_label(self.progress).unwrap_or("Unknown")
    }
}

fn check_level(field: &str, value: u8) -> Result<(), ValidationError> {
    if (MIN_LEVEL..=MAX_LEVEL).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: i64::from(value),
            min: i64::from(MIN_LEVEL),
            max: i64::from(MAX_LEVEL),
        })
    }
}

/// Display label for a mood level.
pub fn mood_label(level: u8) -> Option<&'static str> {
    label_for(&MOOD_LABELS, level)
}

/// Display label for a progress level.
pub fn progress_label(level: u8) -> Option<&'static str> {
    label_for(&PROGRESS_LABELS, level)
}

fn label_for(labels: &[&'static str; 5], level: u8) -> Option<&'static str> {
    level
        .checked_sub(MIN_LEVEL)
        .and_then(|i| labels.get(usize::from(i)))
        .copied()
}
