//! Per-day completion history and the consecutive-day streak derived from it.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::task::Task;

/// How far back the streak walk looks.
pub const STREAK_LOOKBACK_DAYS: u64 = 365;

/// Calendar day -> whether any task dated that day was completed.
///
/// Only today's entry is ever rewritten; earlier days stay as last written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionHistory(BTreeMap<NaiveDate, bool>);

impl CompletionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, day: NaiveDate) -> Option<bool> {
        self.0.get(&day).copied()
    }

    /// True when `day` is recorded as having a completed task.
    pub fn completed_on(&self, day: NaiveDate) -> bool {
        self.get(day).unwrap_or(false)
    }

    /// Write `value` for `day`. Returns true when the stored value changed
    /// or the entry did not exist yet.
    pub fn record(&mut self, day: NaiveDate, value: bool) -> bool {
        if self.get(day) == Some(value) {
            return false;
        }
        self.0.insert(day, value);
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, bool)> + '_ {
        self.0.iter().map(|(d, v)| (*d, *v))
    }
}

impl FromIterator<(NaiveDate, bool)> for CompletionHistory {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Count consecutive completed days ending at or before `today`.
///
/// Today counts when completed but never breaks the streak when it is not:
/// the day may still be in progress. Any earlier gap ends the walk.
pub fn calculate_streak(history: &CompletionHistory, today: NaiveDate) -> u32 {
    let mut streak = 0;

    for offset in 0..STREAK_LOOKBACK_DAYS {
        let Some(day) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };

        if history.completed_on(day) {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }

    streak
}

/// Owns the history and the streak, refreshed after task changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionTracker {
    history: CompletionHistory,
    streak: u32,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &CompletionHistory {
        &self.history
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Re-derive today's entry from `tasks`; the streak is recomputed only
    /// when that entry changes. Returns whether it changed.
    pub fn refresh(&mut self, tasks: &[Task], today: NaiveDate) -> bool {
        let has_completed_today = tasks.iter().any(|t| t.date == today && t.completed);

        if !self.history.record(today, has_completed_today) {
            tracing::debug!(%today, has_completed_today, "completion history unchanged");
            return false;
        }

        self.streak = calculate_streak(&self.history, today);
        tracing::debug!(%today, has_completed_today, streak = self.streak, "completion history updated");
        true
    }
}
