//! Progress & streak engine.
//!
//! Pure derived-value computations over the task and milestone collections:
//! completion percentages, the weighted overall progress, the per-day
//! completion history with its streak, and the seven-day activity report.

mod streak;
mod weekly;

pub use streak::{calculate_streak, CompletionHistory, CompletionTracker, STREAK_LOOKBACK_DAYS};
pub use weekly::{weekly_activity, DayActivity, WEEKLY_WINDOW_DAYS};

use serde::{Deserialize, Serialize};

use crate::goal::Goal;
use crate::task::Task;
use chrono::NaiveDate;

/// Weight of milestone completion in the overall progress figure.
pub const MILESTONE_WEIGHT: f64 = 0.6;
/// Weight of today's task completion in the overall progress figure.
pub const TODAYS_TASKS_WEIGHT: f64 = 0.4;

/// Completed/total counts with a rounded percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

impl ProgressSummary {
    pub fn new(completed: usize, total: usize) -> Self {
        Self {
            completed,
            total,
            percentage: percentage(completed, total),
        }
    }

    /// Summarise a sequence of completion flags.
    pub fn from_flags<I: IntoIterator<Item = bool>>(flags: I) -> Self {
        let (completed, total) = flags
            .into_iter()
            .fold((0, 0), |(done, all), flag| (done + usize::from(flag), all + 1));
        Self::new(completed, total)
    }
}

/// `round(100 * completed / total)`, or 0 when there is nothing to count.
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = completed as f64 / total as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Fixed 60/40 blend of milestone and today's task completion.
pub fn overall_progress(milestone_percentage: u8, todays_percentage: u8) -> u8 {
    let blended = f64::from(milestone_percentage) * MILESTONE_WEIGHT
        + f64::from(todays_percentage) * TODAYS_TASKS_WEIGHT;
    blended.round().clamp(0.0, 100.0) as u8
}

/// Tasks dated `day`, in collection order.
pub fn tasks_on(tasks: &[Task], day: NaiveDate) -> impl Iterator<Item = &Task> {
    tasks.iter().filter(move |t| t.date == day)
}

/// Progress over the tasks dated `day`.
pub fn day_progress(tasks: &[Task], day: NaiveDate) -> ProgressSummary {
    ProgressSummary::from_flags(tasks_on(tasks, day).map(|t| t.completed))
}

/// Progress over the goal's milestones; all zeros without a goal.
pub fn milestone_progress(goal: Option<&Goal>) -> ProgressSummary {
    match goal {
        Some(goal) => ProgressSummary::from_flags(goal.milestones.iter().map(|m| m.completed)),
        None => ProgressSummary::default(),
    }
}
