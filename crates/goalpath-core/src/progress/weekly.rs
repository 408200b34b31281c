//! Seven-day activity report.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::percentage;
use crate::task::Task;

pub const WEEKLY_WINDOW_DAYS: u64 = 7;

/// Task activity for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    /// Short weekday name ("Sun".."Sat")
    pub day_name: String,
    pub total: usize,
    pub completed: usize,
    /// `None` when the day has no tasks at all
    pub percentage: Option<u8>,
    pub is_today: bool,
}

impl DayActivity {
    pub fn has_data(&self) -> bool {
        self.percentage.is_some()
    }

    /// Bar label: the percentage, or "-" for a day without tasks.
    pub fn label(&self) -> String {
        match self.percentage {
            Some(p) => format!("{p}%"),
            None => "-".to_string(),
        }
    }
}

fn short_day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

/// Activity for the last seven days, oldest first, ending with `today`.
pub fn weekly_activity(tasks: &[Task], today: NaiveDate) -> Vec<DayActivity> {
    (0..WEEKLY_WINDOW_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| {
            let (completed, total) = tasks
                .iter()
                .filter(|t| t.date == date)
                .fold((0, 0), |(done, all), t| (done + usize::from(t.completed), all + 1));

            DayActivity {
                date,
                day_name: short_day_name(date.weekday()).to_string(),
                total,
                completed,
                percentage: (total > 0).then(|| percentage(completed, total)),
                is_today: date == today,
            }
        })
        .collect()
}
