//! Daily task records and the fixed fallback task set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AiError;

/// Durations the generator is asked to choose from.
pub const SUGGESTED_DURATIONS: [&str; 5] = ["15 min", "20 min", "30 min", "45 min", "1 hour"];

/// Kind of work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Learning,
    Practice,
    Review,
    Project,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 4] = [
        TaskCategory::Learning,
        TaskCategory::Practice,
        TaskCategory::Review,
        TaskCategory::Project,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Learning => "learning",
            TaskCategory::Practice => "practice",
            TaskCategory::Review => "review",
            TaskCategory::Project => "project",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "learning" => Ok(TaskCategory::Learning),
            "practice" => Ok(TaskCategory::Practice),
            "review" => Ok(TaskCategory::Review),
            "project" => Ok(TaskCategory::Project),
            _ => Err(AiError::UnknownCategory(s.to_string())),
        }
    }
}

/// What a task generator produces: a task without identity or date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub title: String,
    pub category: TaskCategory,
    pub duration: String,
}

impl TaskDescriptor {
    pub fn new(title: impl Into<String>, category: TaskCategory, duration: &str) -> Self {
        Self {
            title: title.into(),
            category,
            duration: duration.to_string(),
        }
    }
}

/// A day-scoped actionable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub category: TaskCategory,
    pub duration: String,
    /// Calendar day the task belongs to; never changes after creation
    pub date: NaiveDate,
}

impl Task {
    /// Stamp descriptors with `date` and sequential ids starting at "1".
    pub fn from_descriptors(descriptors: Vec<TaskDescriptor>, date: NaiveDate) -> Vec<Task> {
        descriptors
            .into_iter()
            .enumerate()
            .map(|(index, d)| Task {
                id: (index + 1).to_string(),
                title: d.title,
                completed: false,
                category: d.category,
                duration: d.duration,
                date,
            })
            .collect()
    }
}

/// The task set used whenever generation fails.
pub fn fallback_tasks(goal_title: &str) -> Vec<TaskDescriptor> {
    use TaskCategory::*;

    vec![
        TaskDescriptor::new(format!("Research {goal_title} basics"), Learning, "30 min"),
        TaskDescriptor::new(format!("Practice {goal_title} fundamentals"), Practice, "45 min"),
        TaskDescriptor::new(format!("Review {goal_title} concepts"), Review, "20 min"),
        TaskDescriptor::new(format!("Apply {goal_title} in a project"), Project, "30 min"),
        TaskDescriptor::new(format!("Find resources about {goal_title}"), Learning, "15 min"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Practice".parse::<TaskCategory>().unwrap(), TaskCategory::Practice);
        assert_eq!(" review ".parse::<TaskCategory>().unwrap(), TaskCategory::Review);
        assert!(matches!(
            "homework".parse::<TaskCategory>(),
            Err(AiError::UnknownCategory(_))
        ));
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&TaskCategory::Project).unwrap();
        assert_eq!(json, "\"project\"");
    }

    #[test]
    fn fallback_set_matches_fixed_layout() {
        let tasks = fallback_tasks("Learn Piano");
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Research Learn Piano basics",
                "Practice Learn Piano fundamentals",
                "Review Learn Piano concepts",
                "Apply Learn Piano in a project",
                "Find resources about Learn Piano",
            ]
        );
        let durations: Vec<&str> = tasks.iter().map(|t| t.duration.as_str()).collect();
        assert_eq!(durations, ["30 min", "45 min", "20 min", "30 min", "15 min"]);
        let categories: Vec<&str> = tasks.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(categories, ["learning", "practice", "review", "project", "learning"]);
    }

    #[test]
    fn descriptors_are_stamped_with_date_and_ids() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        let tasks = Task::from_descriptors(fallback_tasks("Go"), date);

        assert_eq!(tasks.len(), 5);
        for (i, task) in tasks.iter().enumerate() {
            assert_eq!(task.id, (i + 1).to_string());
            assert_eq!(task.date, date);
            assert!(!task.completed);
        }
    }

    #[test]
    fn task_date_serializes_as_iso_day() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 9).unwrap();
        let task = &Task::from_descriptors(fallback_tasks("Chess"), date)[0];
        let json = serde_json::to_value(task).unwrap();
        assert_eq!(json["date"], "2026-07-09");
        assert_eq!(json["category"], "learning");
    }
}
