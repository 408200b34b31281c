//! Goal and milestone records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named checkpoint within a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Sequence number within the goal, starting at "1"
    pub id: String,
    pub title: String,
    pub completed: bool,
    /// Target date text inherited from the goal
    pub date: String,
}

/// The single active objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub target_date: String,
    pub milestones: Vec<Milestone>,
    pub created_at: NaiveDate,
}

/// User input for creating a goal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub target_date: String,
    pub milestone_titles: Vec<String>,
    pub milestones_enabled: bool,
}

impl GoalDraft {
    /// A draft with only a title; no milestones, no description.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn target_date(mut self, target_date: impl Into<String>) -> Self {
        self.target_date = target_date.into();
        self
    }

    /// Sets the milestone titles and turns milestones on.
    pub fn milestones<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.milestone_titles = titles.into_iter().map(Into::into).collect();
        self.milestones_enabled = true;
        self
    }

    pub fn milestones_enabled(mut self, enabled: bool) -> Self {
        self.milestones_enabled = enabled;
        self
    }
}

/// Builds the milestone list for a new goal.
///
/// Disabled milestones yield an empty list whatever titles were given.
/// Otherwise titles are trimmed, blanks dropped and the rest numbered from 1.
pub fn build_milestones(titles: &[String], enabled: bool, target_date: &str) -> Vec<Milestone> {
    if !enabled {
        return Vec::new();
    }

    titles
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .enumerate()
        .map(|(index, title)| Milestone {
            id: (index + 1).to_string(),
            title: title.to_string(),
            completed: false,
            date: target_date.to_string(),
        })
        .collect()
}

impl Goal {
    /// Create a goal from a draft with a fresh id.
    pub fn from_draft(draft: &GoalDraft, created_at: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            target_date: draft.target_date.clone(),
            milestones: build_milestones(
                &draft.milestone_titles,
                draft.milestones_enabled,
                &draft.target_date,
            ),
            created_at,
        }
    }

    /// Flip a milestone. Returns false when no milestone has that id.
    pub fn toggle_milestone(&mut self, id: &str) -> bool {
        match self.milestones.iter_mut().find(|m| m.id == id) {
            Some(milestone) => {
                milestone.completed = !milestone.completed;
                true
            }
            None => false,
        }
    }
}
