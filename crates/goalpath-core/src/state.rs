//! Application state container.
//!
//! [`AppState`] is the single owner of the current goal, its tasks, the
//! check-in log and the completion history. Every mutation recomputes the
//! derived state synchronously before returning; every query is computed
//! fresh from the collections.
//!
//! Goal creation is two-phase so the task generator call can be awaited
//! without holding the state: [`AppState::begin_goal`] installs the goal and
//! hands back a [`PendingGeneration`], and [`AppState::complete_generation`]
//! applies the generated tasks only if that goal is still current.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ai::{GenerationRequest, TaskGenerator};
use crate::checkin::CheckIn;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{AiError, ValidationError};
use crate::goal::{Goal, GoalDraft};
use crate::progress::{
    self, overall_progress, CompletionHistory, CompletionTracker, DayActivity, ProgressSummary,
};
use crate::task::{fallback_tasks, Task, TaskDescriptor};

/// Upper bound on one task generation round trip.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// A task generation started by [`AppState::begin_goal`].
#[derive(Debug, Clone)]
#[must_use = "pass the generation result to AppState::complete_generation"]
pub struct PendingGeneration {
    goal_id: String,
    date: NaiveDate,
    request: GenerationRequest,
}

impl PendingGeneration {
    pub fn goal_id(&self) -> &str {
        &self.goal_id
    }

    /// Day the generated tasks will be dated with.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

/// Everything the progress screen shows, computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub goal_title: Option<String>,
    pub streak: u32,
    pub tasks_done: usize,
    pub check_ins: usize,
    pub today: ProgressSummary,
    pub milestones: ProgressSummary,
    pub overall: u8,
    pub weekly: Vec<DayActivity>,
}

#[derive(Debug)]
pub struct AppState {
    clock: Box<dyn Clock>,
    generation_timeout: Duration,
    goal: Option<Goal>,
    tasks: Vec<Task>,
    check_ins: Vec<CheckIn>,
    completion: CompletionTracker,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Empty state on the local-time wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::default())
    }

    /// Empty state reading "today" from `clock`.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            goal: None,
            tasks: Vec::new(),
            check_ins: Vec::new(),
            completion: CompletionTracker::new(),
        }
    }

    /// Empty state honoring the configured day boundary and timeout.
    pub fn from_config(config: &Config) -> Self {
        Self::with_clock(SystemClock::new(config.calendar.day_boundary))
            .generation_timeout(config.ai.timeout())
    }

    pub fn generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ── Mutations ──────────────────────────────────────────────

    /// Install a new goal from `draft`, dropping the previous goal and its
    /// tasks, and return the generation to run for it.
    pub fn begin_goal(&mut self, draft: GoalDraft) -> PendingGeneration {
        let today = self.today();
        let goal = Goal::from_draft(&draft, today);

        tracing::info!(
            goal_id = %goal.id,
            title = %goal.title,
            milestones = goal.milestones.len(),
            "goal created"
        );

        let pending = PendingGeneration {
            goal_id: goal.id.clone(),
            date: today,
            request: GenerationRequest {
                goal_title: draft.title,
                goal_description: draft.description,
                milestone_titles: draft.milestone_titles,
            },
        };

        self.goal = Some(goal);
        self.tasks.clear();
        self.recompute();
        pending
    }

    /// Apply a generation result. A failed or empty result is replaced by
    /// the fixed fallback set. Returns false, changing nothing, when the
    /// goal it was started for is no longer current.
    pub fn complete_generation(
        &mut self,
        pending: PendingGeneration,
        result: Result<Vec<TaskDescriptor>, AiError>,
    ) -> bool {
        let is_current = self
            .goal
            .as_ref()
            .is_some_and(|goal| goal.id == pending.goal_id);
        if !is_current {
            tracing::debug!(goal_id = %pending.goal_id, "discarding superseded task generation");
            return false;
        }

        let descriptors = match result {
            Ok(descriptors) if !descriptors.is_empty() => descriptors,
            Ok(_) => {
                tracing::warn!("task generator returned no tasks; using fallback set");
                fallback_tasks(&pending.request.goal_title)
            }
            Err(e) => {
                tracing::warn!(error = %e, "task generation failed; using fallback set");
                fallback_tasks(&pending.request.goal_title)
            }
        };

        self.tasks = Task::from_descriptors(descriptors, pending.date);
        tracing::info!(goal_id = %pending.goal_id, tasks = self.tasks.len(), "tasks generated");
        self.recompute();
        true
    }

    /// Create a goal and generate its tasks in one call. Generator failure
    /// or timeout falls back to the fixed task set.
    pub async fn create_goal<G: TaskGenerator>(&mut self, draft: GoalDraft, generator: &G) {
        let pending = self.begin_goal(draft);

        let result = match tokio::time::timeout(
            self.generation_timeout,
            generator.generate(pending.request()),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(AiError::Timeout(self.generation_timeout)),
        };

        self.complete_generation(pending, result);
    }

    /// Clear the goal and its tasks. Check-ins and history are kept.
    pub fn reset_goal(&mut self) {
        if let Some(goal) = self.goal.take() {
            tracing::info!(goal_id = %goal.id, "goal reset");
        }
        self.tasks.clear();
        self.recompute();
    }

    /// Flip a milestone of the current goal. No-op without a goal or match.
    pub fn toggle_milestone(&mut self, id: &str) -> bool {
        self.goal
            .as_mut()
            .is_some_and(|goal| goal.toggle_milestone(id))
    }

    /// Flip a task's completion and refresh the history. No-op on no match.
    pub fn toggle_task(&mut self, id: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        self.recompute();
        true
    }

    /// Append a check-in. No deduplication by date.
    pub fn add_check_in(&mut self, check_in: CheckIn) {
        self.check_ins.push(check_in);
    }

    /// Validate and append a check-in dated today.
    pub fn check_in(
        &mut self,
        mood: u8,
        progress: u8,
        notes: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let check_in = CheckIn::new(mood, progress, notes, self.today())?;
        self.add_check_in(check_in);
        Ok(())
    }

    /// Re-derive today's completion entry. Mutations call this themselves;
    /// callers only need it after the date rolls over.
    pub fn recompute(&mut self) -> bool {
        let today = self.today();
        self.completion.refresh(&self.tasks, today)
    }

    // ── Queries ────────────────────────────────────────────────

    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn check_ins(&self) -> &[CheckIn] {
        &self.check_ins
    }

    pub fn streak(&self) -> u32 {
        self.completion.streak()
    }

    pub fn completion_history(&self) -> &CompletionHistory {
        self.completion.history()
    }

    pub fn todays_tasks(&self) -> Vec<&Task> {
        progress::tasks_on(&self.tasks, self.today()).collect()
    }

    pub fn todays_progress(&self) -> ProgressSummary {
        progress::day_progress(&self.tasks, self.today())
    }

    pub fn milestone_progress(&self) -> ProgressSummary {
        progress::milestone_progress(self.goal.as_ref())
    }

    /// 60% milestone completion, 40% today's task completion.
    pub fn overall_progress(&self) -> u8 {
        overall_progress(
            self.milestone_progress().percentage,
            self.todays_progress().percentage,
        )
    }

    /// Completed tasks across every date.
    pub fn completed_task_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn weekly_activity(&self) -> Vec<DayActivity> {
        progress::weekly_activity(&self.tasks, self.today())
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let today = self.todays_progress();
        let milestones = self.milestone_progress();
        ProgressSnapshot {
            goal_title: self.goal.as_ref().map(|g| g.title.clone()),
            streak: self.streak(),
            tasks_done: self.completed_task_count(),
            check_ins: self.check_ins.len(),
            today,
            milestones,
            overall: overall_progress(milestones.percentage, today.percentage),
            weekly: self.weekly_activity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::task::TaskCategory;
    use std::rc::Rc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn state_on(d: u32) -> (AppState, Rc<FixedClock>) {
        let clock = Rc::new(FixedClock::new(day(d)));
        (AppState::with_clock(Rc::clone(&clock)), clock)
    }

    fn generated(n: usize) -> Result<Vec<TaskDescriptor>, AiError> {
        Ok((0..n)
            .map(|i| TaskDescriptor::new(format!("task {i}"), TaskCategory::Practice, "20 min"))
            .collect())
    }

    fn with_goal(state: &mut AppState, draft: GoalDraft) {
        let pending = state.begin_goal(draft);
        assert!(state.complete_generation(pending, generated(4)));
    }

    #[test]
    fn begin_goal_replaces_goal_and_tasks() {
        let (mut state, _) = state_on(19);
        with_goal(&mut state, GoalDraft::new("First"));
        let first_id = state.goal().unwrap().id.clone();

        let pending = state.begin_goal(GoalDraft::new("Second"));
        assert!(state.tasks().is_empty());
        assert_ne!(state.goal().unwrap().id, first_id);
        assert_eq!(pending.request().goal_title, "Second");
        assert_eq!(pending.date(), day(19));
    }

    #[test]
    fn generated_tasks_are_stamped_today_with_sequential_ids() {
        let (mut state, _) = state_on(19);
        with_goal(&mut state, GoalDraft::new("Piano"));

        let ids: Vec<&str> = state.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
        assert!(state.tasks().iter().all(|t| t.date == day(19) && !t.completed));
    }

    #[test]
    fn failed_generation_uses_fallback() {
        let (mut state, _) = state_on(19);
        let pending = state.begin_goal(GoalDraft::new("Learn Piano"));
        assert!(state.complete_generation(pending, Err(AiError::NotConfigured)));

        assert_eq!(state.tasks().len(), 5);
        assert_eq!(state.tasks()[0].title, "Research Learn Piano basics");
    }

    #[test]
    fn empty_generation_uses_fallback() {
        let (mut state, _) = state_on(19);
        let pending = state.begin_goal(GoalDraft::new("Chess"));
        state.complete_generation(pending, Ok(Vec::new()));
        assert_eq!(state.tasks().len(), 5);
    }

    #[test]
    fn superseded_generation_is_discarded() {
        let (mut state, _) = state_on(19);
        let stale = state.begin_goal(GoalDraft::new("Old"));
        let fresh = state.begin_goal(GoalDraft::new("New"));

        assert!(!state.complete_generation(stale, generated(3)));
        assert!(state.tasks().is_empty());

        assert!(state.complete_generation(fresh, generated(2)));
        assert_eq!(state.tasks().len(), 2);
        assert_eq!(state.goal().unwrap().title, "New");
    }

    #[test]
    fn generation_after_reset_is_discarded() {
        let (mut state, _) = state_on(19);
        let pending = state.begin_goal(GoalDraft::new("Old"));
        state.reset_goal();

        assert!(!state.complete_generation(pending, generated(3)));
        assert!(state.goal().is_none());
        assert!(state.tasks().is_empty());
    }

    #[test]
    fn reset_keeps_check_ins_and_streak() {
        let (mut state, _) = state_on(19);
        with_goal(&mut state, GoalDraft::new("Run"));
        state.toggle_task("1");
        state.check_in(4, 3, "felt fine").unwrap();
        assert_eq!(state.streak(), 1);

        state.reset_goal();
        assert!(state.goal().is_none());
        assert!(state.tasks().is_empty());
        assert_eq!(state.check_ins().len(), 1);
        // Today's entry flips back to false; nothing earlier keeps the streak alive.
        assert_eq!(state.completion_history().get(day(19)), Some(false));
        assert_eq!(state.streak(), 0);
    }

    #[test]
    fn toggle_milestone_is_noop_without_goal() {
        let (mut state, _) = state_on(19);
        assert!(!state.toggle_milestone("1"));
    }

    #[test]
    fn toggle_task_twice_restores_everything() {
        let (mut state, _) = state_on(19);
        with_goal(&mut state, GoalDraft::new("Run"));
        let tasks_before = state.tasks().to_vec();
        let history_before = state.completion_history().clone();
        let streak_before = state.streak();

        assert!(state.toggle_task("2"));
        assert!(state.toggle_task("2"));

        assert_eq!(state.tasks(), tasks_before.as_slice());
        assert_eq!(state.completion_history(), &history_before);
        assert_eq!(state.streak(), streak_before);
    }

    #[test]
    fn toggle_unknown_task_is_noop() {
        let (mut state, _) = state_on(19);
        with_goal(&mut state, GoalDraft::new("Run"));
        assert!(!state.toggle_task("42"));
        assert_eq!(state.completed_task_count(), 0);
    }

    #[test]
    fn streak_carries_across_days() {
        let (mut state, clock) = state_on(17);
        with_goal(&mut state, GoalDraft::new("Day one"));
        state.toggle_task("1");
        assert_eq!(state.streak(), 1);

        clock.set(day(18));
        with_goal(&mut state, GoalDraft::new("Day two"));
        assert_eq!(state.streak(), 1, "an idle today does not reset the streak");
        state.toggle_task("1");
        assert_eq!(state.streak(), 2);

        clock.set(day(20));
        state.recompute();
        assert_eq!(state.streak(), 0, "a missed day breaks the streak");
    }

    #[test]
    fn check_in_rejects_out_of_range() {
        let (mut state, _) = state_on(19);
        assert!(state.check_in(0, 3, "").is_err());
        assert!(state.check_ins().is_empty());
    }

    #[test]
    fn check_ins_are_not_deduplicated() {
        let (mut state, _) = state_on(19);
        state.check_in(3, 3, "a").unwrap();
        state.check_in(3, 3, "a").unwrap();
        assert_eq!(state.check_ins().len(), 2);
    }

    #[test]
    fn progress_queries_follow_weighting() {
        let (mut state, _) = state_on(19);
        with_goal(
            &mut state,
            GoalDraft::new("Guitar").milestones(["Chords", "Strumming", "Song"]),
        );
        state.toggle_milestone("1");
        state.toggle_task("1");

        assert_eq!(state.todays_progress(), ProgressSummary::new(1, 4));
        assert_eq!(state.milestone_progress().percentage, 33);
        assert_eq!(state.todays_progress().percentage, 25);
        // round(33 * 0.6 + 25 * 0.4) = round(29.8)
        assert_eq!(state.overall_progress(), 30);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.overall, 30);
        assert_eq!(snapshot.tasks_done, 1);
        assert_eq!(snapshot.goal_title.as_deref(), Some("Guitar"));
        assert_eq!(snapshot.weekly.len(), 7);
    }

    #[test]
    fn todays_tasks_exclude_other_days() {
        let (mut state, clock) = state_on(19);
        with_goal(&mut state, GoalDraft::new("Run"));
        clock.set(day(20));
        assert!(state.todays_tasks().is_empty());
        assert_eq!(state.todays_progress(), ProgressSummary::default());
        assert_eq!(state.weekly_activity()[5].total, 4);
    }

    struct SlowGenerator;

    impl TaskGenerator for SlowGenerator {
        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<Vec<TaskDescriptor>, AiError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            generated(1)
        }
    }

    #[tokio::test]
    async fn create_goal_times_out_to_fallback() {
        let (state, _) = state_on(19);
        let mut state = state.generation_timeout(Duration::from_millis(20));

        state.create_goal(GoalDraft::new("Knitting"), &SlowGenerator).await;

        assert_eq!(state.tasks().len(), 5);
        assert_eq!(state.tasks()[4].title, "Find resources about Knitting");
    }
}
