//! # GoalPath Core Library
//!
//! Core logic for GoalPath, a personal learning-goal tracker. The CLI binary
//! is a thin shell over this crate; everything it shows is computed here.
//!
//! ## Architecture
//!
//! - **State**: a single container owning the goal, its daily tasks, the
//!   check-in log and the per-day completion history. Every mutation
//!   recomputes derived state before returning.
//! - **Progress**: pure functions for percentages, the 60/40 overall blend,
//!   the consecutive-day streak and the 7-day activity report
//! - **AI**: task generation and mentor chat against an OpenAI-compatible
//!   endpoint, each with an offline fallback so no failure reaches the user
//! - **Config**: TOML configuration with environment overrides
//!
//! ## Key Components
//!
//! - [`AppState`]: the state container
//! - [`TaskGenerator`] / [`MentorChat`]: the two AI seams
//! - [`Clock`]: source of "today"
//! - [`Config`]: application configuration management

pub mod ai;
pub mod checkin;
pub mod clock;
pub mod config;
pub mod error;
pub mod goal;
pub mod progress;
pub mod quiz;
pub mod state;
pub mod task;

pub use ai::{
    ConfiguredMentor, ConfiguredTaskGenerator, GenerationRequest, Mentor, MentorChat,
    MentorConversation, TaskGenerator,
};
pub use checkin::CheckIn;
pub use clock::{Clock, DayBoundary, FixedClock, SystemClock};
pub use config::{AiConfig, CalendarConfig, Config};
pub use error::{AiError, ConfigError, CoreError, ValidationError};
pub use goal::{Goal, GoalDraft, Milestone};
pub use progress::{CompletionHistory, DayActivity, ProgressSummary};
pub use quiz::{Question, QuestionBank, QuizSession};
pub use state::{AppState, PendingGeneration, ProgressSnapshot};
pub use task::{Task, TaskCategory, TaskDescriptor};
