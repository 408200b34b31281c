//! Task generation collaborators.

use indoc::formatdoc;
use serde::{Deserialize, Serialize};

use super::client::{ChatMessage, CompletionClient, Sampling};
use crate::config::AiConfig;
use crate::error::AiError;
use crate::task::{TaskCategory, TaskDescriptor, SUGGESTED_DURATIONS};

/// Inputs a generator sees for a new goal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub goal_title: String,
    pub goal_description: String,
    pub milestone_titles: Vec<String>,
}

/// Produces the initial task set for a goal.
#[allow(async_fn_in_trait)]
pub trait TaskGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<TaskDescriptor>, AiError>;
}

const TASK_SYSTEM_PROMPT: &str = "You are a helpful learning coach assistant. Generate daily tasks for learning goals. \nAlways respond with ONLY a valid JSON array, no other text or markdown.";

/// Asks the chat-completion service for five tasks as a JSON array.
#[derive(Debug, Clone)]
pub struct AiTaskGenerator {
    client: CompletionClient,
    sampling: Sampling,
}

impl AiTaskGenerator {
    pub fn new(client: CompletionClient, sampling: Sampling) -> Self {
        Self { client, sampling }
    }

    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        Ok(Self::new(
            CompletionClient::from_config(config)?,
            Sampling {
                temperature: config.task_temperature,
                max_tokens: config.task_max_tokens,
            },
        ))
    }
}

/// The user prompt describing the goal and the required reply format.
pub fn task_prompt(request: &GenerationRequest) -> String {
    let description = if request.goal_description.is_empty() {
        String::new()
    } else {
        format!("Description: {}", request.goal_description)
    };
    let milestones = if request.milestone_titles.is_empty() {
        String::new()
    } else {
        format!("Milestones: {}", request.milestone_titles.join(", "))
    };

    formatdoc! {r#"
        Generate 5 daily learning tasks for someone working on this goal:

        Goal: "{title}"
        {description}
        {milestones}

        Return ONLY a JSON array with exactly this format (no markdown, no explanation):
        [
          {{"title": "Specific task description", "category": "learning", "duration": "30 min"}},
          {{"title": "Another specific task", "category": "practice", "duration": "45 min"}},
          {{"title": "Third task", "category": "review", "duration": "20 min"}},
          {{"title": "Fourth task", "category": "project", "duration": "1 hour"}},
          {{"title": "Fifth task", "category": "learning", "duration": "15 min"}}
        ]

        Categories: learning, practice, review, project
        Durations: {durations}

        Make tasks specific and actionable for the goal."#,
        title = request.goal_title,
        description = description,
        milestones = milestones,
        durations = SUGGESTED_DURATIONS.join(", "),
    }
}

#[derive(Deserialize)]
struct RawTask {
    title: String,
    category: String,
    duration: String,
}

/// Parse a completion into task descriptors.
///
/// The content may wrap the array in prose or markdown fences; everything
/// from the first `[` to the last `]` is parsed.
pub fn parse_task_list(content: &str) -> Result<Vec<TaskDescriptor>, AiError> {
    let json = match (content.find('['), content.rfind(']')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => content,
    };

    let raw: Vec<RawTask> = serde_json::from_str(json)?;
    if raw.is_empty() {
        return Err(AiError::EmptyTaskList);
    }

    raw.into_iter()
        .map(|t| {
            Ok::<_, AiError>(TaskDescriptor {
                title: t.title,
                category: t.category.parse()?,
                duration: t.duration,
            })
        })
        .collect()
}

impl TaskGenerator for AiTaskGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<TaskDescriptor>, AiError> {
        let messages = [
            ChatMessage::system(TASK_SYSTEM_PROMPT),
            ChatMessage::user(task_prompt(request)),
        ];
        let content = self
            .client
            .complete(&messages, self.sampling)
            .await?
            .unwrap_or_else(|| "[]".to_string());
        parse_task_list(&content)
    }
}

struct TemplateFamily {
    keywords: &'static [&'static str],
    tasks: [(&'static str, TaskCategory, &'static str); 5],
}

use TaskCategory::{Learning, Practice, Project, Review};

const TEMPLATE_FAMILIES: &[TemplateFamily] = &[
    TemplateFamily {
        keywords: &[
            "react", "javascript", "programming", "coding", "python", "web", "app", "software",
            "developer",
        ],
        tasks: [
            ("Study {goal} documentation and core concepts", Learning, "30 min"),
            ("Complete a hands-on coding exercise", Practice, "45 min"),
            ("Build a small feature or component", Project, "1 hour"),
            ("Review and debug yesterday's code", Review, "20 min"),
            ("Watch a tutorial on advanced techniques", Learning, "30 min"),
        ],
    },
    TemplateFamily {
        keywords: &["language", "spanish", "french", "english", "chinese", "german"],
        tasks: [
            ("Learn 15 new vocabulary words", Learning, "20 min"),
            ("Practice speaking/pronunciation", Practice, "15 min"),
            ("Listen to native content (podcast/video)", Learning, "30 min"),
            ("Write a short paragraph or dialogue", Practice, "25 min"),
            ("Review flashcards and past vocabulary", Review, "15 min"),
        ],
    },
    TemplateFamily {
        keywords: &["fitness", "workout", "exercise", "gym", "health", "weight"],
        tasks: [
            ("Complete warm-up routine", Practice, "10 min"),
            ("Main workout session", Practice, "45 min"),
            ("Learn a new exercise technique", Learning, "15 min"),
            ("Log nutrition and hydration", Review, "10 min"),
            ("Stretching and recovery", Practice, "15 min"),
        ],
    },
    TemplateFamily {
        keywords: &["music", "guitar", "piano", "art", "draw", "paint"],
        tasks: [
            ("Warm-up with scales/basic exercises", Practice, "15 min"),
            ("Learn new piece or technique", Learning, "30 min"),
            ("Practice challenging sections", Practice, "20 min"),
            ("Record and review performance", Review, "15 min"),
            ("Study theory or famous works", Learning, "20 min"),
        ],
    },
    TemplateFamily {
        keywords: &["study", "exam", "course", "learn", "math", "science"],
        tasks: [
            ("Read and take notes on new material", Learning, "30 min"),
            ("Solve practice problems", Practice, "45 min"),
            ("Review previous notes and highlights", Review, "20 min"),
            ("Watch educational video or lecture", Learning, "30 min"),
            ("Create summary or mind map", Project, "25 min"),
        ],
    },
];

const DEFAULT_TEMPLATE: [(&str, TaskCategory, &str); 5] = [
    ("Research {goal} fundamentals", Learning, "30 min"),
    ("Practice core {goal} skills", Practice, "45 min"),
    ("Review progress and take notes", Review, "20 min"),
    ("Work on a {goal} mini-project", Project, "30 min"),
    ("Find and study additional resources", Learning, "15 min"),
];

/// Offline generator: canned task sets chosen by keywords in the goal title.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateTaskGenerator;

impl TemplateTaskGenerator {
    /// The template set for `goal_title`; first matching family wins.
    pub fn tasks_for(goal_title: &str) -> Vec<TaskDescriptor> {
        let lower = goal_title.to_lowercase();
        let template = TEMPLATE_FAMILIES
            .iter()
            .find(|family| family.keywords.iter().any(|k| lower.contains(k)))
            .map_or(&DEFAULT_TEMPLATE, |family| &family.tasks);

        template
            .iter()
            .map(|(title, category, duration)| {
                TaskDescriptor::new(title.replace("{goal}", goal_title), *category, duration)
            })
            .collect()
    }
}

impl TaskGenerator for TemplateTaskGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<TaskDescriptor>, AiError> {
        Ok(Self::tasks_for(&request.goal_title))
    }
}
