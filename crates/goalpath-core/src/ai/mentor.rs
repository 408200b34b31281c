//! AI mentor chat with a keyword-rule fallback.

use indoc::formatdoc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::client::{ChatMessage, CompletionClient, Role, Sampling};
use crate::config::AiConfig;
use crate::error::AiError;

/// Turns of prior conversation sent with each request.
pub const HISTORY_WINDOW: usize = 8;

/// Goal title used when no goal is set.
pub const DEFAULT_GOAL_TITLE: &str = "your learning journey";

/// Upper bound on one mentor reply unless configured otherwise.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(30);

const EMPTY_REPLY: &str = "I'm having trouble responding. Please try again!";

/// Everything the mentor sees for one reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub goal_title: String,
    pub goal_description: String,
    /// Prior turns, oldest first; only the last [`HISTORY_WINDOW`] are used
    pub history: Vec<ChatMessage>,
}

/// Produces one assistant reply.
#[allow(async_fn_in_trait)]
pub trait MentorChat {
    async fn reply(&self, request: &ChatRequest) -> Result<String, AiError>;
}

/// Mentor backed by the chat-completion service.
#[derive(Debug, Clone)]
pub struct AiMentor {
    client: CompletionClient,
    sampling: Sampling,
}

impl AiMentor {
    pub fn new(client: CompletionClient, sampling: Sampling) -> Self {
        Self { client, sampling }
    }

    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        Ok(Self::new(
            CompletionClient::from_config(config)?,
            Sampling {
                temperature: config.chat_temperature,
                max_tokens: config.chat_max_tokens,
            },
        ))
    }
}

/// System prompt casting the assistant as the goal's mentor.
pub fn mentor_system_prompt(goal_title: &str, goal_description: &str) -> String {
    let description = if goal_description.is_empty() {
        String::new()
    } else {
        format!("Goal description: {goal_description}")
    };

    formatdoc! {r#"
        You are a friendly, encouraging AI learning mentor named "Tech Mentor" for the Hall of Tech app.

        The user is working on this goal: "{goal_title}"
        {description}

        Your role:
        - Help them stay motivated and on track
        - Answer questions about their learning journey
        - Provide tips and guidance related to their goal
        - Be encouraging but practical
        - Keep responses concise (2-4 paragraphs max)
        - Use occasional emojis to be friendly 😊

        Remember: You're a mentor, not just an AI. Be warm and supportive!"#,
        goal_title = goal_title,
        description = description,
    }
}

/// System prompt, trailing history window, then the new user message.
pub fn build_messages(request: &ChatRequest) -> Vec<ChatMessage> {
    let skip = request.history.len().saturating_sub(HISTORY_WINDOW);
    let mut messages = Vec::with_capacity(HISTORY_WINDOW + 2);
    messages.push(ChatMessage::system(mentor_system_prompt(
        &request.goal_title,
        &request.goal_description,
    )));
    messages.extend(
        request
            .history
            .iter()
            .skip(skip)
            .filter(|m| m.role != Role::System)
            .cloned(),
    );
    messages.push(ChatMessage::user(request.message.clone()));
    messages
}

impl MentorChat for AiMentor {
    async fn reply(&self, request: &ChatRequest) -> Result<String, AiError> {
        let content = self
            .client
            .complete(&build_messages(request), self.sampling)
            .await?;
        Ok(content.unwrap_or_else(|| EMPTY_REPLY.to_string()))
    }
}

struct CannedRule {
    keywords: &'static [&'static str],
    template: &'static str,
}

const CANNED_RULES: &[CannedRule] = &[
    CannedRule {
        keywords: &["hello", "hi", "hey"],
        template: "Hey there! 👋 Great to see you working on {goal}! How can I help you today? Feel free to ask me anything about your learning journey!",
    },
    CannedRule {
        keywords: &["stuck", "difficult", "hard", "struggling"],
        template: "I understand that {goal} can be challenging sometimes! 💪 Here are some tips:\n\n• Break the problem into smaller parts\n• Take a short break and come back fresh\n• Look for examples or tutorials\n• Try explaining the concept out loud\n\nWhat specific part are you finding difficult? I'm here to help!",
    },
    CannedRule {
        keywords: &["motivat", "tired", "give up", "quit"],
        template: "I believe in you! 🌟 Learning {goal} is a journey, and every step forward counts.\n\nRemember:\n• You've already made progress by starting\n• Even 15 minutes of practice adds up\n• It's okay to have slow days\n\nYou're doing great just by showing up. What's one small thing you can accomplish today?",
    },
    CannedRule {
        keywords: &["tip", "advice", "suggest", "recommend"],
        template: "Great question! 📚 Here are my top tips for mastering {goal}:\n\n1. **Be consistent** - Even 15-30 mins daily beats long irregular sessions\n2. **Learn by doing** - Apply what you learn immediately\n3. **Embrace mistakes** - They're your best teachers\n4. **Track progress** - Celebrate small wins!\n\nWhich of these would you like to explore more?",
    },
    CannedRule {
        keywords: &["resource", "where", "find", "material"],
        template: "Looking for resources? 📖 Here's what I recommend for {goal}:\n\n• **Documentation** - Always start with official docs\n• **YouTube** - Great for visual learners\n• **Practice platforms** - Hands-on exercises\n• **Communities** - Reddit, Discord, forums\n\nWould you like more specific recommendations?",
    },
    CannedRule {
        keywords: &["progress", "how am i", "doing well"],
        template: "You're making progress! 🎉 The fact that you're here, working on {goal}, shows commitment.\n\nKeep checking off those daily tasks and watch your skills grow. Remember, consistency beats intensity!\n\nWhat achievement are you most proud of so far?",
    },
    CannedRule {
        keywords: &["thank"],
        template: "You're very welcome! 😊 I'm always here to help with your {goal} journey. Keep up the amazing work, and don't hesitate to reach out whenever you need guidance or motivation!",
    },
];

const DEFAULT_CANNED: &str = "That's a great question about {goal}! 🤔\n\nBased on your learning journey, I'd suggest:\n• Focus on consistent daily practice\n• Build small projects to apply what you learn\n• Don't be afraid to experiment and make mistakes\n\nIs there something specific you'd like me to help you with?";

/// Offline reply: first rule whose keyword appears in the lowercased
/// message, else the default, with the goal title filled in.
pub fn canned_reply(message: &str, goal_title: &str) -> String {
    let lower = message.to_lowercase();
    let template = CANNED_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map_or(DEFAULT_CANNED, |rule| rule.template);
    template.replace("{goal}", goal_title)
}

/// Mentor that only ever answers from the canned rule table.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedMentor;

impl MentorChat for CannedMentor {
    async fn reply(&self, request: &ChatRequest) -> Result<String, AiError> {
        Ok(canned_reply(&request.message, &request.goal_title))
    }
}

/// Wraps a collaborator so every failure degrades to a canned reply.
#[derive(Debug, Clone)]
pub struct Mentor<M> {
    inner: M,
    timeout: Duration,
}

impl<M: MentorChat> Mentor<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }

    /// Wrap the configured mentor, bounded by the configured timeout.
    pub fn from_config(inner: M, config: &AiConfig) -> Self {
        Self::new(inner).timeout(config.timeout())
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Always returns a reply; collaborator errors and timeouts are logged
    /// and replaced.
    pub async fn respond(&self, request: &ChatRequest) -> String {
        let result = match tokio::time::timeout(self.timeout, self.inner.reply(request)).await {
            Ok(result) => result,
            Err(_) => Err(AiError::Timeout(self.timeout)),
        };

        match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "mentor chat failed; using canned reply");
                canned_reply(&request.message, &request.goal_title)
            }
        }
    }
}

/// In-memory transcript with the mentor for one goal.
#[derive(Debug, Clone)]
pub struct MentorConversation {
    goal_title: String,
    goal_description: String,
    transcript: Vec<ChatMessage>,
}

impl MentorConversation {
    /// Start a conversation seeded with the mentor's greeting. An empty
    /// title falls back to [`DEFAULT_GOAL_TITLE`].
    pub fn new(goal_title: &str, goal_description: &str) -> Self {
        let goal_title = if goal_title.trim().is_empty() {
            DEFAULT_GOAL_TITLE.to_string()
        } else {
            goal_title.to_string()
        };
        let greeting = format!(
            "Hi there! 👋 I'm your AI mentor. I'm here to help you with {goal_title}! Ask me anything - tips, motivation, or guidance!"
        );
        Self {
            goal_title,
            goal_description: goal_description.to_string(),
            transcript: vec![ChatMessage::assistant(greeting)],
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Send one user message and record the reply. Blank input is ignored
    /// and returns `None`.
    pub async fn send<M: MentorChat>(&mut self, mentor: &Mentor<M>, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let skip = self.transcript.len().saturating_sub(HISTORY_WINDOW);
        let request = ChatRequest {
            message: text.to_string(),
            goal_title: self.goal_title.clone(),
            goal_description: self.goal_description.clone(),
            history: self.transcript[skip..].to_vec(),
        };

        self.transcript.push(ChatMessage::user(text));
        let reply = mentor.respond(&request).await;
        self.transcript.push(ChatMessage::assistant(reply.clone()));
        Some(reply)
    }
}
