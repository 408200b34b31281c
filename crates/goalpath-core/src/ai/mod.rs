//! AI collaborators: task generation and mentor chat.
//!
//! Both talk to an OpenAI-compatible chat-completion endpoint through
//! [`CompletionClient`]. Neither is trusted to succeed: callers absorb every
//! failure with a static fallback (the fixed task set, or a canned reply).

pub mod client;
pub mod mentor;
pub mod tasks;

pub use client::{ChatMessage, CompletionClient, Role, Sampling};
pub use mentor::{
    canned_reply, AiMentor, CannedMentor, ChatRequest, Mentor, MentorChat, MentorConversation,
    DEFAULT_GOAL_TITLE, DEFAULT_REPLY_TIMEOUT, HISTORY_WINDOW,
};
pub use tasks::{
    parse_task_list, AiTaskGenerator, GenerationRequest, TaskGenerator, TemplateTaskGenerator,
};

use crate::config::AiConfig;
use crate::error::AiError;
use crate::task::TaskDescriptor;

/// Task generator chosen from configuration: the remote service when
/// credentials exist, otherwise the offline templates.
#[derive(Debug, Clone)]
pub enum ConfiguredTaskGenerator {
    Remote(AiTaskGenerator),
    Templates(TemplateTaskGenerator),
}

impl ConfiguredTaskGenerator {
    pub fn from_config(config: &AiConfig) -> Self {
        match AiTaskGenerator::from_config(config) {
            Ok(generator) => Self::Remote(generator),
            Err(_) => {
                tracing::debug!("AI not configured; using template task generator");
                Self::Templates(TemplateTaskGenerator)
            }
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl TaskGenerator for ConfiguredTaskGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<TaskDescriptor>, AiError> {
        match self {
            Self::Remote(generator) => generator.generate(request).await,
            Self::Templates(generator) => generator.generate(request).await,
        }
    }
}

/// Mentor chosen from configuration, same policy as [`ConfiguredTaskGenerator`].
#[derive(Debug, Clone)]
pub enum ConfiguredMentor {
    Remote(AiMentor),
    Canned(CannedMentor),
}

impl ConfiguredMentor {
    pub fn from_config(config: &AiConfig) -> Self {
        match AiMentor::from_config(config) {
            Ok(mentor) => Self::Remote(mentor),
            Err(_) => Self::Canned(CannedMentor),
        }
    }
}

impl MentorChat for ConfiguredMentor {
    async fn reply(&self, request: &ChatRequest) -> Result<String, AiError> {
        match self {
            Self::Remote(mentor) => mentor.reply(request).await,
            Self::Canned(mentor) => mentor.reply(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_falls_back_to_offline_backends() {
        let config = AiConfig::default();
        assert!(!ConfiguredTaskGenerator::from_config(&config).is_remote());
        assert!(matches!(
            ConfiguredMentor::from_config(&config),
            ConfiguredMentor::Canned(_)
        ));
    }

    #[test]
    fn configured_uses_remote_backends() {
        let config = AiConfig {
            api_key: "key".into(),
            ..AiConfig::default()
        };
        assert!(ConfiguredTaskGenerator::from_config(&config).is_remote());
        assert!(matches!(
            ConfiguredMentor::from_config(&config),
            ConfiguredMentor::Remote(_)
        ));
    }

    #[tokio::test]
    async fn template_backend_generates_offline() {
        let generator = ConfiguredTaskGenerator::from_config(&AiConfig::default());
        let tasks = generator
            .generate(&GenerationRequest {
                goal_title: "Spanish".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(tasks[0].title, "Learn 15 new vocabulary words");
    }
}
