//! Integration tests for the AI collaborators against a mock endpoint.
//!
//! Every failure mode of the remote service must end in usable output:
//! the fixed task set for generation, a canned reply for chat.

use std::time::Duration;

use chrono::NaiveDate;
use goalpath_core::ai::{AiMentor, AiTaskGenerator, CompletionClient, Sampling};
use goalpath_core::{AppState, FixedClock, GoalDraft, Mentor, MentorConversation, TaskCategory};

const TASK_SAMPLING: Sampling = Sampling {
    temperature: 0.7,
    max_tokens: 1000,
};

const CHAT_SAMPLING: Sampling = Sampling {
    temperature: 0.8,
    max_tokens: 500,
};

fn client_for(server: &mockito::ServerGuard) -> CompletionClient {
    CompletionClient::new(
        format!("{}/v1/chat/completions", server.url()),
        "test-key",
        "qwen3-32b",
        Duration::from_secs(5),
    )
}

fn completion(content: &str) -> String {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

fn state() -> AppState {
    AppState::with_clock(FixedClock::new(
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
    ))
}

#[tokio::test]
async fn test_generated_tasks_are_installed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_body(completion(
            "Here you go:\n```json\n[\
             {\"title\":\"Play C major scale\",\"category\":\"practice\",\"duration\":\"15 min\"},\
             {\"title\":\"Read about chords\",\"category\":\"learning\",\"duration\":\"20 min\"},\
             {\"title\":\"Record a take\",\"category\":\"review\",\"duration\":\"10 min\"}\
             ]\n```",
        ))
        .create_async()
        .await;

    let generator = AiTaskGenerator::new(client_for(&server), TASK_SAMPLING);
    let mut state = state();
    state
        .create_goal(GoalDraft::new("Learn Piano"), &generator)
        .await;

    let titles: Vec<&str> = state.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(
        titles,
        ["Play C major scale", "Read about chords", "Record a take"]
    );
    assert_eq!(state.tasks()[2].id, "3");
}

#[tokio::test]
async fn test_server_error_falls_back_to_fixed_tasks() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let generator = AiTaskGenerator::new(client_for(&server), TASK_SAMPLING);
    let mut state = state();
    state
        .create_goal(GoalDraft::new("Learn Piano"), &generator)
        .await;

    let titles: Vec<&str> = state.tasks().iter().map(|t| t.title.as_str()).collect();
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
    let categories: Vec<TaskCategory> = state.tasks().iter().map(|t| t.category).collect();
    assert_eq!(
        categories,
        [
            TaskCategory::Learning,
            TaskCategory::Practice,
            TaskCategory::Review,
            TaskCategory::Project,
            TaskCategory::Learning,
        ]
    );
}

#[tokio::test]
async fn test_unparseable_reply_falls_back_to_fixed_tasks() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion("Sorry, I cannot help with that."))
        .create_async()
        .await;

    let generator = AiTaskGenerator::new(client_for(&server), TASK_SAMPLING);
    let mut state = state();
    state.create_goal(GoalDraft::new("Chess"), &generator).await;

    assert_eq!(state.tasks().len(), 5);
    assert_eq!(state.tasks()[0].title, "Research Chess basics");
}

#[tokio::test]
async fn test_mentor_reply_is_recorded() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "temperature": 0.8,
            "max_tokens": 500
        })))
        .with_status(200)
        .with_body(completion("Practice slowly, then speed up."))
        .create_async()
        .await;

    let mentor = Mentor::new(AiMentor::new(client_for(&server), CHAT_SAMPLING));
    let mut conversation = MentorConversation::new("Guitar", "");

    let reply = conversation.send(&mentor, "Any advice?").await;
    assert_eq!(reply.as_deref(), Some("Practice slowly, then speed up."));
    assert_eq!(conversation.transcript().len(), 3);
}

#[tokio::test]
async fn test_mentor_failure_uses_canned_reply() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":"bad key"}"#)
        .create_async()
        .await;

    let mentor = Mentor::new(AiMentor::new(client_for(&server), CHAT_SAMPLING));
    let mut conversation = MentorConversation::new("Guitar", "");

    let reply = conversation.send(&mentor, "thanks!").await.unwrap();
    assert!(reply.starts_with("You're very welcome!"));
    assert!(reply.contains("your Guitar journey"));
}
