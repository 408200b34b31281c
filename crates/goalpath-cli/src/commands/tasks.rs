use clap::Args;
use goalpath_core::{AppState, Config, ConfiguredTaskGenerator, GoalDraft};

use super::CommandResult;

#[derive(Args)]
pub struct TasksArgs {
    /// Goal title
    #[arg(long)]
    goal: String,
    /// Goal description
    #[arg(long, default_value = "")]
    description: String,
    /// Milestone title (repeatable)
    #[arg(long = "milestone")]
    milestones: Vec<String>,
}

pub async fn run(args: TasksArgs) -> CommandResult {
    let config = Config::load_or_default();
    let generator = ConfiguredTaskGenerator::from_config(&config.ai);
    tracing::debug!(remote = generator.is_remote(), "task generator selected");
    let mut state = AppState::from_config(&config);

    let draft = GoalDraft::new(args.goal)
        .description(args.description)
        .milestones(args.milestones);
    state.create_goal(draft, &generator).await;

    let json = serde_json::to_string_pretty(state.tasks())?;
    println!("{json}");
    Ok(())
}
