use clap::Args;
use goalpath_core::{Config, ConfiguredMentor, Mentor, MentorConversation};

use super::CommandResult;

#[derive(Args)]
pub struct ChatArgs {
    /// Goal the mentor should focus on
    #[arg(long, default_value = "")]
    goal: String,
    /// Goal description
    #[arg(long, default_value = "")]
    description: String,
    /// Message to send
    message: String,
}

pub async fn run(args: ChatArgs) -> CommandResult {
    let config = Config::load_or_default();
    let mentor = Mentor::from_config(ConfiguredMentor::from_config(&config.ai), &config.ai);
    let mut conversation = MentorConversation::new(&args.goal, &args.description);

    let reply = conversation
        .send(&mentor, &args.message)
        .await
        .ok_or("message is empty")?;
    println!("{reply}");
    Ok(())
}
