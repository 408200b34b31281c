use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "goalpath", version, about = "GoalPath CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session over one goal
    Session,
    /// Generate daily tasks for a goal and print them as JSON
    Tasks(commands::tasks::TasksArgs),
    /// Ask the mentor a single question
    Chat(commands::chat::ChatArgs),
    /// Take the knowledge quiz
    Quiz,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GOALPATH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Session => commands::session::run().await,
        Commands::Tasks(args) => commands::tasks::run(args).await,
        Commands::Chat(args) => commands::chat::run(args).await,
        Commands::Quiz => commands::quiz::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
