mod cmd;
mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "deckhand",
    about = "Terminal dashboard for a CI/CD action execution service",
    version,
    propagate_version = true
)]
struct Cli {
    /// Base URL of the action service
    #[arg(
        long,
        global = true,
        env = "DECKHAND_SERVER",
        default_value = "http://localhost:8080"
    )]
    server: String,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all actions
    List,

    /// Show one action
    Show { id: u32 },

    /// Submit a new action
    Create {
        /// Execution environment image
        #[arg(long)]
        image: String,

        /// Source repository URL
        #[arg(long)]
        repo_url: String,

        /// Action id to register with the scheduler
        #[arg(long)]
        action_id: u32,

        /// Command to run inside the environment (repeatable)
        #[arg(long = "command")]
        commands: Vec<String>,
    },

    /// Delete an action
    Delete { id: u32 },

    /// Poll the service and print changes as they happen
    Watch {
        /// Seconds between polls
        #[arg(long, default_value = "2")]
        interval: u64,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::List => cmd::list::run(&cli.server, cli.json).await,
        Commands::Show { id } => cmd::show::run(&cli.server, id, cli.json).await,
        Commands::Create {
            image,
            repo_url,
            action_id,
            commands,
        } => cmd::create::run(&cli.server, image, repo_url, action_id, commands, cli.json).await,
        Commands::Delete { id } => cmd::delete::run(&cli.server, id, cli.json).await,
        Commands::Watch { interval } => cmd::watch::run(&cli.server, interval).await,
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
