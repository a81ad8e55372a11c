use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scribe::{cli, config};

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Turns conversations about your work into wiki status updates")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a conversation and push the resulting updates
    Chat {
        /// Page URL to use (overrides the configured default)
        #[arg(short, long)]
        url: Option<String>,
    },
    /// Run the configuration wizard for a wiki page
    Configure {
        /// Page URL to configure (prompted for when omitted)
        #[arg(short, long)]
        url: Option<String>,
    },
    /// Print the configuration file path
    ConfigPath,
}

/// Initialize tracing to stderr so stdout stays clean for the chat.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "scribe=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    init_tracing();

    match args.command {
        Some(Commands::Chat { url }) => cli::run_chat(url).await?,
        Some(Commands::Configure { url }) => cli::run_configure(url).await?,
        Some(Commands::ConfigPath) => {
            println!("{}", config::config_path()?.display());
        }
        None => cli::run_chat(None).await?,
    }

    Ok(())
}
