use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use careline::config::Config;
use careline::exchange;
use careline::session::Session;
use careline::tui;

/// `careline` - chat with the counseling assistant from your terminal.
#[derive(Parser, Debug)]
#[command(name = "careline")]
#[command(version)]
#[command(about = "Terminal chat client for the careline counseling assistant.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive chat screen (the default)
    Chat,
    /// Send a single question and print the reply
    Ask {
        /// The question to send
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging - respects RUST_LOG. The chat screen defaults to
    // warn so stray log lines don't tear the alternate screen.
    let default_filter = match cli.command {
        Some(Commands::Ask { .. }) => "info",
        _ => "warn",
    };
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut config = Config::load_or_init()?;
    config.apply_env_overrides();

    match cli.command {
        Some(Commands::Ask { message }) => ask(&config, message).await,
        Some(Commands::Chat) | None => tui::run(config).await,
    }
}

/// Single-message mode: one exchange against an empty transcript.
async fn ask(config: &Config, message: String) -> Result<()> {
    let client = exchange::create_client(config);
    let mut session = Session::new();
    session.set_pending_input(message);
    session.submit(client.as_ref()).await;

    if let Some(error) = session.error() {
        anyhow::bail!("{error}");
    }
    match session.transcript().last() {
        Some(turn) => println!("{}", turn.text),
        None => anyhow::bail!("no reply received"),
    }
    Ok(())
}
