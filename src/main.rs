use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsdesk::app::AppContext;
use newsdesk::cli::{commands, Cli, Commands};
use newsdesk::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the TUI and command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config, cli.db)?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            newsdesk::tui::run(Arc::new(ctx)).await?;
        }
        Commands::Headlines(args) => {
            commands::headlines(&ctx, &args).await?;
        }
        Commands::Favorites => {
            commands::favorites(&ctx)?;
        }
    }

    Ok(())
}
