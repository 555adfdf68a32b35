pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "A terminal reader for top headlines", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/newsdesk/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the favorites database (default: ~/.local/share/newsdesk/newsdesk.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui,
    /// Print one page of headlines
    Headlines(HeadlinesArgs),
    /// List saved articles
    Favorites,
}

#[derive(Args, Debug, Clone)]
pub struct HeadlinesArgs {
    /// Category: general, business, entertainment, health, science, sports, technology
    #[arg(short, long, default_value = "general")]
    pub category: String,

    /// Page number (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Only show articles whose title or description contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Earliest publication date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest publication date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub to: Option<String>,
}
