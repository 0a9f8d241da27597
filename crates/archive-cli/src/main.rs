use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

mod client;
mod commands;
mod config;
mod output;

use commands::*;

#[derive(Parser)]
#[command(name = "archive")]
#[command(about = "Command-line client for the article-indexer search API")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// API server URL
    #[arg(long, global = true, default_value = "http://localhost:8080")]
    server: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Search articles with semantic similarity
    Search(search::SearchCommand),

    /// Build or update the vector index
    Index(index::IndexCommand),

    /// Show store statistics and health
    Status(status::StatusCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("archive_cli={log_level}"))
        .with_target(false)
        .without_time()
        .init();

    let client = client::ApiClient::new(cli.server.clone())?;

    let result = match cli.command {
        Commands::Search(cmd) => cmd.execute(&client).await,
        Commands::Index(cmd) => cmd.execute(&client).await,
        Commands::Status(cmd) => cmd.execute(&client).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "\u{274C} Error:".red().bold(), e);

        if e.to_string().contains("Connection refused") || e.to_string().contains("network") {
            eprintln!("{} Is the article-indexer service running at {}?", "\u{1F4A1}".yellow(), cli.server.cyan());
        } else if e.to_string().contains("404") {
            eprintln!("{} The requested resource was not found", "\u{1F4A1}".yellow());
        }

        std::process::exit(1);
    }

    Ok(())
}
