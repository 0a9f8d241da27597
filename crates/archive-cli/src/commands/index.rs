use crate::client::{ApiClient, IndexReport};
use crate::commands::Command;
use crate::output::OutputFormatter;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct IndexCommand {
    #[command(subcommand)]
    pub action: IndexAction,

    /// Output format: table, json
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum IndexAction {
    /// Build the vector index from every article in the store
    Build,
    /// Index articles added or changed since the last build
    Update,
}

impl Command for IndexCommand {
    async fn execute(&self, client: &ApiClient) -> Result<()> {
        let formatter = OutputFormatter::new(&self.format);

        formatter.display_progress_start(match self.action {
            IndexAction::Build => "Building the index from the full article store",
            IndexAction::Update => "Indexing articles added since the last build",
        })?;

        let report = match self.action {
            IndexAction::Build => client.build_index().await?,
            IndexAction::Update => client.update_index().await?,
        };

        match self.format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&report)?),
            _ => display_report(&formatter, &report)?,
        }

        Ok(())
    }
}

fn display_report(formatter: &OutputFormatter, report: &IndexReport) -> Result<()> {
    if report.articles_failed == 0 {
        formatter.display_success_message(&format!(
            "Indexed {} articles ({} chunks written)",
            report.articles_processed, report.chunks_written
        ))?;
    } else {
        formatter.display_warning_message(&format!(
            "Indexed {} articles, {} failed ({} chunks written)",
            report.articles_processed, report.articles_failed, report.chunks_written
        ))?;
    }
    Ok(())
}
