use crate::client::{ApiClient, SearchFilters};
use crate::commands::Command;
use crate::output::OutputFormatter;
use anyhow::Result;
use clap::Args;
use colored::*;

#[derive(Args)]
pub struct SearchCommand {
    /// Search query
    pub query: String,

    /// Restrict to a single source
    #[arg(long)]
    pub source: Option<String>,

    /// Restrict to a single author
    #[arg(long)]
    pub author: Option<String>,

    /// Named date range (past_week, past_month, past_3_months, past_year, 1990s, 2000s, 2010s, 2020s)
    #[arg(long)]
    pub date_range: Option<String>,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Result offset, for paging through a result set
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Output format: table, json, simple
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

impl Command for SearchCommand {
    async fn execute(&self, client: &ApiClient) -> Result<()> {
        let formatter = OutputFormatter::new(&self.format);

        println!("{} Searching for: {}", "\u{1F50D}".blue(), self.query.cyan().bold());

        let filters = SearchFilters {
            source: self.source.clone(),
            author: self.author.clone(),
            date_range: self.date_range.clone(),
            custom_start: None,
            custom_end: None,
        };

        let response = client.search(&self.query, filters, Some(self.limit), Some(self.offset)).await?;

        if response.results.is_empty() {
            println!("{} No results found for '{}'", "\u{274C}".red(), self.query);
            return Ok(());
        }

        match self.format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&response)?),
            "simple" => {
                for (i, result) in response.results.iter().enumerate() {
                    println!("{}. {} (score: {:.3})", i + 1, result.title.green().bold(), result.score);
                    println!("   {}", result.excerpt.dimmed());
                    println!();
                }
            }
            _ => formatter.display_search_results(&response)?,
        }

        let summary = format!(
            "\u{2705} Found {} results in {}ms ({} semantic terms, {} exact phrases)",
            response.total,
            response.query_time_ms,
            response.parsed_query.semantic_terms.len(),
            response.parsed_query.exact_phrases.len(),
        );

        if response.total > 0 {
            println!("{}", summary.green());
        } else {
            println!("{}", summary.yellow());
        }

        Ok(())
    }
}
