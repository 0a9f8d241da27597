use crate::client::{HealthReport, SearchResponse, StoreStats};
use anyhow::Result;
use colored::*;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

pub struct OutputFormatter {
    #[allow(dead_code)]
    format: String,
}

impl OutputFormatter {
    pub fn new(format: &str) -> Self {
        Self { format: format.to_string() }
    }

    pub fn display_search_results(&self, response: &SearchResponse) -> Result<()> {
        let mut table = Table::new();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Score").add_attribute(Attribute::Bold),
                Cell::new("Title").add_attribute(Attribute::Bold),
                Cell::new("Excerpt").add_attribute(Attribute::Bold),
                Cell::new("Source").add_attribute(Attribute::Bold),
                Cell::new("Author").add_attribute(Attribute::Bold),
            ]);

        for result in &response.results {
            let score_color = if result.score > 0.8 {
                Color::Green
            } else if result.score > 0.6 {
                Color::Yellow
            } else {
                Color::Red
            };

            let excerpt = if result.excerpt.len() > 80 {
                format!("{}...", &result.excerpt[..77])
            } else {
                result.excerpt.clone()
            };

            table.add_row(vec![
                Cell::new(format!("{:.3}", result.score)).fg(score_color),
                Cell::new(&result.title).add_attribute(Attribute::Bold),
                Cell::new(excerpt),
                Cell::new(&result.source),
                Cell::new(result.author.as_deref().unwrap_or("-")).fg(Color::Cyan),
            ]);
        }

        println!("{}", table);
        Ok(())
    }

    pub fn display_status(&self, health: &HealthReport, stats: &StoreStats) -> Result<()> {
        println!("{}", "\u{1F4CA} System Status".blue().bold());
        println!();

        println!("Health: {}", health.status.to_string().green().bold());
        for component in &health.components {
            println!("   {} : {}", component.component, component.status);
        }

        println!();
        println!("\u{1F4DA} Articles: {}", stats.article_count.to_string().yellow());
        println!("   Indexed: {}", stats.indexed_count.to_string().yellow());
        println!("   Chunks: {}", stats.chunk_count.to_string().yellow());
        println!("   Sources: {}", stats.source_count.to_string().yellow());

        Ok(())
    }

    pub fn display_success_message(&self, message: &str) -> Result<()> {
        println!("{} {}", "\u{2705}".green(), message.green().bold());
        Ok(())
    }

    pub fn display_warning_message(&self, message: &str) -> Result<()> {
        println!("{} {}", "\u{26A0}".yellow(), message.yellow());
        Ok(())
    }

    pub fn display_error_message(&self, message: &str) -> Result<()> {
        println!("{} {}", "\u{274C}".red(), message.red());
        Ok(())
    }

    pub fn display_progress_start(&self, message: &str) -> Result<()> {
        println!("{} {}...", "\u{1F504}".blue(), message);
        Ok(())
    }
}
