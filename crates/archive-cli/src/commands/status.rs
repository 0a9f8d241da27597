use crate::client::ApiClient;
use crate::commands::Command;
use crate::output::OutputFormatter;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct StatusCommand {
    /// Output format: table, json
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

impl Command for StatusCommand {
    async fn execute(&self, client: &ApiClient) -> Result<()> {
        let formatter = OutputFormatter::new(&self.format);

        if !client.health_check().await? {
            formatter.display_error_message("API server is not reachable")?;
            return Ok(());
        }

        let health = client.health().await?;
        let stats = client.stats().await?;

        match self.format.as_str() {
            "json" => {
                println!("{}", serde_json::json!({ "health": health, "stats": stats }));
            }
            _ => formatter.display_status(&health, &stats)?,
        }

        Ok(())
    }
}
