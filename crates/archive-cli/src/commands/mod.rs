pub mod index;
pub mod search;
pub mod status;

use crate::client::ApiClient;
use anyhow::Result;

/// Trait for all CLI commands
pub trait Command {
    async fn execute(&self, client: &ApiClient) -> Result<()>;
}
