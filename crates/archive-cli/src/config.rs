use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CliConfig {
    pub server_url: String,
    pub default_limit: usize,
    pub output_format: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
            default_limit: 10,
            output_format: "table".to_string(),
        }
    }
}

impl CliConfig {
    #[allow(dead_code)]
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?
            .join("archive-cli");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    #[allow(dead_code)]
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
