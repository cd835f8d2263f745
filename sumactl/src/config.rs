//! Configuration loading
//!
//! One TOML file holds the target server and the login credentials; the
//! schedule offset can come from the file or be overridden on the command
//! line. Missing or malformed config is startup-fatal.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;

use crate::session::{Credentials, ServerIdentity};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: String,
    pub user: String,
    pub password: String,
    /// Relative offset in hours for install scheduling; absent means
    /// "report only, schedule nothing"
    #[serde(default)]
    pub schedule_offset_hours: Option<String>,
}

impl Config {
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config {}: {}", path, e))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| anyhow!("Failed to parse config {}: {}", path, e))?;

        if config.server.trim().is_empty() {
            return Err(anyhow!("Config {} has an empty server field", path));
        }

        Ok(config)
    }

    pub fn server_identity(&self) -> ServerIdentity {
        ServerIdentity::new(&self.server)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            login: self.user.clone(),
            password: self.password.clone(),
        }
    }
}
