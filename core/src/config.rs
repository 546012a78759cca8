// Store configuration
//
// Injected by the embedding application: retention limits, the trusted
// chat set, and where the snapshot blob lives. No module-level globals.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the snapshot blob
    pub data_dir: PathBuf,

    /// Per-chat retention limit
    #[serde(default = "default_msg_limit")]
    pub msg_limit: usize,

    /// Retention limit for trusted chats
    #[serde(default = "default_trusted_msg_limit")]
    pub trusted_msg_limit: usize,

    /// Chats granted the higher limit
    #[serde(default)]
    pub trusted_chats: HashSet<i64>,
}

fn default_msg_limit() -> usize {
    500
}

fn default_trusted_msg_limit() -> usize {
    5000
}

impl StoreConfig {
    /// Create a config with default limits and an empty trusted set
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            msg_limit: default_msg_limit(),
            trusted_msg_limit: default_trusted_msg_limit(),
            trusted_chats: HashSet::new(),
        }
    }

    /// Get the platform data directory for the cache (created if missing)
    pub fn default_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .context("Failed to determine data directory")?
            .join("recall");

        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        Ok(data_dir)
    }

    /// Load config from a JSON file, or write defaults there if not exists
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("Failed to read store config")?;
            let config: StoreConfig =
                serde_json::from_str(&contents).context("Failed to parse store config")?;
            Ok(config)
        } else {
            let config = Self::new(Self::default_data_dir()?);
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save config to a JSON file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize store config")?;
        std::fs::write(path, contents).context("Failed to write store config")?;
        Ok(())
    }

    /// Whether a chat gets the higher retention limit
    pub fn is_trusted(&self, chat_id: i64) -> bool {
        self.trusted_chats.contains(&chat_id)
    }

    /// Retention limit for a chat
    pub fn limit_for(&self, chat_id: i64) -> usize {
        if self.is_trusted(chat_id) {
            self.trusted_msg_limit
        } else {
            self.msg_limit
        }
    }
}
