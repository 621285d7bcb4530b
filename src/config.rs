//! Runtime configuration
//!
//! Read from an optional JSON file, then overridden by environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::llm::ollama::DEFAULT_OLLAMA_URL;
use crate::persistence::SaveStore;

pub const ENV_DATA_DIR: &str = "OFFICE_SIM_DATA_DIR";
pub const ENV_MODEL: &str = "OFFICE_SIM_MODEL";
pub const ENV_OLLAMA_HOST: &str = "OLLAMA_HOST";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_save_file")]
    pub save_file: String,
    /// Defaults to `<data_dir>/exports`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_llm_base_url")]
    pub llm_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_fallback")]
    pub fallback_on_provider_error: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_save_file() -> String {
    "autosave.json".to_string()
}

fn default_model() -> String {
    "llama3.2:latest".to_string()
}

fn default_llm_base_url() -> String {
    DEFAULT_OLLAMA_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_fallback() -> bool {
    true
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            save_file: default_save_file(),
            export_dir: None,
            model: default_model(),
            llm_base_url: default_llm_base_url(),
            request_timeout_secs: default_timeout_secs(),
            fallback_on_provider_error: default_fallback(),
        }
    }
}

impl SimConfig {
    /// Load config from file, or defaults when the file doesn't exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: SimConfig =
            serde_json::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    /// Applies `OFFICE_SIM_DATA_DIR`, `OFFICE_SIM_MODEL` and `OLLAMA_HOST`
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.model = model;
        }
        if let Some(host) = lookup(ENV_OLLAMA_HOST) {
            self.llm_base_url = host;
        }
        self
    }

    pub fn autosave_path(&self) -> PathBuf {
        self.data_dir.join(&self.save_file)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("exports"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn save_store(&self) -> SaveStore {
        SaveStore::new(self.autosave_path(), self.export_dir())
    }
}
