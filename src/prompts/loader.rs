use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use super::templates::DAY_SIMULATION_DEFAULT;

/// Loads prompt templates from the filesystem with fallback to defaults
#[derive(Debug, Clone)]
pub struct PromptLoader {
    prompts_dir: PathBuf,
}

impl PromptLoader {
    pub fn new(data_path: impl AsRef<Path>) -> Self {
        Self {
            prompts_dir: data_path.as_ref().join("prompts"),
        }
    }

    /// Load the day-simulation prompt, using the default if no override exists
    pub fn load_day_simulation(&self) -> Result<String> {
        let path = self.prompts_dir.join("day_simulation.md");

        if path.exists() {
            log::debug!("Loading day simulation prompt from: {:?}", path);
            return fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("Failed to read day simulation prompt: {}", e));
        }

        log::debug!("Using default day simulation prompt");
        Ok(DAY_SIMULATION_DEFAULT.to_string())
    }
}
