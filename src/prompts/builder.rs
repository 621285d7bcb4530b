use anyhow::Result;
use std::path::Path;

use super::loader::PromptLoader;
use crate::types::{Character, CharacterContext};

/// Builds the prompt sent to the day-simulation model
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    loader: PromptLoader,
}

impl PromptBuilder {
    pub fn new(data_path: impl AsRef<Path>) -> Self {
        Self {
            loader: PromptLoader::new(data_path),
        }
    }

    pub fn build_day_prompt(&self, day: u32, characters: &[Character]) -> Result<String> {
        let context: Vec<CharacterContext<'_>> = characters.iter().map(CharacterContext::from).collect();

        let sections = [
            self.loader.load_day_simulation()?,
            format!(
                "## Characters\n\n```json\n{}\n```",
                serde_json::to_string(&context)?
            ),
            format!("Simulate day {}.", day),
        ];

        Ok(sections.join("\n\n---\n\n"))
    }
}
