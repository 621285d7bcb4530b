use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::llm::LlmClient;
use crate::parser;
use crate::prompts::PromptBuilder;
use crate::types::{Character, SimulationResult};

/// Produces the events of one day.
///
/// Called at most once per day-advance. An `Err` means the day must not
/// advance; a degraded `Ok` still counts as a simulated day.
#[async_trait]
pub trait DaySimulator: Send + Sync {
    async fn simulate_day(&self, day: u32, characters: &[Character]) -> Result<SimulationResult>;
}

/// Day simulation backed by an LLM
pub struct LlmDaySimulator {
    llm_client: Arc<dyn LlmClient>,
    prompt_builder: PromptBuilder,
    fallback_on_error: bool,
}

impl LlmDaySimulator {
    pub fn new(llm_client: impl LlmClient + 'static, data_path: impl AsRef<Path>) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            prompt_builder: PromptBuilder::new(data_path),
            fallback_on_error: true,
        }
    }

    /// When disabled, transport and parse failures propagate instead of
    /// turning into [`SimulationResult::degraded`].
    pub fn with_fallback(mut self, fallback_on_error: bool) -> Self {
        self.fallback_on_error = fallback_on_error;
        self
    }

    async fn request_day(&self, day: u32, characters: &[Character]) -> Result<SimulationResult> {
        let prompt = self.prompt_builder.build_day_prompt(day, characters)?;
        log::debug!("Day {} prompt: {}", day, prompt);

        let response = self.llm_client.query(prompt).await?;
        log::debug!("Day {} response: {}", day, response);

        let result: SimulationResult = parser::extract_json(&response)?;
        Ok(result)
    }
}

#[async_trait]
impl DaySimulator for LlmDaySimulator {
    async fn simulate_day(&self, day: u32, characters: &[Character]) -> Result<SimulationResult> {
        match self.request_day(day, characters).await {
            Ok(result) => {
                log::info!(
                    "🎲 Day {}: {} logs, {} relationship updates",
                    day,
                    result.logs.len(),
                    result.relationship_updates.len()
                );
                Ok(result)
            }
            Err(e) if self.fallback_on_error => {
                log::error!("Simulation failed for day {}: {:#}", day, e);
                Ok(SimulationResult::degraded())
            }
            Err(e) => Err(e),
        }
    }
}
