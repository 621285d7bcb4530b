pub mod ollama;

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn query(&self, prompt: String) -> Result<String>;
}

pub use ollama::OllamaClient;
