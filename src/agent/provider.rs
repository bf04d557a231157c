// ABOUTME: Completion client seam and provider factory — creates the right client based on config.
// ABOUTME: Supports openai and ollama, both through the OpenAI-compatible chat completions API.

use std::sync::Arc;

use async_trait::async_trait;

use crate::agent::openai::OpenAiClient;
use crate::config::LlmConfig;
use crate::session::Turn;

/// Turns a full conversation into the next assistant reply.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Request a reply for `conversation` from `model`.
    async fn complete(&self, model: &str, conversation: &[Turn]) -> anyhow::Result<String>;
}

/// Create a completion client based on the provider name in config.
pub fn create_client(config: &LlmConfig) -> anyhow::Result<Arc<dyn CompletionClient>> {
    match config.provider.as_str() {
        "openai" => {
            let api_key = std::env::var(&config.api_key_env).map_err(|_| {
                anyhow::anyhow!(
                    "{} is not set; export it or add it to a .env file",
                    config.api_key_env
                )
            })?;
            Ok(Arc::new(OpenAiClient::new(&config.openai.base_url, Some(api_key))))
        }
        "ollama" => {
            let base_url = format!("{}/v1", config.ollama.base_url.trim_end_matches('/'));
            Ok(Arc::new(OpenAiClient::new(&base_url, None)))
        }
        other => anyhow::bail!(
            "Unknown LLM provider: '{}'. Expected: openai, ollama",
            other
        ),
    }
}
