// ABOUTME: Configuration loading for statefulchat.
// ABOUTME: Reads ~/.statefulchat/config.toml, falling back to defaults for anything missing.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::session::DEFAULT_SYSTEM_PROMPT;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub session: SessionConfig,
}

/// Completion provider configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub openai: EndpointConfig,
    pub ollama: EndpointConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            openai: EndpointConfig {
                base_url: "https://api.openai.com/v1".to_string(),
            },
            ollama: EndpointConfig {
                base_url: "http://localhost:11434".to_string(),
            },
        }
    }
}

/// Base URL of a provider endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub base_url: String,
}

/// Where sessions are stored and how they start.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub logs_dir: PathBuf,
    pub system_prompt: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from("logs"),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl Config {
    /// Load config from ~/.statefulchat/config.toml, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".statefulchat")
            .join("config.toml")
    }
}
