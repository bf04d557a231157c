// ABOUTME: Agent module — completion client trait, provider factory, and HTTP client.
// ABOUTME: The session controller only sees the CompletionClient trait.

pub mod openai;
pub mod provider;

pub use openai::{CompletionError, OpenAiClient};
pub use provider::*;
