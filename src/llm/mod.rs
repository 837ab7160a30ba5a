pub mod anthropic;
pub mod client;
pub mod ollama;
pub mod openai;
pub mod types;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;
pub use types::*;
