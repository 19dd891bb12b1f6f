//! Provider adapters turning a system prompt and a user prompt into parsed JSON
//!
//! - `DeepSeekProxyClient`: key-gated primary provider, reached through the proxy route
//! - `GeminiClient`: fallback provider with schema-constrained output
//! - Shared request type, error taxonomy and response helpers


mod utils;

pub mod deepseek;
pub mod error;
pub mod gemini;
pub mod types;

pub use deepseek::DeepSeekProxyClient;
pub use error::ProviderError;
pub use gemini::GeminiClient;
pub use types::*;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for providers that answer with a single JSON document
#[async_trait]
pub trait JsonProvider: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Sends the prompts and returns the parsed JSON payload
    async fn generate_json(&self, request: &JsonRequest) -> Result<Value>;
}
