pub mod client;

pub use client::InferenceClient;

use crate::tools::ToolDefinition;
use crate::types::{ChatMessage, InferenceResponse};
use anyhow::Result;
use async_trait::async_trait;

/// A hosted model that accepts a transcript plus tool definitions and
/// returns text and/or tool invocation requests.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one completion. An empty `tools` slice means no tools are bound.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<InferenceResponse>;
}
