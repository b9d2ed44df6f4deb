//! Single tool-augmented turn: Ask → (Act) → Answer.
//!
//! 1. Send the question with the registered tool definitions
//! 2. If the model requested a tool, run the first request only
//! 3. Replay question, model response and tool result for the final answer

use crate::inference::ChatModel;
use crate::tools::ToolRegistry;
use crate::types::*;
use anyhow::Result;
use tracing::{info, warn};

/// Everything one run produced, in the order it happened.
#[derive(Debug, Clone)]
pub struct ConversationOutcome {
    /// The model's first response, tool requests included.
    pub first_response: InferenceResponse,
    /// The tool result sent back, if the model asked for a tool.
    pub tool_result: Option<ToolResult>,
    /// Final text answer.
    pub answer: String,
}

impl ConversationOutcome {
    /// Whether a second model call happened.
    pub fn used_tool(&self) -> bool {
        self.tool_result.is_some()
    }
}

/// Run the round trip. `followup_question` is the human turn replayed in
/// the second call; it need not match `question` byte for byte.
///
/// Model failures propagate; tool failures are handed to the model as text.
pub async fn run_conversation(
    model: &dyn ChatModel,
    registry: &ToolRegistry,
    question: &str,
    followup_question: &str,
) -> Result<ConversationOutcome> {
    info!("Asking: {}", question);

    let tool_defs = registry.definitions();
    let first_response = model
        .chat(&[ChatMessage::human(question)], &tool_defs)
        .await?;

    info!("Content: {}", first_response.text());
    for tc in &first_response.tool_calls {
        info!("Tool call: {}", tc);
    }

    let Some(call) = first_response.tool_calls.first().cloned() else {
        info!("Model answered directly");
        let answer = first_response.text().to_string();
        return Ok(ConversationOutcome {
            first_response,
            tool_result: None,
            answer,
        });
    };

    if first_response.tool_calls.len() > 1 {
        warn!(
            "Model requested {} tool calls; only the first ({}) will run",
            first_response.tool_calls.len(),
            call.id
        );
    }

    let result = registry.execute(&call).await;
    if result.success {
        info!("Tool result: {} chars", result.output.len());
    } else {
        warn!("Tool error: {}", result.output);
    }

    let messages = [
        ChatMessage::human(followup_question),
        ChatMessage::from(first_response.clone()),
        ChatMessage::tool(result.tool_call_id.clone(), result.output.clone()),
    ];

    let second_response = model.chat(&messages, &[]).await?;

    Ok(ConversationOutcome {
        first_response,
        tool_result: Some(result),
        answer: second_response.text().to_string(),
    })
}
