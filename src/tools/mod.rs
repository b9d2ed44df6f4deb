pub mod player_stats;
pub mod traits;

pub use player_stats::{PlayerStatsArgs, PlayerStatsTool};
pub use traits::{Tool, ToolDefinition};

use crate::types::{ToolCall, ToolResult};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Failures raised before a tool gets to run.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
}

impl ToolError {
    pub fn invalid(tool: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.to_string(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tool registry
// ---------------------------------------------------------------------------

/// Fixed table from tool name to implementation.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any previous tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Definitions to expose to the model, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Execute a tool call by name. Failures are reported in the result
    /// rather than returned, so they can be handed back to the model.
    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        let result = match self.get(&call.name) {
            Some(tool) => tool.execute(&call.arguments).await,
            None => Err(ToolError::UnknownTool(call.name.clone()).into()),
        };

        match result {
            Ok(output) => ToolResult {
                tool_call_id: call.id.clone(),
                output,
                success: true,
            },
            Err(e) => ToolResult {
                tool_call_id: call.id.clone(),
                output: format!("Error: {}", e),
                success: false,
            },
        }
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.tools.keys().collect();
        names.sort();
        f.debug_struct("ToolRegistry").field("tools", &names).finish()
    }
}
