//! Shared types used across the statline runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Conversation types
// ---------------------------------------------------------------------------

/// A message in the conversation sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatMessage {
    /// Authored by the person asking the question.
    Human { content: String },
    /// Produced by the model, possibly requesting tool invocations.
    Assistant {
        content: Option<String>,
        tool_calls: Vec<ToolCall>,
    },
    /// Output of a tool, correlated to the request it answers.
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl ChatMessage {
    pub fn human(content: impl Into<String>) -> Self {
        Self::Human {
            content: content.into(),
        }
    }

    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Tool {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }
}

impl From<InferenceResponse> for ChatMessage {
    fn from(resp: InferenceResponse) -> Self {
        Self::Assistant {
            content: resp.content,
            tool_calls: resp.tool_calls,
        }
    }
}

/// A tool call request from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

impl fmt::Display for ToolCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) [{}]", self.name, self.arguments, self.id)
    }
}

/// Result of executing a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub output: String,
    pub success: bool,
}

/// Response from inference including potential tool calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InferenceResponse {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
    pub usage: TokenUsage,
}

impl InferenceResponse {
    /// Text content, empty when the model only requested tools.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Token usage from an inference call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ---------------------------------------------------------------------------
// Player statistics
// ---------------------------------------------------------------------------

/// Minutes per game as reported by the provider: a plain number or a
/// clock string such as `"34:12"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Minutes {
    Number(f64),
    Clock(String),
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Clock(s) => write!(f, "{}", s),
        }
    }
}

/// Normalized per-game averages for one player in one season. Stats the
/// provider reported as null stay `None` and serialize back as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatRecord {
    pub name: String,
    pub team: String,
    pub position: String,
    pub season: u32,
    pub points_per_game: Option<f64>,
    pub rebounds_per_game: Option<f64>,
    pub assists_per_game: Option<f64>,
    pub steals_per_game: Option<f64>,
    pub blocks_per_game: Option<f64>,
    pub minutes_per_game: Option<Minutes>,
}

fn stat<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".into(),
    }
}

/// What a stats lookup produced. Only `Found` carries data; the others are
/// terminal text answers.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(PlayerStatRecord),
    PlayerNotFound,
    NoStats { player: String, season: u32 },
    Failed,
}

impl LookupOutcome {
    /// Text form handed back to the model.
    pub fn to_tool_output(&self) -> String {
        match self {
            // A record of strings and numbers always serializes.
            Self::Found(record) => serde_json::to_string(record).unwrap_or_else(|_| "Error".into()),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(r) => write!(
                f,
                "{} ({}, {}) {}: {} pts, {} reb, {} ast, {} stl, {} blk, {} min",
                r.name,
                r.team,
                r.position,
                r.season,
                stat(&r.points_per_game),
                stat(&r.rebounds_per_game),
                stat(&r.assists_per_game),
                stat(&r.steals_per_game),
                stat(&r.blocks_per_game),
                stat(&r.minutes_per_game),
            ),
            Self::PlayerNotFound => write!(f, "Player not found."),
            Self::NoStats { player, season } => {
                write!(f, "No stats for {} in season {}.", player, season)
            }
            Self::Failed => write!(f, "Error"),
        }
    }
}
