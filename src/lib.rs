//! Statline — ask a hosted LLM about NBA player stats.
//!
//! One question, one optional tool call against the BALLDONTLIE API,
//! one follow-up turn for the final answer.

pub mod agent;
pub mod config;
pub mod inference;
pub mod stats;
pub mod tools;
pub mod types;

use std::sync::Arc;

/// Registry holding every tool the model may call.
pub fn default_registry(config: &config::StatlineConfig) -> tools::ToolRegistry {
    let stats = stats::StatsClient::new(&config.stats_base_url, &config.stats_api_key);
    tools::ToolRegistry::new().with_tool(Arc::new(tools::PlayerStatsTool::new(
        stats,
        config.default_season,
    )))
}
