//! Configuration schema for statline.toml.

use serde::{Deserialize, Serialize};

/// Question asked when none is given on the command line.
pub const DEFAULT_QUESTION: &str = "What is Stephen Curry's stats for the 2016 NBA season";

/// Human turn replayed in the follow-up call for the default question.
pub const DEFAULT_FOLLOWUP: &str = "What is Steph Curry's stats for the 2016 NBA season";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatlineConfig {
    /// OpenAI-compatible inference API base URL.
    pub inference_base_url: String,

    /// Inference API key (bearer).
    pub inference_api_key: String,

    /// Model name sent with every request.
    pub model: String,

    /// Maximum completion tokens per model call.
    pub max_tokens: u32,

    /// BALLDONTLIE API base URL.
    pub stats_base_url: String,

    /// BALLDONTLIE API key. Empty means no Authorization header is sent.
    pub stats_api_key: String,

    /// Season used when the model omits one.
    pub default_season: u32,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for StatlineConfig {
    fn default() -> Self {
        Self {
            inference_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".into(),
            inference_api_key: String::new(),
            model: "gemini-2.0-flash".into(),
            max_tokens: 1024,
            stats_base_url: "https://api.balldontlie.io/v1".into(),
            stats_api_key: String::new(),
            default_season: 2016,
            log_level: "info".into(),
        }
    }
}

impl StatlineConfig {
    /// Overlay values taken from an environment lookup.
    ///
    /// Takes the lookup as a closure so tests don't have to touch the
    /// process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("BALLDONTLIE_API_KEY") {
            self.stats_api_key = key;
        }
        if let Some(key) = get("GOOGLE_API_KEY").or_else(|| get("GEMINI_API_KEY")) {
            self.inference_api_key = key;
        }
        if let Some(model) = get("STATLINE_MODEL") {
            self.model = model;
        }
        if let Some(url) = get("STATLINE_INFERENCE_URL") {
            self.inference_base_url = url;
        }
        if let Some(url) = get("STATLINE_STATS_URL") {
            self.stats_base_url = url;
        }
    }
}
