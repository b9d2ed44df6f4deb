//! BALLDONTLIE API client for player search and season averages.

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// BALLDONTLIE API client.
#[derive(Debug, Clone)]
pub struct StatsClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

// -- Response types -----------------------------------------------------------

/// List wrapper every endpoint responds with.
#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Player {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position: Option<String>,
    pub team: Team,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub full_name: String,
}

/// Per-game averages. Any stat may be null, e.g. steals and blocks for
/// seasons before they were tracked.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonAverage {
    #[serde(default)]
    pub pts: Option<f64>,
    #[serde(default)]
    pub reb: Option<f64>,
    #[serde(default)]
    pub ast: Option<f64>,
    #[serde(default)]
    pub stl: Option<f64>,
    #[serde(default)]
    pub blk: Option<f64>,
    #[serde(default)]
    pub min: Option<crate::types::Minutes>,
}

impl StatsClient {
    /// Create a new stats client. An empty `api_key` sends no
    /// Authorization header.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// First player matching `name`, if any.
    pub async fn search_player(&self, name: &str) -> Result<Option<Player>> {
        debug!("Player search: {}", name);
        let players: Vec<Player> = self
            .get_list("players", &[("search", name.to_string())])
            .await
            .context("Player search failed")?;
        Ok(players.into_iter().next())
    }

    /// First season-averages entry for `player_id` in `season`, if any.
    pub async fn season_average(&self, player_id: u64, season: u32) -> Result<Option<SeasonAverage>> {
        debug!("Season averages: player {} season {}", player_id, season);
        let averages: Vec<SeasonAverage> = self
            .get_list(
                "season_averages",
                &[
                    ("season", season.to_string()),
                    ("player_ids[]", player_id.to_string()),
                ],
            )
            .await
            .context("Season averages request failed")?;
        Ok(averages.into_iter().next())
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut req = self
            .http
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(query);
        // The provider expects the bare key, not a Bearer token.
        if !self.api_key.is_empty() {
            req = req.header(reqwest::header::AUTHORIZATION, self.api_key.as_str());
        }

        let resp = req
            .send()
            .await
            .with_context(|| format!("GET {} failed", endpoint))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("GET {} failed ({}): {}", endpoint, status, body);
        }

        let body: ListResponse<T> = resp
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", endpoint))?;
        Ok(body.data)
    }
}
