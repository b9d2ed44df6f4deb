//! `get_player_stats`: NBA season averages from BALLDONTLIE.

use super::{Tool, ToolError};
use crate::stats::StatsClient;
use crate::types::{LookupOutcome, PlayerStatRecord};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, info};

pub const NAME: &str = "get_player_stats";

/// Validated arguments for a stats lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStatsArgs {
    pub player_name: String,
    pub season: u32,
}

impl PlayerStatsArgs {
    /// Validate the model's loosely-typed argument map. `season` may be
    /// omitted, or given as an integer or a whole float like `2016.0`.
    pub fn parse(args: &Value, default_season: u32) -> Result<Self, ToolError> {
        let player_name = args["player_name"]
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ToolError::invalid(NAME, "missing 'player_name' argument"))?;

        let season = match &args["season"] {
            Value::Null => default_season,
            v => v
                .as_u64()
                .or_else(|| {
                    v.as_f64()
                        .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                        .map(|f| f as u64)
                })
                .and_then(|s| u32::try_from(s).ok())
                .ok_or_else(|| {
                    ToolError::invalid(NAME, format!("'season' must be a whole number, got {}", v))
                })?,
        };

        Ok(Self {
            player_name: player_name.to_string(),
            season,
        })
    }
}

/// Looks up a player's per-game averages for a season.
#[derive(Debug, Clone)]
pub struct PlayerStatsTool {
    client: StatsClient,
    default_season: u32,
}

impl PlayerStatsTool {
    pub fn new(client: StatsClient, default_season: u32) -> Self {
        Self {
            client,
            default_season,
        }
    }

    /// Resolve the player, then their averages. Never fails: transport and
    /// decoding problems are logged and reported as `LookupOutcome::Failed`.
    pub async fn lookup(&self, player_name: &str, season: u32) -> LookupOutcome {
        info!("Player stats for {} in the {} Season", player_name, season);

        match self.try_lookup(player_name, season).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Stats lookup failed: {:#}", e);
                LookupOutcome::Failed
            }
        }
    }

    async fn try_lookup(&self, player_name: &str, season: u32) -> Result<LookupOutcome> {
        let Some(player) = self.client.search_player(player_name).await? else {
            return Ok(LookupOutcome::PlayerNotFound);
        };

        let Some(stats) = self.client.season_average(player.id, season).await? else {
            return Ok(LookupOutcome::NoStats {
                player: player.full_name(),
                season,
            });
        };

        let name = player.full_name();
        let position = player
            .position
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "N/A".to_string());

        Ok(LookupOutcome::Found(PlayerStatRecord {
            name,
            team: player.team.full_name,
            position,
            season,
            points_per_game: stats.pts,
            rebounds_per_game: stats.reb,
            assists_per_game: stats.ast,
            steals_per_game: stats.stl,
            blocks_per_game: stats.blk,
            minutes_per_game: stats.min,
        }))
    }
}

#[async_trait]
impl Tool for PlayerStatsTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Gets stats for NBA players for the 2016 season."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "player_name": {
                    "type": "string",
                    "description": "Full name of NBA player"
                },
                "season": {
                    "type": "number",
                    "description": "NBA Season"
                }
            },
            "required": ["player_name"]
        })
    }

    async fn execute(&self, args: &Value) -> Result<String> {
        let args = PlayerStatsArgs::parse(args, self.default_season)?;
        Ok(self
            .lookup(&args.player_name, args.season)
            .await
            .to_tool_output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_defaults_when_absent() {
        let args = PlayerStatsArgs::parse(&json!({"player_name": "Stephen Curry"}), 2016).unwrap();
        assert_eq!(args.season, 2016);
        assert_eq!(args.player_name, "Stephen Curry");
    }

    #[test]
    fn season_accepts_whole_floats() {
        let args =
            PlayerStatsArgs::parse(&json!({"player_name": "Kevin Durant", "season": 2014.0}), 2016)
                .unwrap();
        assert_eq!(args.season, 2014);
    }

    #[test]
    fn rejects_missing_name_and_fractional_season() {
        assert!(matches!(
            PlayerStatsArgs::parse(&json!({"season": 2016}), 2016),
            Err(ToolError::InvalidArguments { .. })
        ));
        assert!(PlayerStatsArgs::parse(&json!({"player_name": "  "}), 2016).is_err());
        assert!(
            PlayerStatsArgs::parse(&json!({"player_name": "X", "season": 2016.5}), 2016).is_err()
        );
        assert!(
            PlayerStatsArgs::parse(&json!({"player_name": "X", "season": "2016"}), 2016).is_err()
        );
    }

    #[test]
    fn schema_requires_player_name_only() {
        let tool = PlayerStatsTool::new(StatsClient::new("http://localhost", ""), 2016);
        let def = tool.definition();
        assert_eq!(def.name, "get_player_stats");
        assert_eq!(def.parameters["required"], json!(["player_name"]));
        assert_eq!(def.parameters["properties"]["season"]["type"], "number");
    }
}
