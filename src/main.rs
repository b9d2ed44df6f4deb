//! Statline — NBA stats Q&A over a single LLM tool call.
//!
//! Usage:
//!   statline ask [QUESTION]            Ask the model (default: Stephen Curry, 2016)
//!   statline lookup <PLAYER>           Run the stats tool directly
//!   statline schema                    Print the tool definitions

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use statline::agent;
use statline::config::{self, StatlineConfig, DEFAULT_FOLLOWUP, DEFAULT_QUESTION};
use statline::inference::InferenceClient;
use statline::stats::StatsClient;
use statline::tools::PlayerStatsTool;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "statline")]
#[command(version = "0.1.0")]
#[command(about = "Ask a hosted LLM about NBA player stats")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a statline.toml config file.
    #[arg(long)]
    config: Option<String>,

    /// Log level (debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask the model a question, letting it call the stats tool.
    Ask {
        /// The question. Defaults to Stephen Curry's 2016 season.
        question: Option<String>,

        /// Human turn replayed in the follow-up call (defaults to the question).
        #[arg(long)]
        followup: Option<String>,
    },

    /// Look up a player's season averages without involving the model.
    Lookup {
        /// Player name, e.g. "Stephen Curry".
        player: String,

        /// Season (defaults to the configured season).
        #[arg(long)]
        season: Option<u32>,
    },

    /// Print the tool definitions offered to the model.
    Schema,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = config::resolve(cli.config.as_deref())?;

    // Initialize logging
    let level = cli.log_level.as_deref().unwrap_or(&cfg.log_level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Ask { question, followup } => cmd_ask(&cfg, question, followup).await,
        Commands::Lookup { player, season } => cmd_lookup(&cfg, &player, season).await,
        Commands::Schema => cmd_schema(&cfg),
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

async fn cmd_ask(
    cfg: &StatlineConfig,
    question: Option<String>,
    followup: Option<String>,
) -> Result<()> {
    let (question, followup) = match (question, followup) {
        (Some(q), Some(f)) => (q, f),
        (Some(q), None) => (q.clone(), q),
        (None, f) => (
            DEFAULT_QUESTION.to_string(),
            f.unwrap_or_else(|| DEFAULT_FOLLOWUP.to_string()),
        ),
    };

    let model = InferenceClient::new(&cfg.inference_base_url, &cfg.inference_api_key, &cfg.model)
        .with_max_tokens(cfg.max_tokens);
    let registry = statline::default_registry(cfg);

    info!("Using model {}", model.model());

    let outcome = agent::run_conversation(&model, &registry, &question, &followup)
        .await
        .context("Conversation failed")?;

    println!("{} {}", "Content:".bold(), outcome.first_response.text());
    if outcome.first_response.tool_calls.is_empty() {
        println!("{} none", "Tool Calls:".bold());
        println!("\n{} {}", "Model answered directly:".green().bold(), outcome.answer);
    } else {
        println!("{}", "Tool Calls:".bold());
        for tc in &outcome.first_response.tool_calls {
            println!("  {}", tc);
        }
        println!();
        println!("{}", outcome.answer);
    }

    Ok(())
}

async fn cmd_lookup(cfg: &StatlineConfig, player: &str, season: Option<u32>) -> Result<()> {
    let tool = PlayerStatsTool::new(
        StatsClient::new(&cfg.stats_base_url, &cfg.stats_api_key),
        cfg.default_season,
    );
    let outcome = tool
        .lookup(player, season.unwrap_or(cfg.default_season))
        .await;
    println!("{}", outcome.to_tool_output());
    Ok(())
}

fn cmd_schema(cfg: &StatlineConfig) -> Result<()> {
    let defs = statline::default_registry(cfg).definitions();
    let json = serde_json::to_string_pretty(&defs).context("Failed to serialize tool definitions")?;
    println!("{}", json);
    Ok(())
}
