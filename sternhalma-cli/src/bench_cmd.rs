//! Bench command - agent self-play batches with aggregate statistics

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use sternhalma_agents::{run_batch, run_batch_parallel, BatchOutcome};
use sternhalma_core::{AgentKind, Difficulty, GameConfig, Player};

use crate::play_cmd::CliDifficulty;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct BenchArgs {
    /// Game configuration JSON file (overrides --players)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Player count for the standard preset (2, 3, 4 or 6)
    #[arg(long, default_value = "2")]
    pub players: u8,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: u32,

    /// Use the search agent instead of greedy for every seat
    #[arg(long)]
    pub mcts: bool,

    /// Search difficulty (easy, medium, hard) when using --mcts
    #[arg(long, value_enum)]
    pub difficulty: Option<CliDifficulty>,

    /// Maximum turns per game
    #[arg(long, default_value = "400")]
    pub max_turns: u32,

    /// Spread games across the thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: BenchArgs, seed: Option<u64>) -> Result<()> {
    let config = load_config(&args)?;
    let seed = seed.unwrap_or(42);

    tracing::info!(
        games = args.games,
        players = config.active_players().len(),
        parallel = args.parallel,
        "starting batch"
    );

    let batch = if args.parallel {
        run_batch_parallel(&config, args.games, args.max_turns, seed)?
    } else {
        run_batch(&config, args.games, args.max_turns, seed)?
    };

    report_batch(&batch, &args);
    Ok(())
}

// ============================================================================
// PHASES
// ============================================================================

fn load_config(args: &BenchArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => GameConfig::standard(args.players)?,
    };

    if args.config.is_none() {
        let kind = if args.mcts {
            AgentKind::Mcts
        } else {
            AgentKind::Greedy
        };
        let difficulty = args.difficulty.map(Difficulty::from);
        for player in config.active_players().to_vec() {
            config = config.with_ai(player, kind, difficulty);
        }
    }
    Ok(config)
}

fn report_batch(batch: &BatchOutcome, args: &BenchArgs) {
    if args.json {
        print_json_batch(batch);
    } else {
        print_text_batch(batch);
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn print_json_batch(batch: &BatchOutcome) {
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct JsonBatch {
        games: u32,
        wins: Vec<(String, u32)>,
        stalemates: u32,
        unfinished: u32,
        avg_turns: f64,
    }

    let mut wins: Vec<(String, u32)> = batch
        .wins
        .iter()
        .map(|(&p, &n)| (format!("{p:?}").to_lowercase(), n))
        .collect();
    wins.sort();

    let output = JsonBatch {
        games: batch.games,
        wins,
        stalemates: batch.stalemates,
        unfinished: batch.unfinished,
        avg_turns: batch.avg_turns,
    };
    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_batch(batch: &BatchOutcome) {
    println!("\n=== Batch Results ===");
    println!("Total games: {}", batch.games);
    for player in Player::ALL {
        if let Some(&wins) = batch.wins.get(&player) {
            println!(
                "{:?} wins:   {} ({:.1}%)",
                player,
                wins,
                wins as f64 / batch.games as f64 * 100.0
            );
        }
    }
    println!("Stalemates:  {}", batch.stalemates);
    println!("Unfinished:  {}", batch.unfinished);
    println!("Avg turns:   {:.1}", batch.avg_turns);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args() -> BenchArgs {
        BenchArgs {
            config: None,
            players: 2,
            games: 2,
            mcts: false,
            difficulty: None,
            max_turns: 400,
            parallel: false,
            json: false,
        }
    }

    #[test]
    fn test_small_batch_completes() {
        let config = load_config(&default_args()).unwrap();
        let batch = run_batch(&config, 2, 400, 7).unwrap();
        assert_eq!(batch.games, 2);
        let wins: u32 = batch.wins.values().sum();
        assert_eq!(wins + batch.stalemates + batch.unfinished, 2);
    }

    #[test]
    fn test_preset_respects_player_count() {
        let mut args = default_args();
        args.players = 6;
        let config = load_config(&args).unwrap();
        assert_eq!(config.active_players().len(), 6);
    }
}
