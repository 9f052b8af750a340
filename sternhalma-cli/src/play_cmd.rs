//! Play command - one full game of agent self-play

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use sternhalma_agents::{run_game_with, AgentRoster, GameOutcome};
use sternhalma_core::{AgentKind, Difficulty, Game, GameConfig};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Game configuration JSON file (overrides --players)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Player count for the standard preset (2, 3, 4 or 6)
    #[arg(long, default_value = "2")]
    pub players: u8,

    /// Use the search agent instead of greedy for every seat
    #[arg(long)]
    pub mcts: bool,

    /// Search difficulty (easy, medium, hard) when using --mcts
    #[arg(long, value_enum)]
    pub difficulty: Option<CliDifficulty>,

    /// Maximum turns before the game is called unfinished
    #[arg(long, default_value = "400")]
    pub max_turns: u32,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the final board state (flat JSON) to this file
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum CliDifficulty {
    Easy,
    Medium,
    Hard,
}

impl From<CliDifficulty> for Difficulty {
    fn from(value: CliDifficulty) -> Self {
        match value {
            CliDifficulty::Easy => Difficulty::Easy,
            CliDifficulty::Medium => Difficulty::Medium,
            CliDifficulty::Hard => Difficulty::Hard,
        }
    }
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = load_config(&args)?;

    tracing::info!(
        players = config.active_players().len(),
        mcts = args.mcts,
        "starting game"
    );

    let mut game = Game::new(config.clone())?;
    let mut roster = AgentRoster::with_seed(config, seed.unwrap_or(42));
    let outcome = run_game_with(&mut game, &mut roster, args.max_turns);

    if let Some(path) = &args.export {
        let state = game.export_state();
        std::fs::write(path, state)
            .with_context(|| format!("failed to write state to {}", path.display()))?;
    }

    report_outcome(&outcome, &args);
    Ok(())
}

// ============================================================================
// PHASES
// ============================================================================

/// Resolve the configuration: an explicit file wins over the preset.
/// Every seat is marked AI so the runner drives the whole game.
fn load_config(args: &PlayArgs) -> Result<GameConfig> {
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

fn report_outcome(outcome: &GameOutcome, args: &PlayArgs) {
    if args.json {
        print_json_outcome(outcome);
    } else {
        print_text_outcome(outcome);
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn print_json_outcome(outcome: &GameOutcome) {
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct JsonOutcome {
        winner: Option<String>,
        turns: u32,
        moves: u32,
        stalemate: bool,
    }

    let output = JsonOutcome {
        winner: outcome.winner.map(|p| format!("{p:?}").to_lowercase()),
        turns: outcome.turns,
        moves: outcome.moves,
        stalemate: outcome.stalemate,
    };
    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_outcome(outcome: &GameOutcome) {
    println!("\n=== Game Result ===");
    match outcome.winner {
        Some(player) => println!("Winner:    {:?}", player),
        None if outcome.stalemate => println!("Winner:    none (stalemate)"),
        None => println!("Winner:    none (turn limit reached)"),
    }
    println!("Turns:     {}", outcome.turns);
    println!("Moves:     {}", outcome.moves);
}

// ============================================================================
// TESTS
// ============================================================================
