//! Self-play driver
//!
//! Plays whole games by feeding agent moves through the same select/commit
//! path an interactive caller would use. Seats without an agent fall back to
//! the greedy policy so a batch never stalls waiting for input.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use sternhalma_core::{Game, GameConfig, GreedyAgent, Player};

use crate::roster::AgentRoster;

/// How one game ended
#[derive(Clone, Copy, Debug)]
pub struct GameOutcome {
    pub winner: Option<Player>,
    pub turns: u32,
    pub moves: u32,
    pub stalemate: bool,
}

/// Aggregate over a batch of games
#[derive(Clone, Debug, Default)]
pub struct BatchOutcome {
    pub games: u32,
    pub wins: FxHashMap<Player, u32>,
    pub stalemates: u32,
    pub unfinished: u32,
    pub avg_turns: f64,
}

impl BatchOutcome {
    fn aggregate(outcomes: &[GameOutcome]) -> Self {
        let mut batch = BatchOutcome {
            games: outcomes.len() as u32,
            ..Default::default()
        };
        let mut total_turns = 0u64;
        for outcome in outcomes {
            total_turns += outcome.turns as u64;
            match outcome.winner {
                Some(player) => *batch.wins.entry(player).or_insert(0) += 1,
                None if outcome.stalemate => batch.stalemates += 1,
                None => batch.unfinished += 1,
            }
        }
        if batch.games > 0 {
            batch.avg_turns = total_turns as f64 / batch.games as f64;
        }
        batch
    }
}

/// Play one game to completion (or `max_turns`) with the given roster
pub fn run_game_with(game: &mut Game, roster: &mut AgentRoster, max_turns: u32) -> GameOutcome {
    let mut stand_ins: FxHashMap<Player, GreedyAgent> = FxHashMap::default();
    let mut turns = 0u32;
    let mut moves = 0u32;
    let mut stuck_streak = 0usize;
    let seats = game.config().active_players().len();

    while game.winner().is_none() && turns < max_turns {
        let player = game.current_player();
        let mv = if roster.is_ai_player(player) {
            roster.ai_move(game.board(), player)
        } else {
            stand_ins
                .entry(player)
                .or_insert_with(|| GreedyAgent::with_seed(player, turns as u64))
                .best_move(game.board())
        };
        turns += 1;

        match mv {
            Some(mv) => {
                if game.select_piece(mv.from) && game.move_piece(mv.to) {
                    moves += 1;
                    stuck_streak = 0;
                } else {
                    // an agent proposed an illegal move; treat it as stuck
                    tracing::warn!(?player, ?mv, "agent move rejected");
                    game.skip_turn();
                    stuck_streak += 1;
                }
            }
            None => {
                game.skip_turn();
                stuck_streak += 1;
            }
        }

        // every seat passed in a row: nobody can move
        if stuck_streak >= seats {
            return GameOutcome {
                winner: None,
                turns,
                moves,
                stalemate: true,
            };
        }
    }

    GameOutcome {
        winner: game.winner(),
        turns,
        moves,
        stalemate: false,
    }
}

/// Build a fresh game and roster from `config` and play it out
pub fn run_game(config: &GameConfig, max_turns: u32, seed: u64) -> anyhow::Result<GameOutcome> {
    let mut game = Game::new(config.clone())?;
    let mut roster = AgentRoster::with_seed(config.clone(), seed);
    let outcome = run_game_with(&mut game, &mut roster, max_turns);
    tracing::info!(
        winner = ?outcome.winner,
        turns = outcome.turns,
        stalemate = outcome.stalemate,
        "game finished"
    );
    Ok(outcome)
}

/// Sequential batch; game `i` plays with seed `seed + i`
pub fn run_batch(
    config: &GameConfig,
    games: u32,
    max_turns: u32,
    seed: u64,
) -> anyhow::Result<BatchOutcome> {
    let outcomes: Vec<GameOutcome> = (0..games)
        .map(|i| run_game(config, max_turns, seed.wrapping_add(i as u64)))
        .collect::<anyhow::Result<_>>()?;
    Ok(BatchOutcome::aggregate(&outcomes))
}

/// Batch spread across the rayon thread pool, one game per task
pub fn run_batch_parallel(
    config: &GameConfig,
    games: u32,
    max_turns: u32,
    seed: u64,
) -> anyhow::Result<BatchOutcome> {
    let outcomes: Vec<GameOutcome> = (0..games)
        .into_par_iter()
        .map(|i| run_game(config, max_turns, seed.wrapping_add(i as u64)))
        .collect::<anyhow::Result<_>>()?;
    Ok(BatchOutcome::aggregate(&outcomes))
}
