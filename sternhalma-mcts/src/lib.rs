//! Monte Carlo tree search agent for the star board.
//!
//! Search is anytime: an agent builds a fresh tree per move, iterates
//! selection/expansion/simulation/backpropagation until its wall-clock
//! budget runs out, and answers with the most-visited root move. The
//! budget comes from the configured difficulty; a cancellation token can
//! stop a search early without losing the answer.

pub mod rollout;
pub mod search;
pub mod tree;

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sternhalma_core::{Board, Difficulty, GameConfig, Move, Player};

pub use search::{run_search, CancelToken, SearchStats};
pub use tree::{NodeId, SearchNode, SearchTree};

/// Wall-clock budget per move when no difficulty is configured
pub const DEFAULT_TIME_LIMIT_MS: u64 = 1_000;
/// UCB1 exploration constant
pub const EXPLORATION: f32 = 1.4;
/// Playout depth in plies
pub const ROLLOUT_DEPTH: u32 = 15;

// ============================================================================
// AGENT
// ============================================================================

/// Stateful search agent bound to one seat
#[derive(Clone, Debug)]
pub struct MctsAgent {
    player: Player,
    opponent: Player,
    config: GameConfig,
    time_limit_ms: u64,
    rng: ChaCha8Rng,
}

impl MctsAgent {
    pub fn new(player: Player, config: GameConfig) -> Self {
        Self::with_seed(player, config, 42)
    }

    pub fn with_seed(player: Player, config: GameConfig, seed: u64) -> Self {
        Self {
            player,
            opponent: player.opposite(),
            config,
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Agent whose budget matches a difficulty tier
    pub fn for_difficulty(player: Player, config: GameConfig, difficulty: Difficulty) -> Self {
        let mut agent = Self::new(player, config);
        agent.time_limit_ms = difficulty.time_limit_ms();
        agent
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn opponent(&self) -> Player {
        self.opponent
    }

    pub fn time_limit_ms(&self) -> u64 {
        self.time_limit_ms
    }

    pub fn set_time_limit(&mut self, time_limit_ms: u64) {
        self.time_limit_ms = time_limit_ms;
    }

    /// Redirect the evaluation's contrast seat (defaults to the opposite corner)
    pub fn set_opponent(&mut self, opponent: Player) {
        self.opponent = opponent;
    }

    /// Search for the best move within the configured budget
    pub fn best_move(&mut self, board: &Board) -> Option<Move> {
        self.best_move_cancellable(board, &CancelToken::new())
    }

    /// Search that a caller can interrupt from another thread
    pub fn best_move_cancellable(&mut self, board: &Board, cancel: &CancelToken) -> Option<Move> {
        let budget = Duration::from_millis(self.time_limit_ms);
        let (mv, _) = run_search(
            board,
            self.player,
            self.opponent,
            &self.config,
            budget,
            cancel,
            &mut self.rng,
        );
        mv
    }
}

// ============================================================================
// TESTS
// ============================================================================
