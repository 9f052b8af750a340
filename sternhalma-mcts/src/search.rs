//! Time-boxed search loop
//!
//! One full iteration (selection, expansion, simulation, backpropagation)
//! runs per pass of a busy loop that checks wall-clock time, so a search may
//! overshoot its budget by up to one iteration. A cancellation token is
//! checked on the same cadence; a cancelled search still returns the best
//! move found so far.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;

use sternhalma_core::{Board, GameConfig, Move, Player};

use crate::rollout::simulate;
use crate::tree::SearchTree;
use crate::{EXPLORATION, ROLLOUT_DEPTH};

/// Cooperative cancellation signal, shareable with a worker thread
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What a finished search looked like, for logging and benches
#[derive(Clone, Copy, Debug)]
pub struct SearchStats {
    pub simulations: u32,
    pub tree_size: usize,
    pub elapsed: Duration,
}

/// Run a full search and return the chosen move with its statistics.
/// None only when the agent has no legal move at all.
pub fn run_search<R: Rng>(
    board: &Board,
    player: Player,
    opponent: Player,
    config: &GameConfig,
    budget: Duration,
    cancel: &CancelToken,
    rng: &mut R,
) -> (Option<Move>, SearchStats) {
    let start = Instant::now();
    let mut tree = SearchTree::new(board.clone(), player);

    while start.elapsed() < budget && !cancel.is_cancelled() {
        // Selection
        let leaf = tree.select_leaf(EXPLORATION);

        // Expansion
        let node = match tree.expand(leaf, rng) {
            Some(child) => child,
            None => leaf,
        };

        // Simulation
        let value = simulate(
            &tree.get(node).board,
            player,
            opponent,
            config.active_players(),
            ROLLOUT_DEPTH,
            rng,
        );

        // Backpropagation
        tree.backpropagate(node, value > 0.0);
    }

    let stats = SearchStats {
        simulations: tree.total_simulations(),
        tree_size: tree.len(),
        elapsed: start.elapsed(),
    };
    tracing::debug!(
        player = ?player,
        simulations = stats.simulations,
        tree_size = stats.tree_size,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "search finished"
    );

    let mv = tree.best_move().or_else(|| tree.random_untried_root(rng));
    (mv, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sternhalma_core::{legal_destinations, HexCoord};

    fn search_setup() -> (Board, GameConfig) {
        let config = GameConfig::standard(2).unwrap();
        let board = Board::new(&config);
        (board, config)
    }

    #[test]
    fn test_search_returns_legal_move() {
        let (board, config) = search_setup();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let token = CancelToken::new();
        let (mv, stats) = run_search(
            &board,
            Player::Red,
            Player::Yellow,
            &config,
            Duration::from_millis(50),
            &token,
            &mut rng,
        );
        let mv = mv.unwrap();
        assert_eq!(board.occupant(mv.from), Some(Player::Red));
        assert!(legal_destinations(&board, mv.from).contains(&mv.to));
        assert!(stats.simulations > 0);
    }

    #[test]
    fn test_search_never_mutates_live_board() {
        let (board, config) = search_setup();
        let snapshot: Vec<_> = board
            .topology()
            .cells()
            .iter()
            .map(|&c| board.occupant(c))
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let _ = run_search(
            &board,
            Player::Red,
            Player::Yellow,
            &config,
            Duration::from_millis(20),
            &CancelToken::new(),
            &mut rng,
        );
        let after: Vec<_> = board
            .topology()
            .cells()
            .iter()
            .map(|&c| board.occupant(c))
            .collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn test_lone_piece_search_with_small_budget() {
        let mut board = Board::blank();
        let apex = HexCoord::new(4, 4);
        board.place(apex, Player::Red);
        board.place(HexCoord::new(4, 3), Player::Yellow);
        let expected = legal_destinations(&board, apex);

        let config = GameConfig::standard(2).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (mv, _) = run_search(
            &board,
            Player::Red,
            Player::Yellow,
            &config,
            Duration::from_millis(100),
            &CancelToken::new(),
            &mut rng,
        );
        let mv = mv.unwrap();
        assert_eq!(mv.from, apex);
        assert!(expected.contains(&mv.to));
    }

    #[test]
    fn test_cancelled_search_still_answers() {
        let (board, config) = search_setup();
        let token = CancelToken::new();
        token.cancel();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (mv, stats) = run_search(
            &board,
            Player::Red,
            Player::Yellow,
            &config,
            Duration::from_secs(60),
            &token,
            &mut rng,
        );
        // zero iterations ran; the untried-root fallback still produces a move
        assert_eq!(stats.simulations, 0);
        assert!(mv.is_some());
    }

    #[test]
    fn test_no_pieces_means_no_move() {
        let config = GameConfig::standard(2).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (mv, _) = run_search(
            &Board::blank(),
            Player::Red,
            Player::Yellow,
            &config,
            Duration::from_millis(10),
            &CancelToken::new(),
            &mut rng,
        );
        assert_eq!(mv, None);
    }
}
