//! Rollout (simulation) policy
//!
//! Playouts are semi-greedy: the searching agent picks its locally best move
//! by the shared evaluation function, every other seat plays uniformly at
//! random. Depth is capped, so a playout estimates progress rather than
//! playing to a finished game.

use rand::prelude::*;

use sternhalma_core::eval::evaluate;
use sternhalma_core::{legal_moves_for, Board, Move, Player};

/// Play out up to `depth` plies from `board` and score the final position
/// for `agent`. Turns cycle through `active` in config order starting at the
/// agent's seat; the playout stops early when the player to move is stuck.
pub fn simulate<R: Rng>(
    board: &Board,
    agent: Player,
    opponent: Player,
    active: &[Player],
    depth: u32,
    rng: &mut R,
) -> f32 {
    let mut board = board.clone();
    let mut index = active.iter().position(|&p| p == agent).unwrap_or(0);

    for _ in 0..depth {
        let mover = active[index];
        let moves = legal_moves_for(&board, mover);
        if moves.is_empty() {
            break;
        }
        let mv = if mover == agent {
            best_by_eval(&board, &moves, agent, opponent)
        } else {
            moves[rng.gen_range(0..moves.len())]
        };
        board.apply(mv);
        index = (index + 1) % active.len();
    }

    evaluate(&board, agent, opponent)
}

/// Argmax of the evaluation over candidate moves, applied to board clones
fn best_by_eval(board: &Board, moves: &[Move], agent: Player, opponent: Player) -> Move {
    let mut best = moves[0];
    let mut best_score = f32::NEG_INFINITY;
    for &mv in moves {
        let score = evaluate(&board.with_move(mv), agent, opponent);
        if score > best_score {
            best_score = score;
            best = mv;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sternhalma_core::{GameConfig, HexCoord};

    #[test]
    fn test_simulate_returns_finite_score() {
        let config = GameConfig::standard(2).unwrap();
        let board = Board::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let score = simulate(
            &board,
            Player::Red,
            Player::Yellow,
            config.active_players(),
            15,
            &mut rng,
        );
        assert!(score.is_finite());
    }

    #[test]
    fn test_simulate_never_mutates_input() {
        let config = GameConfig::standard(2).unwrap();
        let board = Board::new(&config);
        let before: Vec<_> = board.pieces_of(Player::Red).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let _ = simulate(
            &board,
            Player::Red,
            Player::Yellow,
            config.active_players(),
            15,
            &mut rng,
        );
        let after: Vec<_> = board.pieces_of(Player::Red).collect();
        assert_eq!(before.len(), after.len());
        for coord in before {
            assert_eq!(board.occupant(coord), Some(Player::Red));
            assert!(after.contains(&coord));
        }
    }

    #[test]
    fn test_stuck_playout_stops_early() {
        // no pieces at all: the first player to move is stuck immediately
        let board = Board::blank();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let score = simulate(
            &board,
            Player::Red,
            Player::Yellow,
            &[Player::Red, Player::Yellow],
            1000,
            &mut rng,
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_best_by_eval_moves_toward_goal() {
        let mut board = Board::blank();
        board.place(HexCoord::new(0, 0), Player::Red);
        let moves = legal_moves_for(&board, Player::Red);
        let chosen = best_by_eval(&board, &moves, Player::Red, Player::Yellow);
        let goal = sternhalma_core::eval::goal_center(Player::Red);
        // the chosen step strictly reduces the goal distance
        assert!(chosen.to.distance_to(goal) < chosen.from.distance_to(goal));
    }
}
