//! One-ply greedy agent
//!
//! Scores every legal move by forward progress toward the goal corner and
//! keeps the best. No search, no time budget, no state between calls beyond
//! the tie-breaking RNG.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Player};
use crate::eval::{forward_progress, goal_center};
use crate::moves::{legal_moves_for, Move};

pub struct GreedyAgent {
    player: Player,
    rng: ChaCha8Rng,
}

impl GreedyAgent {
    pub fn new(player: Player) -> Self {
        Self::with_seed(player, 42)
    }

    pub fn with_seed(player: Player, seed: u64) -> Self {
        Self {
            player,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Maximum-progress move; ties broken by the smaller resulting goal
    /// distance, then uniformly at random
    pub fn best_move(&mut self, board: &Board) -> Option<Move> {
        let goal = goal_center(self.player);
        let mut best: Vec<Move> = Vec::new();
        let mut best_key = (i32::MIN, i32::MIN);

        for mv in legal_moves_for(board, self.player) {
            let progress = forward_progress(mv, self.player);
            let to_dist = mv.to.distance_to(goal) as i32;
            let key = (progress, -to_dist);
            if key > best_key {
                best_key = key;
                best.clear();
                best.push(mv);
            } else if key == best_key {
                best.push(mv);
            }
        }

        best.choose(&mut self.rng).copied()
    }
}
