//! Goal-distance evaluation shared by the agents

use crate::board::{Board, HexCoord, Player};
use crate::moves::Move;

/// Representative coordinate of a player's goal: the apex of the opposite
/// corner triangle
pub fn goal_center(player: Player) -> HexCoord {
    player.opposite().corner_apex()
}

/// Sum of a player's piece distances to their goal center
pub fn goal_distance(board: &Board, player: Player) -> i32 {
    let goal = goal_center(player);
    board
        .pieces_of(player)
        .map(|coord| coord.distance_to(goal) as i32)
        .sum()
}

/// Position value for `player`; higher is better.
/// The opponent term is half-weighted so the agent favors its own progress.
pub fn evaluate(board: &Board, player: Player, opponent: Player) -> f32 {
    -(goal_distance(board, player) as f32) + 0.5 * goal_distance(board, opponent) as f32
}

/// Reduction in goal distance a move produces for `player`
pub fn forward_progress(mv: Move, player: Player) -> i32 {
    let goal = goal_center(player);
    mv.from.distance_to(goal) as i32 - mv.to.distance_to(goal) as i32
}
