//! Legal move discovery: adjacent steps and chained jumps
//!
//! Jump exploration is an explicit worklist traversal with an owned visited
//! set rather than recursion; the board is finite and no coordinate is
//! expanded twice, so it always terminates.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{Board, HexCoord, Player, DIRECTIONS};

/// A committed or candidate move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: HexCoord,
    pub to: HexCoord,
}

/// Cells scanned outward per direction when probing for a piece to jump.
/// Half the longest board axis: a landing twice as far out would fall off.
const JUMP_SCAN: i8 = 8;

/// All legal destinations for the piece at `origin`.
/// Callers must treat the result as an unordered set.
pub fn legal_destinations(board: &Board, origin: HexCoord) -> FxHashSet<HexCoord> {
    let mut dests = FxHashSet::default();
    if board.occupant(origin).is_none() {
        return dests;
    }

    // Adjacent steps
    for &neighbor in board.neighbors(origin) {
        if board.occupant(neighbor).is_none() {
            dests.insert(neighbor);
        }
    }

    // Chained jumps
    let mut visited = FxHashSet::default();
    visited.insert(origin);
    let mut frontier = vec![origin];
    while let Some(current) = frontier.pop() {
        for &(dq, dr) in &DIRECTIONS {
            let Some(landing) = probe_jump(board, origin, current, dq, dr) else {
                continue;
            };
            if visited.insert(landing) {
                dests.insert(landing);
                frontier.push(landing);
            }
        }
    }

    dests
}

/// Probe one direction from `current` for a jump landing.
///
/// The first occupied cell along the ray is the pivot; the landing mirrors
/// `current` across it at the same travelled distance. A pivot at distance 1
/// is the classic adjacent jump; further pivots are long jumps over a gap.
/// Every cell from the pivot to the landing must be on the board and clear,
/// except that `origin` counts as empty: the moving piece has vacated it.
fn probe_jump(
    board: &Board,
    origin: HexCoord,
    current: HexCoord,
    dq: i8,
    dr: i8,
) -> Option<HexCoord> {
    let mut pivot_step = None;
    for step in 1..=JUMP_SCAN {
        let cell = current.translate(dq * step, dr * step);
        if !board.contains(cell) {
            // ran off the star before meeting a piece
            return None;
        }
        if board.occupant(cell).is_some() {
            pivot_step = Some(step);
            break;
        }
    }
    let k = pivot_step?;

    let landing = current.translate(dq * 2 * k, dr * 2 * k);
    for step in (k + 1)..=(2 * k) {
        let cell = current.translate(dq * step, dr * step);
        if !board.contains(cell) {
            return None;
        }
        if cell == origin {
            continue;
        }
        if board.occupant(cell).is_some() {
            return None;
        }
    }
    Some(landing)
}

/// Every legal move for every piece `player` owns
pub fn legal_moves_for(board: &Board, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();
    for from in board.pieces_of(player) {
        for to in legal_destinations(board, from) {
            moves.push(Move { from, to });
        }
    }
    moves
}
