//! Flat textual export/import of board occupancy and the turn
//!
//! The wire shape is `{ "currentPlayer": ..., "board": [{ q, r, s, player },
//! ...] }` with one tuple per cell. Import is all-or-nothing: every tuple is
//! validated against the live topology before any occupant changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{HexCoord, Player};
use crate::game::Game;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateRecord {
    current_player: Player,
    board: Vec<CellRecord>,
}

#[derive(Serialize, Deserialize)]
struct CellRecord {
    q: i8,
    r: i8,
    s: i8,
    player: Option<Player>,
}

/// Why an import was rejected; the state is untouched in every case
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("malformed state record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("player {0:?} is not active in this session")]
    InactivePlayer(Player),
    #[error("coordinate ({q}, {r}, {s}) is not a board cell")]
    UnknownCell { q: i8, r: i8, s: i8 },
}

impl Game {
    /// Serialize the turn and every cell's occupant, in sorted cell order
    pub fn export_state(&self) -> String {
        let board = self
            .board()
            .topology()
            .cells()
            .iter()
            .map(|&coord| CellRecord {
                q: coord.q,
                r: coord.r,
                s: coord.s(),
                player: self.board().occupant(coord),
            })
            .collect();
        let record = StateRecord {
            current_player: self.current_player(),
            board,
        };
        serde_json::to_string(&record).expect("state record serializes")
    }

    /// Replace occupancy and the current player from an exported record.
    ///
    /// Validates the whole record first; on any failure nothing is mutated.
    /// Selection, cached moves and any winner are cleared on success.
    pub fn import_state(&mut self, data: &str) -> Result<(), ImportError> {
        let record: StateRecord = serde_json::from_str(data)?;

        if !self.config().is_active(record.current_player) {
            return Err(ImportError::InactivePlayer(record.current_player));
        }

        let mut staged = Vec::with_capacity(record.board.len());
        for cell in &record.board {
            let coord = HexCoord::new(cell.q, cell.r);
            if cell.s != coord.s() || !self.board().contains(coord) {
                return Err(ImportError::UnknownCell {
                    q: cell.q,
                    r: cell.r,
                    s: cell.s,
                });
            }
            staged.push((coord, cell.player));
        }

        let board = self.board_mut();
        board.clear_all();
        for (coord, occupant) in staged {
            if let Some(player) = occupant {
                board.place(coord, player);
            }
        }
        self.restore_turn(record.current_player);
        Ok(())
    }
}
