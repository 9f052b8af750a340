//! Game state machine: selection, move commit, turn rotation, win detection

use rustc_hash::FxHashSet;

use crate::board::{Board, HexCoord, Player};
use crate::config::{ConfigError, GameConfig};
use crate::moves::{legal_destinations, Move};

/// A single in-memory session.
///
/// Two states: idle (no selection) and selected (origin chosen, legal
/// destinations cached). Committing a move or deselecting returns to idle.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    config: GameConfig,
    current_index: usize,
    selected: Option<HexCoord>,
    valid_moves: FxHashSet<HexCoord>,
    winner: Option<Player>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(&config);
        Ok(Self {
            board,
            config,
            current_index: 0,
            selected: None,
            valid_moves: FxHashSet::default(),
            winner: None,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_player(&self) -> Player {
        self.config.active_players()[self.current_index]
    }

    pub fn selected(&self) -> Option<HexCoord> {
        self.selected
    }

    pub fn valid_moves(&self) -> &FxHashSet<HexCoord> {
        &self.valid_moves
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Select the piece at `coord` and cache its legal destinations.
    /// Fails (without mutating) unless the cell holds the current player's
    /// piece and the game is still running.
    pub fn select_piece(&mut self, coord: HexCoord) -> bool {
        if self.winner.is_some() {
            return false;
        }
        if self.board.occupant(coord) != Some(self.current_player()) {
            return false;
        }
        self.valid_moves = legal_destinations(&self.board, coord);
        self.selected = Some(coord);
        true
    }

    /// Commit the selected piece to `dest`.
    ///
    /// Selection and the cached destinations are cleared on both success and
    /// failure, so a rejected destination always drops back to idle.
    pub fn move_piece(&mut self, dest: HexCoord) -> bool {
        let selected = self.selected.take();
        let moved = match selected {
            Some(from) if self.winner.is_none() && self.valid_moves.contains(&dest) => {
                let mover = self.current_player();
                self.board.apply(Move { from, to: dest });
                if self.has_won(mover) {
                    self.winner = Some(mover);
                } else {
                    self.current_index =
                        (self.current_index + 1) % self.config.active_players().len();
                }
                true
            }
            _ => false,
        };
        self.valid_moves.clear();
        moved
    }

    /// Drop any selection unconditionally
    pub fn deselect_piece(&mut self) {
        self.selected = None;
        self.valid_moves.clear();
    }

    /// Pass the turn without moving. The machine never passes on its own;
    /// callers invoke this when the player to move has no legal move.
    pub fn skip_turn(&mut self) {
        if self.winner.is_some() {
            return;
        }
        self.deselect_piece();
        self.current_index = (self.current_index + 1) % self.config.active_players().len();
    }

    /// Winning requires the full piece count, all of it inside the
    /// opposite corner
    fn has_won(&self, player: Player) -> bool {
        let goal = player.opposite();
        let mut count = 0;
        for coord in self.board.pieces_of(player) {
            if self.board.home_corner(coord) != Some(goal) {
                return false;
            }
            count += 1;
        }
        count == self.board.pieces_per_player()
    }

    // ========================================================================
    // INTERNALS SHARED WITH SERIALIZATION
    // ========================================================================

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn restore_turn(&mut self, player: Player) {
        // caller has validated the player is active
        self.current_index = self.config.index_of(player).unwrap_or(0);
        self.selected = None;
        self.valid_moves.clear();
        self.winner = None;
    }
}

// ============================================================================
// TESTS
// ============================================================================
