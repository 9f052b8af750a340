//! Star board geometry with axial coordinates
//!
//! The board is the classic six-pointed star: a central hexagon of radius 4
//! (61 cells) with a 10-cell triangle grafted onto each edge (121 cells
//! total). Every cell exists regardless of how many players are seated; only
//! the corners of active players start occupied.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::GameConfig;
use crate::moves::Move;

/// Radius of the central hexagonal region
pub const CENTER_RADIUS: i8 = 4;

/// Axial hex coordinates; the third cube coordinate `s` is derived
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i8,
    pub r: i8,
}

impl HexCoord {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Third cube coordinate; q + r + s = 0 by construction
    pub const fn s(&self) -> i8 {
        -self.q - self.r
    }

    /// Distance between two cells
    pub fn distance_to(&self, other: HexCoord) -> i8 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        dq.max(dr).max(ds)
    }

    /// Offset by a multiple of a direction vector
    pub fn translate(&self, dq: i8, dr: i8) -> HexCoord {
        HexCoord::new(self.q + dq, self.r + dr)
    }

    /// Neighbor in direction (0-5)
    pub fn neighbor(&self, direction: u8) -> HexCoord {
        let (dq, dr) = DIRECTIONS[direction as usize % 6];
        self.translate(dq, dr)
    }
}

/// The six unit directions, axial projection of the cube vectors
/// (1,-1,0), (1,0,-1), (0,1,-1), (-1,1,0), (-1,0,1), (0,-1,1)
pub const DIRECTIONS: [(i8, i8); 6] = [
    (1, -1),
    (1, 0),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (0, -1),
];

// ============================================================================
// PLAYERS
// ============================================================================

/// Corner identifiers in rotational board order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red = 0,
    Green = 1,
    Blue = 2,
    Yellow = 3,
    Orange = 4,
    Purple = 5,
}

impl Player {
    pub const ALL: [Player; 6] = [
        Player::Red,
        Player::Green,
        Player::Blue,
        Player::Yellow,
        Player::Orange,
        Player::Purple,
    ];

    /// The corner three steps around the star, where this player's goal lies
    pub fn opposite(self) -> Player {
        Player::ALL[(self as usize + 3) % 6]
    }

    /// Apex cell of this player's home corner triangle
    pub fn corner_apex(self) -> HexCoord {
        match self {
            Player::Red => HexCoord::new(4, 4),
            Player::Green => HexCoord::new(8, -4),
            Player::Blue => HexCoord::new(4, -8),
            Player::Yellow => HexCoord::new(-4, -4),
            Player::Orange => HexCoord::new(-8, 4),
            Player::Purple => HexCoord::new(-4, 8),
        }
    }
}

/// Which corner triangle a coordinate falls in, if any.
/// Exactly one cube coordinate of a corner cell exceeds the central range.
fn corner_owner(coord: HexCoord) -> Option<Player> {
    let (q, r, s) = (coord.q, coord.r, coord.s());
    if s < -CENTER_RADIUS {
        Some(Player::Red)
    } else if q > CENTER_RADIUS {
        Some(Player::Green)
    } else if r < -CENTER_RADIUS {
        Some(Player::Blue)
    } else if s > CENTER_RADIUS {
        Some(Player::Yellow)
    } else if q < -CENTER_RADIUS {
        Some(Player::Orange)
    } else if r > CENTER_RADIUS {
        Some(Player::Purple)
    } else {
        None
    }
}

/// Star membership: the union of the two big triangles whose intersection
/// is the central hexagon
fn on_star(coord: HexCoord) -> bool {
    let (q, r, s) = (coord.q, coord.r, coord.s());
    let upper = q <= CENTER_RADIUS && r <= CENTER_RADIUS && s <= CENTER_RADIUS;
    let lower = q >= -CENTER_RADIUS && r >= -CENTER_RADIUS && s >= -CENTER_RADIUS;
    upper || lower
}

// ============================================================================
// TOPOLOGY
// ============================================================================

/// Fixed board shape: cell set, adjacency table, corner assignment.
/// Built once and shared between board clones.
#[derive(Debug)]
pub struct Topology {
    /// All cells in sorted order (deterministic iteration)
    cells: Vec<HexCoord>,
    /// Cell -> up to 6 on-board neighbors
    adjacency: FxHashMap<HexCoord, Vec<HexCoord>>,
    /// Corner cells only; central cells have no home corner
    home_corners: FxHashMap<HexCoord, Player>,
    /// Cells per corner triangle (10 in the standard star)
    pieces_per_player: usize,
}

impl Topology {
    /// Build the standard star topology
    pub fn standard() -> Arc<Topology> {
        let reach = 2 * CENTER_RADIUS;
        let mut cells = Vec::new();
        for q in -reach..=reach {
            for r in -reach..=reach {
                let coord = HexCoord::new(q, r);
                if on_star(coord) {
                    cells.push(coord);
                }
            }
        }
        cells.sort();

        let mut adjacency = FxHashMap::default();
        let mut home_corners = FxHashMap::default();
        for &coord in &cells {
            let neighbors: Vec<HexCoord> = DIRECTIONS
                .iter()
                .map(|&(dq, dr)| coord.translate(dq, dr))
                .filter(|n| on_star(*n))
                .collect();
            adjacency.insert(coord, neighbors);
            if let Some(owner) = corner_owner(coord) {
                home_corners.insert(coord, owner);
            }
        }

        let pieces_per_player = home_corners
            .values()
            .filter(|&&owner| owner == Player::Red)
            .count();

        Arc::new(Topology {
            cells,
            adjacency,
            home_corners,
            pieces_per_player,
        })
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.adjacency.contains_key(&coord)
    }

    pub fn neighbors(&self, coord: HexCoord) -> &[HexCoord] {
        self.adjacency.get(&coord).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn home_corner(&self, coord: HexCoord) -> Option<Player> {
        self.home_corners.get(&coord).copied()
    }

    pub fn cells(&self) -> &[HexCoord] {
        &self.cells
    }

    pub fn pieces_per_player(&self) -> usize {
        self.pieces_per_player
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Read-only view of a single cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub coord: HexCoord,
    pub occupant: Option<Player>,
    pub home_corner: Option<Player>,
}

/// Occupancy state over a shared topology (clone to search)
#[derive(Clone, Debug)]
pub struct Board {
    topology: Arc<Topology>,
    /// Occupied cells only (sparse)
    occupants: FxHashMap<HexCoord, Player>,
}

impl Board {
    /// Board with each active player's corner filled with their pieces
    pub fn new(config: &GameConfig) -> Self {
        let mut board = Self::blank();
        let topology = Arc::clone(&board.topology);
        for &coord in topology.cells() {
            if let Some(owner) = topology.home_corner(coord) {
                if config.is_active(owner) {
                    board.occupants.insert(coord, owner);
                }
            }
        }
        board
    }

    /// Empty star board, useful for setting up positions
    pub fn blank() -> Self {
        Self {
            topology: Topology::standard(),
            occupants: FxHashMap::default(),
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.topology.contains(coord)
    }

    pub fn occupant(&self, coord: HexCoord) -> Option<Player> {
        self.occupants.get(&coord).copied()
    }

    /// On the board and unoccupied
    pub fn is_free(&self, coord: HexCoord) -> bool {
        self.contains(coord) && !self.occupants.contains_key(&coord)
    }

    pub fn neighbors(&self, coord: HexCoord) -> &[HexCoord] {
        self.topology.neighbors(coord)
    }

    pub fn home_corner(&self, coord: HexCoord) -> Option<Player> {
        self.topology.home_corner(coord)
    }

    pub fn cell(&self, coord: HexCoord) -> Option<Cell> {
        if !self.contains(coord) {
            return None;
        }
        Some(Cell {
            coord,
            occupant: self.occupant(coord),
            home_corner: self.home_corner(coord),
        })
    }

    /// All cells occupied by `player`
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = HexCoord> + '_ {
        self.occupants
            .iter()
            .filter(move |(_, &owner)| owner == player)
            .map(|(&coord, _)| coord)
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    pub fn pieces_per_player(&self) -> usize {
        self.topology.pieces_per_player()
    }

    /// Place a piece; replaces any existing occupant
    pub fn place(&mut self, coord: HexCoord, player: Player) {
        debug_assert!(self.contains(coord));
        self.occupants.insert(coord, player);
    }

    pub fn remove(&mut self, coord: HexCoord) -> Option<Player> {
        self.occupants.remove(&coord)
    }

    pub fn clear_all(&mut self) {
        self.occupants.clear();
    }

    /// Transfer the occupant from `mv.from` to `mv.to`
    pub fn apply(&mut self, mv: Move) {
        if let Some(player) = self.occupants.remove(&mv.from) {
            self.occupants.insert(mv.to, player);
        }
    }

    /// Clone the board and apply a move to the clone
    pub fn with_move(&self, mv: Move) -> Board {
        let mut child = self.clone();
        child.apply(mv);
        child
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_invariant() {
        let topology = Topology::standard();
        for &coord in topology.cells() {
            assert_eq!(coord.q + coord.r + coord.s(), 0);
        }
    }

    #[test]
    fn test_star_cell_count() {
        let topology = Topology::standard();
        assert_eq!(topology.cells().len(), 121);
        assert_eq!(topology.pieces_per_player(), 10);
    }

    #[test]
    fn test_corner_sizes() {
        let topology = Topology::standard();
        for player in Player::ALL {
            let count = topology
                .cells()
                .iter()
                .filter(|&&c| topology.home_corner(c) == Some(player))
                .count();
            assert_eq!(count, 10, "{player:?} corner should have 10 cells");
        }
    }

    #[test]
    fn test_adjacency_symmetric() {
        let topology = Topology::standard();
        for &coord in topology.cells() {
            for &neighbor in topology.neighbors(coord) {
                assert!(
                    topology.neighbors(neighbor).contains(&coord),
                    "{neighbor:?} should list {coord:?} back"
                );
            }
        }
    }

    #[test]
    fn test_center_has_six_neighbors() {
        let topology = Topology::standard();
        assert_eq!(topology.neighbors(HexCoord::new(0, 0)).len(), 6);
    }

    #[test]
    fn test_distance() {
        let origin = HexCoord::new(0, 0);
        assert_eq!(origin.distance_to(HexCoord::new(0, 0)), 0);
        assert_eq!(origin.distance_to(HexCoord::new(1, -1)), 1);
        assert_eq!(origin.distance_to(HexCoord::new(2, -2)), 2);
        assert_eq!(origin.distance_to(HexCoord::new(4, 4)), 8);
    }

    #[test]
    fn test_opposite_corners() {
        assert_eq!(Player::Red.opposite(), Player::Yellow);
        assert_eq!(Player::Yellow.opposite(), Player::Red);
        assert_eq!(Player::Green.opposite(), Player::Orange);
        assert_eq!(Player::Blue.opposite(), Player::Purple);
    }

    #[test]
    fn test_apex_is_deepest_corner_cell() {
        let topology = Topology::standard();
        for player in Player::ALL {
            let apex = player.corner_apex();
            assert_eq!(topology.home_corner(apex), Some(player));
            assert_eq!(apex.distance_to(HexCoord::new(0, 0)), 8);
        }
    }

    #[test]
    fn test_board_populates_active_corners_only() {
        let config = GameConfig::standard(2).unwrap();
        let board = Board::new(&config);
        assert_eq!(board.piece_count(Player::Red), 10);
        assert_eq!(board.piece_count(Player::Yellow), 10);
        assert_eq!(board.piece_count(Player::Green), 0);
        // inactive corner cells still exist
        assert!(board.contains(Player::Green.corner_apex()));
    }

    #[test]
    fn test_apply_transfers_occupant() {
        let mut board = Board::blank();
        let from = HexCoord::new(0, 0);
        let to = HexCoord::new(1, 0);
        board.place(from, Player::Red);
        board.apply(Move { from, to });
        assert_eq!(board.occupant(from), None);
        assert_eq!(board.occupant(to), Some(Player::Red));
    }

    #[test]
    fn test_clone_isolates_occupancy() {
        let mut board = Board::blank();
        board.place(HexCoord::new(0, 0), Player::Red);
        let clone = board.with_move(Move {
            from: HexCoord::new(0, 0),
            to: HexCoord::new(1, 0),
        });
        assert_eq!(board.occupant(HexCoord::new(0, 0)), Some(Player::Red));
        assert_eq!(clone.occupant(HexCoord::new(1, 0)), Some(Player::Red));
    }
}
