//! Sternhalma core - board model, move generation and game rules
//!
//! This crate provides the engine for the star-board jumping game:
//! - Board geometry (hexagonal star, axial coordinates, adjacency table)
//! - Legal-move discovery (adjacent steps, chained and long jumps)
//! - Game state machine (selection, move commit, turn rotation, win check)
//! - Flat textual state export/import
//! - Goal-distance evaluation and the one-ply greedy agent

pub mod board;
pub mod config;
pub mod eval;
pub mod game;
pub mod greedy;
pub mod moves;
pub mod serialize;

// Re-exports for convenient access
pub use board::{Board, Cell, HexCoord, Player, Topology, CENTER_RADIUS, DIRECTIONS};
pub use config::{AgentKind, ConfigError, Difficulty, GameConfig, PlayerConfig};
pub use game::Game;
pub use greedy::GreedyAgent;
pub use moves::{legal_destinations, legal_moves_for, Move};
pub use serialize::ImportError;
