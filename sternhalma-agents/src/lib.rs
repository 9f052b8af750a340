//! Agent coordination and self-play.
//!
//! Builds computer opponents from a session configuration, keeps one per AI
//! seat, and drives full games or batches of games through the engine's
//! select/commit interface.

pub mod agent;
pub mod roster;
pub mod runner;

pub use agent::Agent;
pub use roster::AgentRoster;
pub use runner::{run_batch, run_batch_parallel, run_game, run_game_with, BatchOutcome, GameOutcome};
