//! Per-session agent bookkeeping
//!
//! A roster owns one agent per AI-driven seat, keyed by player. Difficulty
//! changes mid-game retune the seated agent's budget without touching the
//! session configuration.

use rustc_hash::FxHashMap;

use sternhalma_core::{Board, Difficulty, GameConfig, Move, Player};

use crate::agent::Agent;

struct Slot {
    agent: Agent,
    difficulty: Difficulty,
}

/// Agents for every AI seat in one session
pub struct AgentRoster {
    config: GameConfig,
    slots: FxHashMap<Player, Slot>,
}

impl AgentRoster {
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, 42)
    }

    /// Seed offsets keep seats from mirroring each other's tie-breaks
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let mut slots = FxHashMap::default();
        for (i, &player) in config.active_players().iter().enumerate() {
            let is_ai = config.player_config(player).map_or(false, |pc| pc.is_ai);
            if !is_ai {
                continue;
            }
            let difficulty = config
                .player_config(player)
                .and_then(|pc| pc.difficulty)
                .unwrap_or(Difficulty::Medium);
            let agent = Agent::from_config(player, &config, seed.wrapping_add(i as u64));
            slots.insert(player, Slot { agent, difficulty });
        }
        let mut roster = Self { config, slots };
        roster.update_opponents();
        roster
    }

    /// Point every search agent at the seat that moves after it
    pub fn update_opponents(&mut self) {
        for (&player, slot) in self.slots.iter_mut() {
            slot.agent.set_opponent(self.config.next_active(player));
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_ai_player(&self, player: Player) -> bool {
        self.slots.contains_key(&player)
    }

    /// Ask the seated agent for a move; None when the seat is not AI-driven
    /// or the agent has no legal move
    pub fn ai_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        self.slots.get_mut(&player)?.agent.best_move(board)
    }

    pub fn difficulty(&self, player: Player) -> Option<Difficulty> {
        self.slots.get(&player).map(|slot| slot.difficulty)
    }

    /// Retune a seated agent's budget. The stored configuration keeps its
    /// original difficulty; only the live agent changes.
    pub fn set_difficulty(&mut self, player: Player, difficulty: Difficulty) -> bool {
        match self.slots.get_mut(&player) {
            Some(slot) => {
                slot.difficulty = difficulty;
                slot.agent.set_time_limit(difficulty.time_limit_ms());
                true
            }
            None => false,
        }
    }
}
