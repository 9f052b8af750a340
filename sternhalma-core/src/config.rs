//! Session configuration: seated players, turn order, per-seat agents

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::board::Player;

/// Which computer opponent drives a seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Greedy,
    Mcts,
}

/// Search effort preset, mapped to a time budget
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn time_limit_ms(self) -> u64 {
        match self {
            Difficulty::Easy => 500,
            Difficulty::Medium => 1000,
            Difficulty::Hard => 2000,
        }
    }
}

/// Per-seat settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerConfig {
    pub player: Player,
    #[serde(rename = "isAI")]
    pub is_ai: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_kind: Option<AgentKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

/// Configuration problems, reported before a session starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported player count {0} (expected 2, 3, 4 or 6)")]
    UnsupportedPlayerCount(u8),
    #[error("expected {expected} active players, got {actual}")]
    PlayerCountMismatch { expected: u8, actual: usize },
    #[error("player {0:?} listed more than once")]
    DuplicatePlayer(Player),
    #[error("player config references inactive player {0:?}")]
    InactivePlayer(Player),
}

/// Immutable session configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub player_count: u8,
    /// Turn order; also selects which corners start populated
    pub active_players: Vec<Player>,
    #[serde(default)]
    pub player_configs: Vec<PlayerConfig>,
}

impl GameConfig {
    /// Standard corner assignment for a given player count
    pub fn standard(player_count: u8) -> Result<Self, ConfigError> {
        let active_players = match player_count {
            2 => vec![Player::Red, Player::Yellow],
            3 => vec![Player::Red, Player::Blue, Player::Orange],
            4 => vec![Player::Red, Player::Green, Player::Yellow, Player::Orange],
            6 => Player::ALL.to_vec(),
            n => return Err(ConfigError::UnsupportedPlayerCount(n)),
        };
        Ok(Self {
            player_count,
            active_players,
            player_configs: vec![],
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.player_count, 2 | 3 | 4 | 6) {
            return Err(ConfigError::UnsupportedPlayerCount(self.player_count));
        }
        if self.active_players.len() != self.player_count as usize {
            return Err(ConfigError::PlayerCountMismatch {
                expected: self.player_count,
                actual: self.active_players.len(),
            });
        }
        for (i, &player) in self.active_players.iter().enumerate() {
            if self.active_players[..i].contains(&player) {
                return Err(ConfigError::DuplicatePlayer(player));
            }
        }
        for pc in &self.player_configs {
            if !self.is_active(pc.player) {
                return Err(ConfigError::InactivePlayer(pc.player));
            }
        }
        Ok(())
    }

    pub fn active_players(&self) -> &[Player] {
        &self.active_players
    }

    pub fn is_active(&self, player: Player) -> bool {
        self.active_players.contains(&player)
    }

    pub fn index_of(&self, player: Player) -> Option<usize> {
        self.active_players.iter().position(|&p| p == player)
    }

    /// Next active player in turn order, wrapping around
    pub fn next_active(&self, player: Player) -> Player {
        match self.index_of(player) {
            Some(i) => self.active_players[(i + 1) % self.active_players.len()],
            None => self.active_players[0],
        }
    }

    pub fn player_config(&self, player: Player) -> Option<&PlayerConfig> {
        self.player_configs.iter().find(|pc| pc.player == player)
    }

    /// Mark a seat as AI-driven (builder style, used by tests and the CLI)
    pub fn with_ai(
        mut self,
        player: Player,
        agent_kind: AgentKind,
        difficulty: Option<Difficulty>,
    ) -> Self {
        self.player_configs.retain(|pc| pc.player != player);
        self.player_configs.push(PlayerConfig {
            player,
            is_ai: true,
            agent_kind: Some(agent_kind),
            difficulty,
        });
        self
    }

    /// Load and validate a configuration from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
