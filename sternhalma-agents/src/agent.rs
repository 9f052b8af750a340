//! Uniform wrapper over the available computer opponents

use sternhalma_core::{AgentKind, Board, Difficulty, GameConfig, GreedyAgent, Move, Player};
use sternhalma_mcts::MctsAgent;

/// One computer opponent of either kind.
///
/// Capability setters return whether the request applied; the greedy agent
/// has no time budget and no opponent model, so it reports `false`.
pub enum Agent {
    Greedy(GreedyAgent),
    Mcts(MctsAgent),
}

impl Agent {
    /// Build the agent a seat's configuration asks for. Seats with no
    /// explicit kind get the search agent at the medium budget.
    pub fn from_config(player: Player, config: &GameConfig, seed: u64) -> Self {
        let seat = config.player_config(player);
        let kind = seat.and_then(|pc| pc.agent_kind).unwrap_or(AgentKind::Mcts);
        match kind {
            AgentKind::Greedy => Agent::Greedy(GreedyAgent::with_seed(player, seed)),
            AgentKind::Mcts => {
                let difficulty = seat
                    .and_then(|pc| pc.difficulty)
                    .unwrap_or(Difficulty::Medium);
                let mut agent = MctsAgent::with_seed(player, config.clone(), seed);
                agent.set_time_limit(difficulty.time_limit_ms());
                // the opposite corner may be unseated in 3-player games
                if !config.is_active(agent.opponent()) {
                    agent.set_opponent(config.next_active(player));
                }
                Agent::Mcts(agent)
            }
        }
    }

    pub fn kind(&self) -> AgentKind {
        match self {
            Agent::Greedy(_) => AgentKind::Greedy,
            Agent::Mcts(_) => AgentKind::Mcts,
        }
    }

    pub fn player(&self) -> Player {
        match self {
            Agent::Greedy(agent) => agent.player(),
            Agent::Mcts(agent) => agent.player(),
        }
    }

    pub fn best_move(&mut self, board: &Board) -> Option<Move> {
        match self {
            Agent::Greedy(agent) => agent.best_move(board),
            Agent::Mcts(agent) => agent.best_move(board),
        }
    }

    /// Apply a new time budget; true when the agent honors one
    pub fn set_time_limit(&mut self, time_limit_ms: u64) -> bool {
        match self {
            Agent::Greedy(_) => false,
            Agent::Mcts(agent) => {
                agent.set_time_limit(time_limit_ms);
                true
            }
        }
    }

    /// Point the evaluation at a different opponent seat
    pub fn set_opponent(&mut self, opponent: Player) -> bool {
        match self {
            Agent::Greedy(_) => false,
            Agent::Mcts(agent) => {
                agent.set_opponent(opponent);
                true
            }
        }
    }
}
