//! Search tree with arena allocation
//!
//! Nodes are addressed by index; parent links are indices rather than owning
//! pointers, so the back-edges of the tree cost nothing to represent. The
//! whole arena is discarded when a search returns.

use rand::Rng;

use sternhalma_core::{legal_moves_for, Board, Move, Player};

/// Node identifier (index into the arena)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// One node of the search tree
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// Board snapshot after `incoming` was applied
    pub board: Board,
    /// Player whose moves are generated at this node
    pub player: Player,
    pub parent: Option<NodeId>,
    /// Move that produced this node (None for the root)
    pub incoming: Option<Move>,
    pub children: Vec<NodeId>,
    pub visits: u32,
    pub wins: u32,
    /// Moves not yet expanded into children
    pub untried: Vec<Move>,
}

impl SearchNode {
    fn new(board: Board, player: Player, parent: Option<NodeId>, incoming: Option<Move>) -> Self {
        let untried = legal_moves_for(&board, player);
        Self {
            board,
            player,
            parent,
            incoming,
            children: Vec::new(),
            visits: 0,
            wins: 0,
            untried,
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }
}

/// Arena-backed tree, built fresh for every search call
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Root the tree at a clone of the caller's board
    pub fn new(board: Board, player: Player) -> Self {
        Self {
            nodes: vec![SearchNode::new(board, player, None, None)],
        }
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========================================================================
    // SELECTION
    // ========================================================================

    /// Descend from the root while nodes are fully expanded, following the
    /// UCB1-maximal child
    pub fn select_leaf(&self, exploration: f32) -> NodeId {
        let mut current = NodeId::ROOT;
        loop {
            let node = self.get(current);
            if !node.is_fully_expanded() || node.children.is_empty() {
                return current;
            }
            match self.best_child(current, exploration) {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    fn best_child(&self, id: NodeId, exploration: f32) -> Option<NodeId> {
        let node = self.get(id);
        let parent_visits = node.visits.max(1);
        node.children
            .iter()
            .copied()
            .max_by(|&a, &b| {
                let ua = self.ucb1(a, parent_visits, exploration);
                let ub = self.ucb1(b, parent_visits, exploration);
                ua.partial_cmp(&ub).unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// UCB1 = wins/visits + C * sqrt(ln(parent_visits) / visits);
    /// never-visited children always win the comparison
    fn ucb1(&self, id: NodeId, parent_visits: u32, exploration: f32) -> f32 {
        let node = self.get(id);
        if node.visits == 0 {
            return f32::INFINITY;
        }
        let exploitation = node.wins as f32 / node.visits as f32;
        let term = exploration * ((parent_visits as f32).ln() / node.visits as f32).sqrt();
        exploitation + term
    }

    // ========================================================================
    // EXPANSION
    // ========================================================================

    /// Pop a random untried move, apply it to a cloned board and attach the
    /// resulting child. Returns None when the node is fully expanded.
    pub fn expand<R: Rng>(&mut self, id: NodeId, rng: &mut R) -> Option<NodeId> {
        let mv = {
            let node = self.get_mut(id);
            if node.untried.is_empty() {
                return None;
            }
            let pick = rng.gen_range(0..node.untried.len());
            node.untried.swap_remove(pick)
        };

        let parent = self.get(id);
        let child_board = parent.board.with_move(mv);
        let player = parent.player;

        let child_id = NodeId(self.nodes.len());
        self.nodes
            .push(SearchNode::new(child_board, player, Some(id), Some(mv)));
        self.get_mut(id).children.push(child_id);
        Some(child_id)
    }

    // ========================================================================
    // BACKPROPAGATION
    // ========================================================================

    /// Increment visits along the path to the root; count a win at every
    /// ancestor when the simulation came out positive
    pub fn backpropagate(&mut self, from: NodeId, won: bool) {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            if won {
                node.wins += 1;
            }
            current = node.parent;
        }
    }

    // ========================================================================
    // RESULT EXTRACTION
    // ========================================================================

    /// Move of the most-visited root child
    pub fn best_move(&self) -> Option<Move> {
        let root = self.get(NodeId::ROOT);
        root.children
            .iter()
            .copied()
            .max_by_key(|&id| self.get(id).visits)
            .and_then(|id| self.get(id).incoming)
    }

    /// Fallback when no child was ever expanded: a random untried root move
    pub fn random_untried_root<R: Rng>(&self, rng: &mut R) -> Option<Move> {
        let root = self.get(NodeId::ROOT);
        if root.untried.is_empty() {
            return None;
        }
        Some(root.untried[rng.gen_range(0..root.untried.len())])
    }

    /// Total simulations (root visits)
    pub fn total_simulations(&self) -> u32 {
        self.get(NodeId::ROOT).visits
    }
}

// ============================================================================
// TESTS
// ============================================================================
