use mancala_core::Board;

use crate::error::{MctsError, Result};

/// Node ID in the arena-style tree
pub type NodeId = usize;

/// Lifecycle classification of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Unexpanded,
    Expanded,
    /// Game over at this node; never expanded
    Terminal,
}

/// A single node in the MCTS tree
///
/// The statistics of the edge leading into a node live on the node itself:
/// `visit_count`, `total_value` and `prior_probability` are the parent's
/// per-move record for `move_action`.
pub struct MctsNode {
    /// Board state at this node
    pub state: Board,

    /// Pit sown to reach this state (None for root)
    pub move_action: Option<usize>,

    /// Parent node ID, only followed during backup
    pub parent: Option<NodeId>,

    /// Child node IDs in ascending move order
    pub children: Vec<NodeId>,

    /// Number of times this node has been visited
    pub visit_count: u32,

    /// Sum of backed-up values, seen by the player who chose `move_action`
    /// (for the root: by the player to move at the root)
    pub total_value: f32,

    /// Prior probability, renormalized over the parent's legal moves
    pub prior_probability: f32,

    /// Whether this is a terminal state
    pub is_terminal: bool,

    /// Whether children have been created
    pub is_expanded: bool,

    /// Terminal value if is_terminal (-1, 0, 1) for the player recorded as
    /// to-move in `state`
    pub terminal_value: Option<f32>,
}

impl MctsNode {
    /// Create a new root node
    pub fn new_root(state: Board) -> Self {
        let is_terminal = state.is_game_over();
        Self {
            state,
            move_action: None,
            parent: None,
            children: Vec::new(),
            visit_count: 0,
            total_value: 0.0,
            prior_probability: 1.0,
            is_terminal,
            is_expanded: false,
            terminal_value: None,
        }
    }

    /// Create a new child node
    pub fn new_child(state: Board, move_action: usize, parent: NodeId, prior: f32) -> Self {
        let is_terminal = state.is_game_over();
        Self {
            state,
            move_action: Some(move_action),
            parent: Some(parent),
            children: Vec::new(),
            visit_count: 0,
            total_value: 0.0,
            prior_probability: prior,
            is_terminal,
            is_expanded: false,
            terminal_value: None,
        }
    }

    /// Get Q-value (average value)
    pub fn q_value(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.total_value / self.visit_count as f32
        }
    }

    pub fn status(&self) -> NodeStatus {
        if self.is_terminal {
            NodeStatus::Terminal
        } else if self.is_expanded {
            NodeStatus::Expanded
        } else {
            NodeStatus::Unexpanded
        }
    }
}

/// MCTS tree using arena allocation
///
/// The arena owns every node; parent links are plain IDs and never keep a
/// node alive. Dropping the tree drops the whole search.
pub struct MctsTree {
    /// Arena of all nodes
    pub nodes: Vec<MctsNode>,

    /// Root node ID (usually 0)
    pub root_id: NodeId,
}

impl MctsTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(4096),
            root_id: 0,
        }
    }

    /// Initialize the tree with a root node, discarding any previous search
    pub fn initialize_root(&mut self, board: Board) -> NodeId {
        self.nodes.clear();
        let root = MctsNode::new_root(board);
        self.nodes.push(root);
        self.root_id = 0;
        self.root_id
    }

    /// Add a new node and return its ID
    pub fn add_node(&mut self, node: MctsNode) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Result<&MctsNode> {
        self.nodes.get(id).ok_or(MctsError::InvalidNodeId(id))
    }

    /// Child of `id` reached by sowing `pit`, if it has been created
    pub fn child_for_move(&self, id: NodeId, pit: usize) -> Option<NodeId> {
        self.nodes.get(id)?.children.iter().copied().find(|&child| {
            self.nodes
                .get(child)
                .is_some_and(|node| node.move_action == Some(pit))
        })
    }

    /// `(move, visit_count)` for every child of `id`, in move order
    pub fn child_visits(&self, id: NodeId) -> Vec<(usize, u32)> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        node.children
            .iter()
            .filter_map(|&child| {
                let child = self.nodes.get(child)?;
                Some((child.move_action?, child.visit_count))
            })
            .collect()
    }

    /// Get the number of nodes in the tree
    pub fn size(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for MctsTree {
    fn default() -> Self {
        Self::new()
    }
}
