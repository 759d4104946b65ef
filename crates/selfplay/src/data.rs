use mancala_core::{Board, Outcome};

/// Record of a single game
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Board state before each move
    pub states: Vec<Board>,
    /// MCTS policy distribution (14 elements) at each move
    pub policies: Vec<Vec<f32>>,
    /// Pit actually sown at each move
    pub moves: Vec<usize>,
    /// Final result of the game
    pub outcome: Outcome,
}

impl GameRecord {
    /// Create a new empty game record
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            policies: Vec::new(),
            moves: Vec::new(),
            outcome: Outcome::Tie,
        }
    }

    pub fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = outcome;
    }

    /// Add a move to the record
    pub fn add_move(&mut self, state: Board, policy: Vec<f32>, action: usize) {
        self.states.push(state);
        self.policies.push(policy);
        self.moves.push(action);
    }

    /// Get the number of moves in this game
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if the record is empty
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Training example for the evaluator
#[derive(Debug, Clone)]
pub struct TrainingExample {
    /// Encoded board (14 cells + turn field)
    pub state: Vec<f32>,
    /// Target policy distribution (14 elements)
    pub policy: Vec<f32>,
    /// Target value (-1.0, 0.0, or 1.0)
    pub value: f32,
}

impl TrainingExample {
    /// Create a new training example
    pub fn new(state: Vec<f32>, policy: Vec<f32>, value: f32) -> Self {
        Self {
            state,
            policy,
            value,
        }
    }
}
