// Module declarations
mod backup;
mod config;
mod dirichlet;
mod error;
mod evaluation;
mod expansion;
mod mcts;
mod policy;
mod search_result;
mod selection;
mod tree;

// Public exports
pub use backup::backup;
pub use config::MctsConfig;
pub use error::{MctsError, Result};
pub use evaluation::{Evaluator, StoreDifferenceEvaluator, UniformEvaluator, evaluate_position};
pub use expansion::{expand, expand_and_evaluate};
pub use mcts::{Mcts, search};
pub use policy::{MIN_TEMPERATURE, extract_policy};
pub use search_result::SearchResult;
pub use selection::select_leaf;
pub use tree::{MctsNode, MctsTree, NodeId, NodeStatus};
