use mancala_core::Board;
use rand::Rng;
use tracing::{debug, trace};

use crate::backup::backup;
use crate::config::MctsConfig;
use crate::dirichlet::add_dirichlet_noise_to_root;
use crate::error::{MctsError, Result};
use crate::evaluation::Evaluator;
use crate::expansion::expand_and_evaluate;
use crate::policy::extract_policy;
use crate::search_result::SearchResult;
use crate::selection::select_leaf;
use crate::tree::{MctsTree, NodeId};

/// Monte Carlo Tree Search for Mancala, guided by an external evaluator
///
/// Every call to [`Mcts::search`] builds a fresh tree from the given board;
/// nothing from a previous search survives into the next one.
pub struct Mcts {
    tree: MctsTree,
}

impl Mcts {
    /// Create a new MCTS instance
    pub fn new() -> Self {
        Self {
            tree: MctsTree::new(),
        }
    }

    /// Run MCTS search from a given board position
    ///
    /// The root is expanded up front, so after `num_simulations` simulations
    /// the root's children hold exactly that many visits between them. `rng`
    /// is only drawn from when Dirichlet noise is enabled.
    pub fn search<E, R>(
        &mut self,
        board: &Board,
        evaluator: &E,
        config: &MctsConfig,
        rng: &mut R,
    ) -> Result<SearchResult>
    where
        E: Evaluator + ?Sized,
        R: Rng + ?Sized,
    {
        if board.is_game_over() {
            return Err(MctsError::TerminalPosition);
        }
        if board.legal_moves().is_empty() {
            return Err(MctsError::NoLegalMoves);
        }

        // 1. Initialize root node
        let root_id = self.initialize_root(board, evaluator)?;

        // 2. Add Dirichlet noise if configured (for self-play)
        if config.add_dirichlet_noise {
            add_dirichlet_noise_to_root(&mut self.tree, root_id, config, rng)?;
        }

        // 3. Run simulations
        for simulation in 0..config.num_simulations {
            // Selection: traverse tree using PUCT
            let leaf_id = select_leaf(&self.tree, root_id, config.c_puct);

            // Expansion & Evaluation: terminal leaves return the exact outcome
            let value = expand_and_evaluate(&mut self.tree, leaf_id, evaluator)?;

            // Backup: propagate value up tree
            backup(&mut self.tree, leaf_id, value)?;

            trace!(simulation, leaf = leaf_id, value, "MCTS simulation complete");
        }

        // 4. Extract results
        let result = self.create_search_result(root_id, config)?;
        debug!(
            simulations = result.num_simulations_run,
            nodes = self.tree.size(),
            root_value = result.root_value,
            best_move = ?result.best_move(),
            "MCTS search finished"
        );
        Ok(result)
    }

    /// Initialize the tree with root node
    fn initialize_root<E: Evaluator + ?Sized>(
        &mut self,
        board: &Board,
        evaluator: &E,
    ) -> Result<NodeId> {
        let root_id = self.tree.initialize_root(board.clone());

        // Expand root immediately; its value estimate is not backed up
        expand_and_evaluate(&mut self.tree, root_id, evaluator)?;

        Ok(root_id)
    }

    /// Create search result from root node statistics
    fn create_search_result(&self, root_id: NodeId, config: &MctsConfig) -> Result<SearchResult> {
        let root = self.tree.get(root_id)?;
        let move_visits = self.tree.child_visits(root_id);

        if move_visits.is_empty() {
            return Err(MctsError::NoLegalMoves);
        }

        let visited: u32 = move_visits.iter().map(|(_, v)| v).sum();
        if visited != root.visit_count {
            return Err(MctsError::IllegalState(format!(
                "root visited {} times but children hold {} visits",
                root.visit_count, visited
            )));
        }

        let policy_distribution = extract_policy(&move_visits, config.temperature);

        Ok(SearchResult::new(
            policy_distribution,
            root.q_value(),
            config.num_simulations,
            move_visits,
        ))
    }

    /// Tree built by the last search
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }
}

impl Default for Mcts {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot search: build a tree for `board`, run `simulations` simulations
/// with default settings, return the result and drop the tree.
pub fn search<E: Evaluator + ?Sized>(
    board: &Board,
    evaluator: &E,
    simulations: u32,
) -> Result<SearchResult> {
    let config = MctsConfig::default().with_simulations(simulations);
    Mcts::new().search(board, evaluator, &config, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::UniformEvaluator;
    use mancala_core::Player;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_mcts_creation() {
        let mut mcts = Mcts::new();
        assert_eq!(mcts.tree().size(), 0);

        search_initial(&mut mcts, 5);
        // Root, its six children and the nodes grown below them
        assert!(mcts.tree().size() > 7);
    }

    fn search_initial(mcts: &mut Mcts, sims: u32) -> SearchResult {
        let config = MctsConfig::default().with_simulations(sims);
        let mut rng = StdRng::seed_from_u64(0);
        mcts.search(&Board::new(), &UniformEvaluator, &config, &mut rng)
            .unwrap()
    }

    #[test]
    fn test_root_visits_match_budget() {
        let mut mcts = Mcts::new();
        let result = search_initial(&mut mcts, 50);

        assert_eq!(result.total_visits(), 50);
        assert_eq!(mcts.tree().nodes[0].visit_count, 50);
        assert_eq!(result.root_visit_counts.len(), 6);
    }

    #[test]
    fn test_fresh_tree_per_search() {
        let mut mcts = Mcts::new();
        let first = search_initial(&mut mcts, 30);
        let second = search_initial(&mut mcts, 30);

        assert_eq!(second.total_visits(), 30);
        assert_eq!(first.root_visit_counts, second.root_visit_counts);
    }

    #[test]
    fn test_zero_budget_gives_uniform_policy() {
        let mut mcts = Mcts::new();
        let result = search_initial(&mut mcts, 0);

        assert_eq!(result.total_visits(), 0);
        for pit in 0..6 {
            assert!((result.policy_distribution[pit] - 1.0 / 6.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_terminal_position_rejected() {
        let board = Board::from_pits([0, 0, 0, 0, 0, 0, 30, 0, 0, 0, 0, 0, 0, 18], Player::One)
            .unwrap();
        let err = search(&board, &UniformEvaluator, 10).unwrap_err();
        assert!(matches!(err, MctsError::TerminalPosition));
    }

    #[test]
    fn test_evaluator_failure_aborts_search() {
        let calls = std::cell::Cell::new(0);
        let flaky = |b: &Board| {
            calls.set(calls.get() + 1);
            if calls.get() > 3 {
                Err(MctsError::EvaluationFailed("backend gone".into()))
            } else {
                UniformEvaluator.evaluate(b)
            }
        };

        let err = search(&Board::new(), &flaky, 20).unwrap_err();
        assert!(matches!(err, MctsError::EvaluationFailed(_)));
        assert_eq!(calls.get(), 4, "no retries after a failure");
    }
}
