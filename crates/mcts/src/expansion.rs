use mancala_core::{ACTION_SIZE, Board};

use crate::error::{MctsError, Result};
use crate::evaluation::{Evaluator, evaluate_position};
use crate::tree::{MctsNode, MctsTree, NodeId};

/// Evaluate a leaf and expand it with the evaluator's priors.
///
/// Terminal leaves skip the evaluator entirely and return the exact game
/// outcome. The returned value is from the perspective of the player to move
/// at the leaf.
pub fn expand_and_evaluate<E: Evaluator + ?Sized>(
    tree: &mut MctsTree,
    leaf_id: NodeId,
    evaluator: &E,
) -> Result<f32> {
    // Clone state first to avoid borrow checker issues
    let leaf_state = tree.get(leaf_id)?.state.clone();

    if leaf_state.is_game_over() {
        let value = calculate_terminal_value(&leaf_state);
        let leaf = &mut tree.nodes[leaf_id];
        leaf.is_terminal = true;
        leaf.terminal_value = Some(value);
        return Ok(value);
    }

    if !leaf_state.is_consistent() {
        return Err(MctsError::IllegalState(format!(
            "node {leaf_id} holds {} marbles",
            leaf_state.total_marbles()
        )));
    }

    let (priors, value) = evaluate_position(&leaf_state, evaluator)?;
    expand(tree, leaf_id, &priors)?;

    Ok(value)
}

/// Create a child for every legal move of the leaf that is not already present.
///
/// `priors` covers the full action space and is renormalized over the legal
/// moves. No-op on terminal nodes.
pub fn expand(tree: &mut MctsTree, leaf_id: NodeId, priors: &[f32]) -> Result<()> {
    let leaf_state: Board = tree.get(leaf_id)?.state.clone();

    if leaf_state.is_game_over() {
        return Ok(());
    }

    if priors.len() != ACTION_SIZE {
        return Err(MctsError::EvaluationFailed(format!(
            "Expected prior vector of length {}, got {}",
            ACTION_SIZE,
            priors.len()
        )));
    }

    let move_priors = leaf_state.policy_for_legal_moves(priors);
    if move_priors.is_empty() {
        return Err(MctsError::IllegalState(format!(
            "node {leaf_id} is not terminal but has no legal moves"
        )));
    }

    for (pit, prior) in move_priors {
        if tree.child_for_move(leaf_id, pit).is_some() {
            continue;
        }

        let mut child_state = leaf_state.clone();
        child_state.apply_move(pit)?;

        let child = MctsNode::new_child(child_state, pit, leaf_id, prior);
        let child_id = tree.add_node(child);
        tree.nodes[leaf_id].children.push(child_id);
    }

    tree.nodes[leaf_id].is_expanded = true;
    Ok(())
}

/// Terminal value from the perspective of the player recorded as to-move
///
/// Returns:
/// - 1.0 if that player won
/// - -1.0 if that player lost
/// - 0.0 for a tie
pub(crate) fn calculate_terminal_value(board: &Board) -> f32 {
    board.winner().value_for(board.turn())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::UniformEvaluator;
    use approx::assert_relative_eq;
    use mancala_core::Player;
    use std::cell::Cell;

    #[test]
    fn test_terminal_value_mover_wins() {
        let board = Board::from_pits([0, 0, 0, 0, 0, 0, 30, 0, 0, 0, 0, 0, 0, 18], Player::One)
            .unwrap();
        assert_eq!(calculate_terminal_value(&board), 1.0);
    }

    #[test]
    fn test_terminal_value_mover_loses() {
        let board = Board::from_pits([0, 0, 0, 0, 0, 0, 30, 0, 0, 0, 0, 0, 0, 18], Player::Two)
            .unwrap();
        assert_eq!(calculate_terminal_value(&board), -1.0);
    }

    #[test]
    fn test_terminal_value_tie() {
        let board = Board::from_pits([0, 0, 0, 0, 0, 0, 24, 0, 0, 0, 0, 0, 0, 24], Player::One)
            .unwrap();
        assert_eq!(calculate_terminal_value(&board), 0.0);
    }

    #[test]
    fn test_expand_renormalizes_over_legal_moves() {
        let mut tree = MctsTree::new();
        let root = tree.initialize_root(Board::new());

        // Mass on stores and the opponent's side must be ignored
        let mut priors = vec![0.0; ACTION_SIZE];
        priors[0] = 0.1;
        priors[1] = 0.3;
        priors[6] = 0.3;
        priors[9] = 0.3;

        expand(&mut tree, root, &priors).unwrap();

        let children = &tree.nodes[root].children;
        assert_eq!(children.len(), 6);
        assert!(tree.nodes[root].is_expanded);

        let child_priors: Vec<f32> = children
            .iter()
            .map(|&id| tree.nodes[id].prior_probability)
            .collect();
        assert_relative_eq!(child_priors.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(child_priors[0], 0.25, epsilon = 1e-6);
        assert_relative_eq!(child_priors[1], 0.75, epsilon = 1e-6);

        let moves: Vec<_> = children
            .iter()
            .map(|&id| tree.nodes[id].move_action.unwrap())
            .collect();
        assert_eq!(moves, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_children_hold_post_move_state() {
        let mut tree = MctsTree::new();
        let root = tree.initialize_root(Board::new());
        expand(&mut tree, root, &[1.0; ACTION_SIZE]).unwrap();

        let child = tree.child_for_move(root, 2).unwrap();
        let state = &tree.nodes[child].state;
        assert_eq!(state.pits(), &[4, 4, 0, 5, 5, 5, 1, 4, 4, 4, 4, 4, 4, 0]);
        assert_eq!(state.turn(), Player::One);
        assert_eq!(tree.nodes[child].parent, Some(root));
    }

    #[test]
    fn test_expand_twice_does_not_duplicate_children() {
        let mut tree = MctsTree::new();
        let root = tree.initialize_root(Board::new());
        expand(&mut tree, root, &[1.0; ACTION_SIZE]).unwrap();
        expand(&mut tree, root, &[1.0; ACTION_SIZE]).unwrap();
        assert_eq!(tree.nodes[root].children.len(), 6);
        assert_eq!(tree.size(), 7);
    }

    #[test]
    fn test_expand_terminal_is_noop() {
        let board = Board::from_pits([0, 0, 0, 0, 0, 0, 30, 0, 0, 0, 0, 0, 0, 18], Player::One)
            .unwrap();
        let mut tree = MctsTree::new();
        let root = tree.initialize_root(board);
        expand(&mut tree, root, &[1.0; ACTION_SIZE]).unwrap();
        assert!(tree.nodes[root].children.is_empty());
        assert!(!tree.nodes[root].is_expanded);
    }

    #[test]
    fn test_terminal_leaf_skips_evaluator() {
        let board = Board::from_pits([0, 0, 0, 0, 0, 0, 18, 0, 0, 0, 0, 0, 0, 30], Player::One)
            .unwrap();
        let mut tree = MctsTree::new();
        let root = tree.initialize_root(board);

        let calls = Cell::new(0);
        let counting = |b: &Board| {
            calls.set(calls.get() + 1);
            UniformEvaluator.evaluate(b)
        };

        let value = expand_and_evaluate(&mut tree, root, &counting).unwrap();
        assert_eq!(value, -1.0);
        assert_eq!(calls.get(), 0);
        assert_eq!(tree.nodes[root].terminal_value, Some(-1.0));
    }

    #[test]
    fn test_evaluator_failure_leaves_node_unexpanded() {
        let mut tree = MctsTree::new();
        let root = tree.initialize_root(Board::new());
        let broken = |_: &Board| -> Result<(Vec<f32>, f32)> { Ok((vec![1.0; 3], 0.0)) };

        let err = expand_and_evaluate(&mut tree, root, &broken).unwrap_err();
        assert!(matches!(err, MctsError::EvaluationFailed(_)));
        assert!(!tree.nodes[root].is_expanded);
    }
}
