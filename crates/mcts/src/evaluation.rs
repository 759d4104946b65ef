use mancala_core::{ACTION_SIZE, Board};

use crate::error::{MctsError, Result};

/// Minimal interface required from a position evaluator
///
/// `evaluate` returns `(priors, value)` where `priors` holds one entry per
/// board cell (`ACTION_SIZE`) and `value` is the expected outcome in [-1, 1]
/// for the player to move in `board`. Implementations must not rely on being
/// called in any particular order; the search treats them as pure.
pub trait Evaluator {
    fn evaluate(&self, board: &Board) -> Result<(Vec<f32>, f32)>;
}

impl<F> Evaluator for F
where
    F: Fn(&Board) -> Result<(Vec<f32>, f32)>,
{
    fn evaluate(&self, board: &Board) -> Result<(Vec<f32>, f32)> {
        self(board)
    }
}

/// Uniform priors and a neutral value. Turns the search into plain
/// visit-count MCTS driven only by terminal outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformEvaluator;

impl Evaluator for UniformEvaluator {
    fn evaluate(&self, _board: &Board) -> Result<(Vec<f32>, f32)> {
        Ok((vec![1.0 / ACTION_SIZE as f32; ACTION_SIZE], 0.0))
    }
}

/// Uniform priors, value from the store difference of the player to move
#[derive(Debug, Clone, Copy)]
pub struct StoreDifferenceEvaluator {
    /// Store difference that maps to tanh(1) ~ 0.76
    pub scale: f32,
}

impl Default for StoreDifferenceEvaluator {
    fn default() -> Self {
        Self { scale: 6.0 }
    }
}

impl Evaluator for StoreDifferenceEvaluator {
    fn evaluate(&self, board: &Board) -> Result<(Vec<f32>, f32)> {
        let me = board.turn();
        let diff = board.store(me) as f32 - board.store(me.opponent()) as f32;
        Ok((
            vec![1.0 / ACTION_SIZE as f32; ACTION_SIZE],
            (diff / self.scale).tanh(),
        ))
    }
}

/// Evaluate a position and validate the evaluator's output
///
/// Rejects prior vectors of the wrong length or with negative / non-finite
/// entries, and non-finite values.
pub fn evaluate_position<E: Evaluator + ?Sized>(
    board: &Board,
    evaluator: &E,
) -> Result<(Vec<f32>, f32)> {
    let (priors, value) = evaluator.evaluate(board)?;

    if priors.len() != ACTION_SIZE {
        return Err(MctsError::EvaluationFailed(format!(
            "Expected prior vector of length {}, got {}",
            ACTION_SIZE,
            priors.len()
        )));
    }

    if let Some((idx, p)) = priors
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p < 0.0)
    {
        return Err(MctsError::EvaluationFailed(format!(
            "Prior for action {idx} is not a probability: {p}"
        )));
    }

    if !value.is_finite() {
        return Err(MctsError::EvaluationFailed(format!(
            "Value estimate is not finite: {value}"
        )));
    }

    Ok((priors, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mancala_core::Player;

    #[test]
    fn test_uniform_evaluator_shape() {
        let (priors, value) = evaluate_position(&Board::new(), &UniformEvaluator).unwrap();
        assert_eq!(priors.len(), ACTION_SIZE);
        assert_relative_eq!(priors.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_store_difference_is_from_mover_view() {
        let board = Board::from_pits([4, 4, 4, 4, 4, 4, 6, 4, 4, 4, 0, 0, 0, 6], Player::Two)
            .unwrap();
        let (_, even) = evaluate_position(&board, &StoreDifferenceEvaluator::default()).unwrap();
        assert_eq!(even, 0.0);

        let board = Board::from_pits([4, 4, 4, 4, 4, 4, 12, 4, 4, 4, 0, 0, 0, 0], Player::Two)
            .unwrap();
        let (_, behind) = evaluate_position(&board, &StoreDifferenceEvaluator::default()).unwrap();
        assert_relative_eq!(behind, -(2.0f32).tanh(), epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let short = |_: &Board| -> Result<(Vec<f32>, f32)> { Ok((vec![0.5; 6], 0.0)) };
        let err = evaluate_position(&Board::new(), &short).unwrap_err();
        assert!(err.to_string().contains("length 14"));
    }

    #[test]
    fn test_rejects_bad_entries() {
        let nan = |_: &Board| -> Result<(Vec<f32>, f32)> {
            let mut priors = vec![0.1; ACTION_SIZE];
            priors[3] = f32::NAN;
            Ok((priors, 0.0))
        };
        assert!(evaluate_position(&Board::new(), &nan).is_err());

        let negative = |_: &Board| -> Result<(Vec<f32>, f32)> {
            let mut priors = vec![0.1; ACTION_SIZE];
            priors[0] = -0.1;
            Ok((priors, 0.0))
        };
        assert!(evaluate_position(&Board::new(), &negative).is_err());

        let bad_value =
            |_: &Board| -> Result<(Vec<f32>, f32)> { Ok((vec![0.1; ACTION_SIZE], f32::INFINITY)) };
        assert!(evaluate_position(&Board::new(), &bad_value).is_err());
    }

    #[test]
    fn test_evaluator_errors_pass_through() {
        let failing = |_: &Board| -> Result<(Vec<f32>, f32)> {
            Err(MctsError::EvaluationFailed("model unavailable".into()))
        };
        let err = evaluate_position(&Board::new(), &failing).unwrap_err();
        assert!(matches!(err, MctsError::EvaluationFailed(msg) if msg == "model unavailable"));
    }
}
