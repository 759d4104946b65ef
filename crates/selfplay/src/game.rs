use anyhow::Result;
use mancala_core::{Board, Outcome, Player};
use mancala_mcts::{Evaluator, Mcts};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::config::SelfPlayConfig;
use crate::data::{GameRecord, TrainingExample};
use crate::observer::SelfPlayObserver;

/// Play a single self-play game
///
/// Every move runs a fresh search from the current position, extracts a
/// policy at the scheduled temperature and samples the move to play from that
/// policy restricted to the legal moves.
///
/// # Returns
/// A complete game record with all pre-move states, policies, and the final result
pub fn play_game<E, R, O>(
    evaluator: &E,
    config: &SelfPlayConfig,
    rng: &mut R,
    observer: &mut O,
) -> Result<GameRecord>
where
    E: Evaluator + ?Sized,
    R: Rng + ?Sized,
    O: SelfPlayObserver + ?Sized,
{
    let mut board = Board::new();
    let mut record = GameRecord::new();
    let mut move_count = 0;

    while !board.is_game_over() && !board.legal_moves().is_empty() {
        let mcts_config = config
            .mcts
            .clone()
            .with_temperature(config.temperature_for_move(move_count));

        // The tree lives only for this move
        let result = Mcts::new().search(&board, evaluator, &mcts_config, rng)?;

        let action = sample_move(&board, &result.policy_distribution, rng)?;

        record.add_move(board.clone(), result.policy_distribution, action);
        board.apply_move(action)?;

        observer.on_move(move_count, &board, action);
        move_count += 1;
    }

    record.set_outcome(board.winner());
    observer.on_game_end(&record);

    Ok(record)
}

/// Sample a legal move from a full action-space policy
pub fn sample_move<R: Rng + ?Sized>(board: &Board, policy: &[f32], rng: &mut R) -> Result<usize> {
    let move_probs = board.policy_for_legal_moves(policy);
    if move_probs.is_empty() {
        anyhow::bail!("No legal moves to sample from");
    }

    let dist = WeightedIndex::new(move_probs.iter().map(|&(_, p)| p))
        .map_err(|e| anyhow::anyhow!("Invalid move distribution: {e}"))?;

    Ok(move_probs[dist.sample(rng)].0)
}

/// Convert game record to training examples
///
/// Each position in the game is converted to a training example with:
/// - state: the encoded board
/// - policy: the MCTS policy distribution
/// - value: the game outcome from the perspective of the player to move
pub fn game_to_training_examples(record: &GameRecord) -> Vec<TrainingExample> {
    record
        .states
        .iter()
        .zip(record.policies.iter())
        .enumerate()
        .map(|(move_index, (state, policy))| {
            TrainingExample::new(
                state.encode().to_vec(),
                policy.clone(),
                calculate_value(move_index, state.turn(), record.outcome),
            )
        })
        .collect()
}

/// Calculate the value target for a position
///
/// Returns the outcome for `mover`: +1.0 win, -1.0 loss, 0.0 tie. The opening
/// position (`move_index == 0`) is always labeled 0.0, whatever the result.
fn calculate_value(move_index: usize, mover: Player, outcome: Outcome) -> f32 {
    if move_index == 0 {
        return 0.0;
    }
    outcome.value_for(mover)
}
