use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mancala_core::{ACTION_SIZE, ENCODED_LEN};
use ndarray::{Array, Array1, Array2};
use ndarray_npy::write_npy;
use tracing::debug;

use crate::data::TrainingExample;
use crate::game::game_to_training_examples;
use crate::worker::FinishedGame;

/// Save training data to NPY files
///
/// Creates three separate files:
/// - `{path}_states.npy`: (N, 15) encoded boards
/// - `{path}_policies.npy`: (N, 14) policy distributions
/// - `{path}_values.npy`: (N,) value targets
///
/// # Example
/// ```no_run
/// use mancala_selfplay::storage::save_training_data;
/// use mancala_selfplay::TrainingExample;
///
/// let examples = vec![
///     TrainingExample::new(vec![0.0; 15], vec![0.0; 14], 1.0),
/// ];
/// save_training_data(&examples, "selfplay_data").unwrap();
/// // Creates: selfplay_data_states.npy, selfplay_data_policies.npy, selfplay_data_values.npy
/// ```
pub fn save_training_data(examples: &[TrainingExample], path: &str) -> Result<()> {
    if examples.is_empty() {
        anyhow::bail!("Cannot save empty training data");
    }

    let states: Vec<f32> = examples
        .iter()
        .flat_map(|e| e.state.iter().copied())
        .collect();
    let states_array: Array2<f32> = Array::from_shape_vec((examples.len(), ENCODED_LEN), states)
        .context("state vectors must have 15 entries")?;

    let policies: Vec<f32> = examples
        .iter()
        .flat_map(|e| e.policy.iter().copied())
        .collect();
    let policies_array: Array2<f32> =
        Array::from_shape_vec((examples.len(), ACTION_SIZE), policies)
            .context("policy vectors must have 14 entries")?;

    let values: Vec<f32> = examples.iter().map(|e| e.value).collect();
    let values_array: Array1<f32> = Array::from_vec(values);

    write_npy(format!("{}_states.npy", path), &states_array)?;
    write_npy(format!("{}_policies.npy", path), &policies_array)?;
    write_npy(format!("{}_values.npy", path), &values_array)?;

    debug!(path, examples = examples.len(), "Saved training data");
    Ok(())
}

/// Base path (without the npy suffixes) for one game's dataset
///
/// Layout: `{dir}/iter_{iteration}/dataset_iter{iteration}_worker{worker}_{game}`
pub fn dataset_path(dir: &Path, iteration: u32, worker: usize, game: usize) -> PathBuf {
    dir.join(format!("iter_{iteration}"))
        .join(format!("dataset_iter{iteration}_worker{worker}_{game}"))
}

/// Label a finished game and write it under `dir`, creating directories as needed
pub fn save_game(dir: &Path, iteration: u32, finished: &FinishedGame) -> Result<PathBuf> {
    let base = dataset_path(dir, iteration, finished.worker, finished.game);
    if let Some(parent) = base.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating dataset directory {}", parent.display()))?;
    }

    let examples = game_to_training_examples(&finished.record);
    let base_str = base
        .to_str()
        .with_context(|| format!("dataset path is not valid UTF-8: {}", base.display()))?;
    save_training_data(&examples, base_str)?;

    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameRecord;
    use mancala_core::{Board, Outcome, Player};
    use ndarray_npy::read_npy;

    #[test]
    fn test_save_and_load_training_data() {
        let base_path = std::env::temp_dir().join(format!("mancala_selfplay_{}", std::process::id()));
        let base_path_str = base_path.to_str().unwrap();

        let examples = vec![
            TrainingExample::new(vec![1.0; 15], vec![0.5; 14], 1.0),
            TrainingExample::new(vec![0.0; 15], vec![0.1; 14], -1.0),
        ];

        save_training_data(&examples, base_path_str).unwrap();

        let states_path = format!("{}_states.npy", base_path_str);
        let policies_path = format!("{}_policies.npy", base_path_str);
        let values_path = format!("{}_values.npy", base_path_str);

        let states: Array2<f32> = read_npy(&states_path).unwrap();
        let policies: Array2<f32> = read_npy(&policies_path).unwrap();
        let values: Array1<f32> = read_npy(&values_path).unwrap();

        assert_eq!(states.shape(), &[2, 15]);
        assert_eq!(policies.shape(), &[2, 14]);
        assert_eq!(values.shape(), &[2]);
        assert_eq!(values[0], 1.0);
        assert_eq!(values[1], -1.0);

        fs::remove_file(states_path).ok();
        fs::remove_file(policies_path).ok();
        fs::remove_file(values_path).ok();
    }

    #[test]
    fn test_save_empty_data_fails() {
        let examples: Vec<TrainingExample> = vec![];
        assert!(save_training_data(&examples, "test").is_err());
    }

    #[test]
    fn test_wrong_shape_fails() {
        let examples = vec![TrainingExample::new(vec![0.0; 64], vec![0.0; 14], 0.0)];
        assert!(save_training_data(&examples, "unused").is_err());
    }

    #[test]
    fn test_dataset_path_layout() {
        let path = dataset_path(Path::new("datasets"), 3, 1, 42);
        assert_eq!(
            path,
            Path::new("datasets/iter_3/dataset_iter3_worker1_42")
        );
    }

    #[test]
    fn test_save_game_creates_directories() {
        let dir = std::env::temp_dir().join(format!("mancala_datasets_{}", std::process::id()));

        let mut record = GameRecord::new();
        let mut board = Board::new();
        let mut policy = vec![0.0; 14];
        policy[2] = 1.0;
        record.add_move(board.clone(), policy.clone(), 2);
        board.apply_move(2).unwrap();
        record.add_move(board.clone(), policy, 2);
        record.set_outcome(Outcome::Winner(Player::One));

        let finished = FinishedGame {
            worker: 0,
            game: 7,
            record,
        };
        let base = save_game(&dir, 0, &finished).unwrap();

        let values: Array1<f32> =
            read_npy(format!("{}_values.npy", base.to_str().unwrap())).unwrap();
        assert_eq!(values.to_vec(), vec![0.0, 1.0]);

        fs::remove_dir_all(&dir).ok();
    }
}
