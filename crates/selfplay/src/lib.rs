//! Self-play data generation for Mancala
//!
//! This crate provides functionality for:
//! - Playing self-play games using MCTS with a temperature schedule
//! - Recording game states and policies
//! - Converting games to labeled training examples
//! - Running independent games on a pool of worker threads
//! - Saving training data to NPY files for Python/PyTorch
//!
//! # Example
//!
//! ```no_run
//! use mancala_mcts::{MctsConfig, StoreDifferenceEvaluator};
//! use mancala_selfplay::{NoopObserver, SelfPlayConfig, game_to_training_examples, play_game, save_training_data};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = SelfPlayConfig::new(MctsConfig::default().with_simulations(200));
//! let mut rng = StdRng::seed_from_u64(0);
//!
//! // Play one game
//! let record = play_game(&StoreDifferenceEvaluator::default(), &config, &mut rng, &mut NoopObserver)?;
//! println!("Game finished with {} moves: {}", record.len(), record.outcome);
//!
//! // Convert to training examples
//! let examples = game_to_training_examples(&record);
//!
//! // Save to files
//! save_training_data(&examples, "selfplay_data")?;
//! # Ok(())
//! # }
//! ```

mod config;
mod data;
mod game;
mod observer;
pub mod storage;
mod worker;

// Re-export public API
pub use config::SelfPlayConfig;
pub use data::{GameRecord, TrainingExample};
pub use game::{game_to_training_examples, play_game, sample_move};
pub use observer::{NoopObserver, SelfPlayObserver, TracingObserver};
pub use storage::{dataset_path, save_game, save_training_data};
pub use worker::{FinishedGame, WorkerSummary, run_workers};
