use std::thread;

use anyhow::Result;
use crossbeam_channel::{Sender, bounded};
use mancala_mcts::Evaluator;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::config::SelfPlayConfig;
use crate::data::GameRecord;
use crate::game::play_game;
use crate::observer::TracingObserver;

/// A game finished by one of the workers
#[derive(Debug, Clone)]
pub struct FinishedGame {
    pub worker: usize,
    pub game: usize,
    pub record: GameRecord,
}

/// Totals reported once every worker has stopped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    pub completed: usize,
    pub failed: usize,
}

type WorkerMessage = std::result::Result<FinishedGame, (usize, usize)>;

/// Play `games_per_worker` games on each of `num_workers` threads.
///
/// Workers share nothing but the read-only evaluator; each owns its board,
/// its search trees and an RNG seeded with `seed + worker`. Finished games
/// are handed to `sink` on the calling thread in completion order. An episode
/// that fails is logged and abandoned and the worker moves on to its next
/// game. An error from `sink` stops the pool and is returned.
pub fn run_workers<E, F>(
    evaluator: &E,
    config: &SelfPlayConfig,
    num_workers: usize,
    games_per_worker: usize,
    seed: u64,
    mut sink: F,
) -> Result<WorkerSummary>
where
    E: Evaluator + Sync + ?Sized,
    F: FnMut(FinishedGame) -> Result<()>,
{
    let (tx, rx) = bounded::<WorkerMessage>(num_workers.max(1) * 2);

    thread::scope(|scope| {
        for worker in 0..num_workers {
            let tx = tx.clone();
            scope.spawn(move || {
                worker_loop(evaluator, config, worker, games_per_worker, seed, tx)
            });
        }
        // Only the workers hold senders now; the loop below ends when they all finish
        drop(tx);

        let mut summary = WorkerSummary::default();
        for message in rx {
            match message {
                Ok(game) => {
                    sink(game)?;
                    summary.completed += 1;
                }
                Err(_) => summary.failed += 1,
            }
        }

        info!(
            completed = summary.completed,
            failed = summary.failed,
            "Self-play workers finished"
        );
        Ok(summary)
    })
}

fn worker_loop<E: Evaluator + ?Sized>(
    evaluator: &E,
    config: &SelfPlayConfig,
    worker: usize,
    games: usize,
    seed: u64,
    tx: Sender<WorkerMessage>,
) {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(worker as u64));
    info!(worker, games, "Starting self-play worker");

    for game in 0..games {
        let mut observer = TracingObserver::new(worker, game);
        let message = match play_game(evaluator, config, &mut rng, &mut observer) {
            Ok(record) => Ok(FinishedGame {
                worker,
                game,
                record,
            }),
            Err(err) => {
                warn!(worker, game, error = %err, "Abandoning self-play episode");
                Err((worker, game))
            }
        };

        if tx.send(message).is_err() {
            debug!(worker, "Result channel closed, stopping worker");
            break;
        }
    }
}
