//! Self-play data generator for Mancala
//!
//! Runs independent MCTS self-play games on a pool of worker threads and
//! writes one labeled dataset per finished game under
//! `{output_dir}/iter_{iteration}/`.

use anyhow::Result;
use clap::Parser;
use mancala_mcts::{Evaluator, StoreDifferenceEvaluator, UniformEvaluator};
use mancala_selfplay::{run_workers, save_game};
use tracing::{error, info, warn};

mod config;

use crate::config::{Config, EvaluatorKind};

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level);
    info!(
        workers = config.workers,
        games_per_worker = config.games_per_worker,
        simulations = config.simulations,
        evaluator = ?config.evaluator,
        "Starting Mancala self-play"
    );

    let evaluator: Box<dyn Evaluator + Sync> = match config.evaluator {
        EvaluatorKind::Uniform => Box::new(UniformEvaluator),
        EvaluatorKind::StoreDifference => Box::new(StoreDifferenceEvaluator::default()),
    };

    let selfplay = config.selfplay_config();
    let result = run_workers(
        evaluator.as_ref(),
        &selfplay,
        config.workers,
        config.games_per_worker,
        config.seed,
        |finished| {
            let path = save_game(&config.output_dir, config.iteration, &finished)?;
            info!(
                worker = finished.worker,
                game = finished.game,
                outcome = %finished.record.outcome,
                path = %path.display(),
                "Saved dataset"
            );
            Ok(())
        },
    );

    match result {
        Ok(summary) => {
            if summary.failed > 0 {
                warn!(failed = summary.failed, "Some self-play episodes were abandoned");
            }
            info!(completed = summary.completed, "Self-play finished");
            Ok(())
        }
        Err(e) => {
            error!("Self-play failed: {e:#}");
            Err(e)
        }
    }
}
