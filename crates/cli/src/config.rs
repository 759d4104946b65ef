//! Command-line configuration for the self-play binary
//!
//! Every option can also be supplied through a `MANCALA_*` environment
//! variable; command-line arguments win.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use mancala_mcts::MctsConfig;
use mancala_selfplay::SelfPlayConfig;
use tracing::level_filters::LevelFilter;

/// Position evaluator used to guide the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EvaluatorKind {
    /// Uniform priors, neutral value
    Uniform,
    /// Uniform priors, value from the store difference
    StoreDifference,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "mancala-selfplay")]
#[command(about = "Generate Mancala self-play training data with MCTS")]
pub struct Config {
    /// Number of worker threads, each playing its own games
    #[arg(long, env = "MANCALA_WORKERS", default_value_t = 1)]
    pub workers: usize,

    /// Games played by every worker
    #[arg(long, env = "MANCALA_GAMES_PER_WORKER", default_value_t = 100)]
    pub games_per_worker: usize,

    /// MCTS simulations per move
    #[arg(long, env = "MANCALA_SIMULATIONS", default_value_t = 777)]
    pub simulations: u32,

    /// PUCT exploration constant
    #[arg(long, env = "MANCALA_C_PUCT", default_value_t = 1.0)]
    pub c_puct: f32,

    /// Policy temperature for the opening moves
    #[arg(long, env = "MANCALA_TEMPERATURE", default_value_t = 1.1)]
    pub temperature: f32,

    /// Number of opening moves played at --temperature
    #[arg(long, env = "MANCALA_TEMPERATURE_THRESHOLD", default_value_t = 11)]
    pub temperature_threshold: usize,

    /// Policy temperature after the opening
    #[arg(long, env = "MANCALA_LATE_TEMPERATURE", default_value_t = 0.1)]
    pub late_temperature: f32,

    /// Dirichlet alpha for root noise (0 disables noise)
    #[arg(long, env = "MANCALA_DIRICHLET_ALPHA", default_value_t = 0.0)]
    pub dirichlet_alpha: f32,

    /// Share of the root prior replaced by noise
    #[arg(long, env = "MANCALA_DIRICHLET_EPSILON", default_value_t = 0.25)]
    pub dirichlet_epsilon: f32,

    /// Position evaluator
    #[arg(long, env = "MANCALA_EVALUATOR", value_enum, default_value_t = EvaluatorKind::StoreDifference)]
    pub evaluator: EvaluatorKind,

    /// Base RNG seed; worker N uses seed + N
    #[arg(long, env = "MANCALA_SEED", default_value_t = 0)]
    pub seed: u64,

    /// Root directory for datasets
    #[arg(long, env = "MANCALA_OUTPUT_DIR", default_value = "datasets")]
    pub output_dir: PathBuf,

    /// Training iteration the datasets belong to
    #[arg(long, env = "MANCALA_ITERATION", default_value_t = 0)]
    pub iteration: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MANCALA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(anyhow!("workers must be greater than 0"));
        }

        if self.simulations == 0 {
            return Err(anyhow!("simulations must be greater than 0"));
        }

        if !is_positive(self.c_puct) {
            return Err(anyhow!("c_puct must be positive"));
        }

        if !is_positive(self.temperature) || !is_positive(self.late_temperature) {
            return Err(anyhow!("temperatures must be positive"));
        }

        if self.dirichlet_alpha < 0.0 || !(0.0..=1.0).contains(&self.dirichlet_epsilon) {
            return Err(anyhow!(
                "dirichlet_alpha must be >= 0 and dirichlet_epsilon within [0, 1]"
            ));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn selfplay_config(&self) -> SelfPlayConfig {
        let mut mcts = MctsConfig::default()
            .with_simulations(self.simulations)
            .with_c_puct(self.c_puct);
        if self.dirichlet_alpha > 0.0 {
            mcts = mcts.with_dirichlet_noise(self.dirichlet_alpha, self.dirichlet_epsilon);
        }

        SelfPlayConfig::new(mcts).with_temperature_schedule(
            self.temperature,
            self.temperature_threshold,
            self.late_temperature,
        )
    }
}

fn is_positive(x: f32) -> bool {
    x.is_finite() && x > 0.0
}
