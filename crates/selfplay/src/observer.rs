use mancala_core::Board;
use tracing::{debug, info};

use crate::data::GameRecord;

/// Side channel for progress reporting during self-play
///
/// Both hooks default to doing nothing.
pub trait SelfPlayObserver {
    /// Called after move `move_number` (zero-based) was applied
    fn on_move(&mut self, _move_number: usize, _board: &Board, _action: usize) {}

    /// Called once the game is over
    fn on_game_end(&mut self, _record: &GameRecord) {}
}

#[derive(Debug, Default)]
pub struct NoopObserver;

impl SelfPlayObserver for NoopObserver {}

/// Reports moves at debug level and finished games at info level
#[derive(Debug)]
pub struct TracingObserver {
    worker: usize,
    game: usize,
}

impl TracingObserver {
    pub fn new(worker: usize, game: usize) -> Self {
        Self { worker, game }
    }
}

impl SelfPlayObserver for TracingObserver {
    fn on_move(&mut self, move_number: usize, board: &Board, action: usize) {
        debug!(
            worker = self.worker,
            game = self.game,
            move_number,
            action,
            "Move played\n{board}"
        );
    }

    fn on_game_end(&mut self, record: &GameRecord) {
        info!(
            worker = self.worker,
            game = self.game,
            moves = record.len(),
            outcome = %record.outcome,
            "Game finished"
        );
    }
}
