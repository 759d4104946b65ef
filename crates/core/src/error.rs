use thiserror::Error;

use crate::player::Player;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid move: pit {pit} is not playable for {player}")]
    InvalidMove { pit: usize, player: Player },

    #[error("Game is already over")]
    GameOver,

    #[error("Board holds {found} marbles, expected {expected}")]
    MarbleCount { expected: u32, found: u32 },
}
