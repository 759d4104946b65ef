//! Kalah-style Mancala rules engine
//!
//! The board is a flat array of 14 cells:
//!
//! ```text
//!        12  11  10 |  9   8   7
//!   13                           6
//!         0   1   2 |  3   4   5
//! ```
//!
//! Cells 0-5 are player one's pits and 6 is player one's store; cells 7-12
//! are player two's pits and 13 is player two's store. Sowing runs in index
//! order and skips the opponent's store.

mod board;
mod error;
mod player;

pub use board::{
    ACTION_SIZE, BOARD_CELLS, Board, ENCODED_LEN, MAJORITY, MARBLES_PER_PIT, MoveEffect,
    PITS_PER_SIDE, PLAYER_ONE_STORE, PLAYER_TWO_STORE, TOTAL_MARBLES,
};
pub use error::BoardError;
pub use player::{Outcome, Player};
