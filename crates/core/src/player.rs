use std::fmt;
use std::ops::Range;

use crate::board::{PLAYER_ONE_STORE, PLAYER_TWO_STORE};

/// One of the two sides of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index of this player's store
    pub fn store(self) -> usize {
        match self {
            Player::One => PLAYER_ONE_STORE,
            Player::Two => PLAYER_TWO_STORE,
        }
    }

    /// Indices of this player's six pits (stores excluded)
    pub fn pits(self) -> Range<usize> {
        match self {
            Player::One => 0..PLAYER_ONE_STORE,
            Player::Two => PLAYER_ONE_STORE + 1..PLAYER_TWO_STORE,
        }
    }

    pub fn owns_pit(self, pit: usize) -> bool {
        self.pits().contains(&pit)
    }

    /// Turn number used by the evaluator input encoding (1 or 2)
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Final result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner(Player),
    Tie,
}

impl Outcome {
    /// Outcome from `player`'s point of view: 1.0 win, -1.0 loss, 0.0 tie
    pub fn value_for(self, player: Player) -> f32 {
        match self {
            Outcome::Winner(winner) if winner == player => 1.0,
            Outcome::Winner(_) => -1.0,
            Outcome::Tie => 0.0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{player}"),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}
