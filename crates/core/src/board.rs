use std::fmt;

use crate::error::BoardError;
use crate::player::{Outcome, Player};

/// Number of cells on the board: twelve pits and two stores
pub const BOARD_CELLS: usize = 14;

/// Size of the evaluator's action space, one entry per board cell
pub const ACTION_SIZE: usize = BOARD_CELLS;

/// Length of the evaluator input: every cell plus the turn field
pub const ENCODED_LEN: usize = BOARD_CELLS + 1;

pub const PITS_PER_SIDE: usize = 6;
pub const PLAYER_ONE_STORE: usize = 6;
pub const PLAYER_TWO_STORE: usize = 13;
pub const MARBLES_PER_PIT: u8 = 4;
pub const TOTAL_MARBLES: u32 = 48;

/// A store holding more than this many marbles cannot be caught
pub const MAJORITY: u32 = TOTAL_MARBLES / 2;

const OPPOSITE: [Option<usize>; BOARD_CELLS] = {
    let mut table = [None; BOARD_CELLS];
    let mut pit = 0;
    while pit < BOARD_CELLS {
        if pit != PLAYER_ONE_STORE && pit != PLAYER_TWO_STORE {
            table[pit] = Some(12 - pit);
        }
        pit += 1;
    }
    table
};

/// What a single move did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffect {
    /// Cell that received the last sown marble
    pub last_pit: usize,
    /// Marbles taken from the opposite pit (0 when no capture happened)
    pub captured: u8,
    /// The last marble landed in the mover's store
    pub free_turn: bool,
    /// The move ended the game and triggered the sweep
    pub game_over: bool,
}

/// Mancala game state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    pits: [u8; BOARD_CELLS],
    turn: Player,
    game_over: bool,
}

impl Board {
    /// Starting position: four marbles per pit, empty stores, player one to move
    pub fn new() -> Self {
        let mut pits = [MARBLES_PER_PIT; BOARD_CELLS];
        pits[PLAYER_ONE_STORE] = 0;
        pits[PLAYER_TWO_STORE] = 0;
        Self {
            pits,
            turn: Player::One,
            game_over: false,
        }
    }

    /// Build an arbitrary position.
    ///
    /// The marble total must be `TOTAL_MARBLES`. A position that already meets
    /// an end condition is swept immediately.
    pub fn from_pits(pits: [u8; BOARD_CELLS], turn: Player) -> Result<Self, BoardError> {
        let found = pits.iter().map(|&p| p as u32).sum::<u32>();
        if found != TOTAL_MARBLES {
            return Err(BoardError::MarbleCount {
                expected: TOTAL_MARBLES,
                found,
            });
        }

        let mut board = Self {
            pits,
            turn,
            game_over: false,
        };
        if board.reached_end() {
            board.sweep();
        }
        Ok(board)
    }

    pub fn pits(&self) -> &[u8; BOARD_CELLS] {
        &self.pits
    }

    /// Player to move (after the game ends: the player who made the last move)
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn store(&self, player: Player) -> u8 {
        self.pits[player.store()]
    }

    pub fn total_marbles(&self) -> u32 {
        self.pits.iter().map(|&p| p as u32).sum()
    }

    /// Re-check the board invariants: the marble total is conserved and a
    /// finished game has nothing left outside the stores.
    pub fn is_consistent(&self) -> bool {
        if self.total_marbles() != TOTAL_MARBLES {
            return false;
        }
        !self.game_over || (self.side_is_empty(Player::One) && self.side_is_empty(Player::Two))
    }

    /// Non-empty pits on the mover's side, in index order
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.game_over {
            return Vec::new();
        }
        self.turn.pits().filter(|&pit| self.pits[pit] > 0).collect()
    }

    pub fn is_legal_move(&self, pit: usize) -> bool {
        !self.game_over && self.turn.owns_pit(pit) && self.pits[pit] > 0
    }

    /// The pit facing `pit` across the board, `None` for stores
    pub fn opposite_pit(pit: usize) -> Option<usize> {
        OPPOSITE.get(pit).copied().flatten()
    }

    /// Sow the marbles of `pit` for the player to move.
    pub fn apply_move(&mut self, pit: usize) -> Result<MoveEffect, BoardError> {
        if self.game_over {
            return Err(BoardError::GameOver);
        }
        if !self.is_legal_move(pit) {
            return Err(BoardError::InvalidMove {
                pit,
                player: self.turn,
            });
        }

        let mover = self.turn;
        let mut marbles = self.pits[pit];
        self.pits[pit] = 0;

        let mut last = pit;
        while marbles > 0 {
            last = Self::next_sowing_pit(last, mover);
            self.pits[last] += 1;
            marbles -= 1;
        }

        let captured = self.capture(last, mover);
        let free_turn = last == mover.store();

        let game_over = self.reached_end();
        if game_over {
            self.sweep();
        } else if !free_turn {
            self.turn = mover.opponent();
        }

        Ok(MoveEffect {
            last_pit: last,
            captured,
            free_turn,
            game_over,
        })
    }

    /// Result of the game, `None` while it is still running
    pub fn outcome(&self) -> Option<Outcome> {
        self.game_over.then(|| self.winner())
    }

    /// Compare the two stores as they stand
    pub fn winner(&self) -> Outcome {
        let one = self.store(Player::One);
        let two = self.store(Player::Two);
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Outcome::Winner(Player::One),
            std::cmp::Ordering::Less => Outcome::Winner(Player::Two),
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    /// Evaluator input: the 14 cell counts followed by the turn number
    pub fn encode(&self) -> [f32; ENCODED_LEN] {
        let mut encoded = [0f32; ENCODED_LEN];
        for (slot, &count) in encoded.iter_mut().zip(self.pits.iter()) {
            *slot = count as f32;
        }
        encoded[BOARD_CELLS] = self.turn.number() as f32;
        encoded
    }

    /// Restrict a full action-space policy to the legal moves and renormalize.
    ///
    /// Negative or missing entries count as zero. If no probability mass is
    /// left the result is uniform over the legal moves.
    pub fn policy_for_legal_moves(&self, policy: &[f32]) -> Vec<(usize, f32)> {
        let legal = self.legal_moves();
        let weights: Vec<f32> = legal
            .iter()
            .map(|&pit| policy.get(pit).copied().unwrap_or(0.0).max(0.0))
            .collect();
        let sum: f32 = weights.iter().sum();

        if sum > 0.0 && sum.is_finite() {
            legal.into_iter().zip(weights).map(|(pit, w)| (pit, w / sum)).collect()
        } else {
            let uniform = 1.0 / legal.len().max(1) as f32;
            legal.into_iter().map(|pit| (pit, uniform)).collect()
        }
    }

    fn next_sowing_pit(pit: usize, mover: Player) -> usize {
        let next = (pit + 1) % BOARD_CELLS;
        if next == mover.opponent().store() {
            (next + 1) % BOARD_CELLS
        } else {
            next
        }
    }

    /// Last marble landed alone in one of the mover's own pits: take it and
    /// everything opposite into the mover's store.
    fn capture(&mut self, last: usize, mover: Player) -> u8 {
        if self.pits[last] != 1 || !mover.owns_pit(last) {
            return 0;
        }
        let Some(opposite) = Self::opposite_pit(last) else {
            return 0;
        };

        let stolen = self.pits[opposite];
        if stolen == 0 {
            return 0;
        }

        self.pits[last] = 0;
        self.pits[opposite] = 0;
        self.pits[mover.store()] += stolen + 1;
        stolen
    }

    fn side_is_empty(&self, player: Player) -> bool {
        player.pits().all(|pit| self.pits[pit] == 0)
    }

    fn reached_end(&self) -> bool {
        self.store(Player::One) as u32 > MAJORITY
            || self.store(Player::Two) as u32 > MAJORITY
            || self.side_is_empty(Player::One)
            || self.side_is_empty(Player::Two)
    }

    /// Move every marble left on a side into that side's store and end the game
    fn sweep(&mut self) {
        for player in [Player::One, Player::Two] {
            let remaining: u8 = player.pits().map(|pit| self.pits[pit]).sum();
            for pit in player.pits() {
                self.pits[pit] = 0;
            }
            self.pits[player.store()] += remaining;
        }
        self.game_over = true;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.pits;
        writeln!(f, "{} to move", self.turn)?;
        writeln!(
            f,
            "      12:{:<3}11:{:<3}10:{:<3} 9:{:<3} 8:{:<3} 7:{:<3}",
            p[12], p[11], p[10], p[9], p[8], p[7]
        )?;
        writeln!(f, "P2:{:<3}{:>41}", p[13], format!("P1:{}", p[6]))?;
        write!(
            f,
            "       0:{:<3} 1:{:<3} 2:{:<3} 3:{:<3} 4:{:<3} 5:{:<3}",
            p[0], p[1], p[2], p[3], p[4], p[5]
        )
    }
}
