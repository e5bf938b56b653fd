//! Core state type.
//!
//! A match state is the tuple `(b1, b2, r, owner)`: the two attacking
//! pieces' cells, the defender's cell, and the owner code. Owner 1 or 2
//! names the piece in possession; 0 (possession lost) and 3 (goal) are
//! absorbing. States serialize as plain 4-tuples so the state list and
//! opponent-policy files stay compact.

use serde::{Deserialize, Serialize};

use crate::constants::{OWNER_GOAL, OWNER_LOST, OWNER_PIECE_ONE};

/// One match state. Cells are 1–16, owner is 0–3.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(from = "(u8, u8, u8, u8)", into = "(u8, u8, u8, u8)")]
pub struct GameState {
    pub b1: u8,
    pub b2: u8,
    pub r: u8,
    pub owner: u8,
}

impl GameState {
    /// Kickoff position: pieces at 5 and 9, defender at 8, piece 1 on the ball.
    pub const KICKOFF: GameState = GameState {
        b1: 5,
        b2: 9,
        r: 8,
        owner: OWNER_PIECE_ONE,
    };

    pub const fn new(b1: u8, b2: u8, r: u8, owner: u8) -> Self {
        GameState { b1, b2, r, owner }
    }

    /// Absorbing states: possession lost or goal scored.
    #[inline(always)]
    pub fn is_terminal(&self) -> bool {
        self.owner == OWNER_LOST || self.owner == OWNER_GOAL
    }

    /// Cell of the piece currently in possession. Meaningless for
    /// terminal states.
    #[inline(always)]
    pub fn carrier(&self) -> u8 {
        if self.owner == OWNER_PIECE_ONE {
            self.b1
        } else {
            self.b2
        }
    }
}

impl From<(u8, u8, u8, u8)> for GameState {
    fn from((b1, b2, r, owner): (u8, u8, u8, u8)) -> Self {
        GameState { b1, b2, r, owner }
    }
}

impl From<GameState> for (u8, u8, u8, u8) {
    fn from(s: GameState) -> Self {
        (s.b1, s.b2, s.r, s.owner)
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.b1, self.b2, self.r, self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::OWNER_PIECE_TWO;

    #[test]
    fn test_terminal_classification() {
        assert!(GameState::new(5, 9, 8, OWNER_LOST).is_terminal());
        assert!(GameState::new(5, 9, 8, OWNER_GOAL).is_terminal());
        assert!(!GameState::new(5, 9, 8, OWNER_PIECE_ONE).is_terminal());
        assert!(!GameState::new(5, 9, 8, OWNER_PIECE_TWO).is_terminal());
    }

    #[test]
    fn test_carrier() {
        assert_eq!(GameState::new(5, 9, 8, OWNER_PIECE_ONE).carrier(), 5);
        assert_eq!(GameState::new(5, 9, 8, OWNER_PIECE_TWO).carrier(), 9);
    }

    #[test]
    fn test_serde_tuple_form() {
        let s = GameState::KICKOFF;
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "[5,9,8,1]");
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
