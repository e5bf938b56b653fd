//! Defender behavior: a per-state distribution over the four defender moves.
//!
//! The solver and simulator only ever read a distribution for a concrete
//! state; states without an entry fall back to the uniform distribution, so
//! an empty policy is the fully random defender.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    MOVE_DELTAS, NUM_DEFENDER_MOVES, OWNER_PIECE_ONE, OWNER_PIECE_TWO,
};
use crate::grid::{in_bounds, position_to_xy, xy_to_position};
use crate::types::GameState;

/// Distribution over defender moves in L, R, U, D order.
pub type MoveDistribution = [f64; NUM_DEFENDER_MOVES];

/// Fallback for states the policy file does not cover.
pub const UNIFORM_DISTRIBUTION: MoveDistribution = [0.25; NUM_DEFENDER_MOVES];

/// One serialized policy row: state plus its move distribution.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PolicyEntry {
    pub state: GameState,
    pub moves: MoveDistribution,
}

/// Mapping from state to defender move distribution.
#[derive(Clone, Debug, Default)]
pub struct OpponentPolicy {
    moves: HashMap<GameState, MoveDistribution>,
}

impl OpponentPolicy {
    /// The empty policy: every state resolves to the uniform fallback.
    pub fn uniform() -> Self {
        OpponentPolicy::default()
    }

    pub fn from_entries(entries: Vec<PolicyEntry>) -> Self {
        OpponentPolicy {
            moves: entries.into_iter().map(|e| (e.state, e.moves)).collect(),
        }
    }

    pub fn insert(&mut self, state: GameState, distribution: MoveDistribution) {
        self.moves.insert(state, distribution);
    }

    /// Distribution for `state`, uniform when absent.
    #[inline(always)]
    pub fn distribution(&self, state: &GameState) -> MoveDistribution {
        self.moves
            .get(state)
            .copied()
            .unwrap_or(UNIFORM_DISTRIBUTION)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Serializable rows in unspecified order.
    pub fn entries(&self) -> Vec<PolicyEntry> {
        self.moves
            .iter()
            .map(|(&state, &moves)| PolicyEntry { state, moves })
            .collect()
    }
}

/// Build the fully random policy with explicit rows for every non-terminal
/// state, so the file documents the distribution it plays.
pub fn random_policy(states: &[GameState]) -> OpponentPolicy {
    let mut policy = OpponentPolicy::uniform();
    for &state in states.iter().filter(|s| !s.is_terminal()) {
        policy.insert(state, UNIFORM_DISTRIBUTION);
    }
    policy
}

/// Build a chasing policy: the defender always plays the move that brings it
/// closest (Manhattan distance) to the ball carrier, first move winning ties.
/// A move off the pitch leaves the defender in place and is scored from its
/// current cell.
pub fn greedy_policy(states: &[GameState]) -> OpponentPolicy {
    let mut policy = OpponentPolicy::uniform();
    for &state in states.iter().filter(|s| !s.is_terminal()) {
        let carrier = if state.owner == OWNER_PIECE_ONE {
            state.b1
        } else {
            state.b2
        };
        debug_assert!(state.owner == OWNER_PIECE_ONE || state.owner == OWNER_PIECE_TWO);
        let (cx, cy) = position_to_xy(carrier);

        let mut best_move = 0usize;
        let mut best_dist = i32::MAX;
        for (i, &(dx, dy)) in MOVE_DELTAS.iter().enumerate() {
            let (rx, ry) = position_to_xy(state.r);
            let destination = if in_bounds(rx + dx, ry + dy) {
                xy_to_position(rx + dx, ry + dy)
            } else {
                state.r
            };
            let (nx, ny) = position_to_xy(destination);
            let dist = (nx - cx).abs() + (ny - cy).abs();
            if dist < best_dist {
                best_dist = dist;
                best_move = i;
            }
        }

        let mut distribution = [0.0; NUM_DEFENDER_MOVES];
        distribution[best_move] = 1.0;
        policy.insert(state, distribution);
    }
    policy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_fallback() {
        let policy = OpponentPolicy::uniform();
        let d = policy.distribution(&GameState::KICKOFF);
        assert_eq!(d, UNIFORM_DISTRIBUTION);
    }

    #[test]
    fn test_insert_overrides_fallback() {
        let mut policy = OpponentPolicy::uniform();
        policy.insert(GameState::KICKOFF, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(
            policy.distribution(&GameState::KICKOFF),
            [1.0, 0.0, 0.0, 0.0]
        );
        let other = GameState::new(1, 2, 3, 1);
        assert_eq!(policy.distribution(&other), UNIFORM_DISTRIBUTION);
    }

    #[test]
    fn test_greedy_chases_carrier() {
        // Defender at 8 (3,1), carrier at 5 (0,1): Left closes distance.
        let states = [GameState::KICKOFF];
        let policy = greedy_policy(&states);
        let d = policy.distribution(&GameState::KICKOFF);
        assert_eq!(d, [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_greedy_skips_terminal_states() {
        let states = [GameState::new(5, 9, 8, 0), GameState::new(5, 9, 8, 3)];
        let policy = greedy_policy(&states);
        assert!(policy.is_empty());
    }

    #[test]
    fn test_rows_sum_to_one() {
        let states: Vec<GameState> = (1..=16)
            .map(|r| GameState::new(5, 9, r, OWNER_PIECE_TWO))
            .collect();
        for policy in [random_policy(&states), greedy_policy(&states)] {
            for entry in policy.entries() {
                let total: f64 = entry.moves.iter().sum();
                assert!((total - 1.0).abs() < 1e-12);
            }
        }
    }
}
