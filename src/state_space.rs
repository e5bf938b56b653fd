//! Exhaustive state enumeration.
//!
//! The solver consumes the state list from a file and does not care where it
//! came from; this module is what `gridball-precompute` uses to build that
//! file. The full product (every placement of both pieces and the defender
//! times every owner code) is closed under the transition model, so nothing
//! reachable is ever missing.

use crate::constants::{NUM_CELLS, OWNER_GOAL};
use crate::types::GameState;

/// Every state tuple, terminal owner codes included: 16 × 16 × 16 × 4.
pub fn enumerate_states() -> Vec<GameState> {
    let mut states =
        Vec::with_capacity(NUM_CELLS as usize * NUM_CELLS as usize * NUM_CELLS as usize * 4);
    for b1 in 1..=NUM_CELLS {
        for b2 in 1..=NUM_CELLS {
            for r in 1..=NUM_CELLS {
                for owner in 0..=OWNER_GOAL {
                    states.push(GameState::new(b1, b2, r, owner));
                }
            }
        }
    }
    states
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_size() {
        assert_eq!(enumerate_states().len(), 16 * 16 * 16 * 4);
    }

    #[test]
    fn test_enumeration_has_no_duplicates() {
        let states = enumerate_states();
        let unique: std::collections::HashSet<_> = states.iter().copied().collect();
        assert_eq!(unique.len(), states.len());
    }

    #[test]
    fn test_enumeration_contains_kickoff() {
        assert!(enumerate_states().contains(&GameState::KICKOFF));
    }

    #[test]
    fn test_half_the_states_are_terminal() {
        let states = enumerate_states();
        let terminal = states.iter().filter(|s| s.is_terminal()).count();
        assert_eq!(terminal * 2, states.len());
    }
}
