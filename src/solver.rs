//! Value iteration: solve the match MDP and extract the greedy policy.
//!
//! Sweeps the supplied state list repeatedly, applying Bellman optimality
//! updates in place, so later states in a sweep observe values already updated
//! earlier in the same sweep. Terminal states are skipped and never carry a
//! value or a policy entry; absent values read as 0.0, which is exactly what
//! an absorbing state is worth after its terminal reward has been paid out.
//!
//! Ties between actions resolve to the lowest action index (strict `>`
//! comparison in ascending action order), so the extracted policy is
//! deterministic for a given state list.

use std::collections::HashMap;
use std::time::Instant;

use thiserror::Error;

use crate::constants::{CONVERGENCE_THRESHOLD, GAMMA, MAX_SWEEPS, NUM_ACTIONS};
use crate::opponent::OpponentPolicy;
use crate::transition::{transitions_into, ModelParams, Transition};
use crate::types::GameState;

/// Expected discounted return per state, 0.0 for anything never swept.
#[derive(Clone, Debug, Default)]
pub struct ValueFunction {
    values: HashMap<GameState, f64>,
}

impl ValueFunction {
    pub fn new() -> Self {
        ValueFunction::default()
    }

    /// Value of `state`, defaulting to 0.0 for unseen states. Terminal
    /// successors always hit the default.
    #[inline(always)]
    pub fn get(&self, state: &GameState) -> f64 {
        self.values.get(state).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, state: GameState, value: f64) {
        self.values.insert(state, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GameState, &f64)> {
        self.values.iter()
    }
}

/// Greedy action per non-terminal state.
#[derive(Clone, Debug, Default)]
pub struct Policy {
    actions: HashMap<GameState, usize>,
}

impl Policy {
    pub fn new() -> Self {
        Policy::default()
    }

    #[inline(always)]
    pub fn action(&self, state: &GameState) -> Option<usize> {
        self.actions.get(state).copied()
    }

    pub fn set(&mut self, state: GameState, action: usize) {
        self.actions.insert(state, action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GameState, &usize)> {
        self.actions.iter()
    }
}

/// Converged value function and greedy policy, plus how long it took.
pub struct Solution {
    pub values: ValueFunction,
    pub policy: Policy,
    pub sweeps: usize,
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("value iteration did not converge after {sweeps} sweeps (delta {delta:.3e})")]
    NonConvergence { sweeps: usize, delta: f64 },
}

/// Run value iteration over `all_states` until the largest per-state change
/// in a sweep falls below [`CONVERGENCE_THRESHOLD`], or fail after
/// [`MAX_SWEEPS`] sweeps.
pub fn value_iteration(
    all_states: &[GameState],
    opponent: &OpponentPolicy,
    params: &ModelParams,
) -> Result<Solution, SolveError> {
    let start = Instant::now();
    let mut values = ValueFunction::new();
    let mut policy = Policy::new();
    let mut buffer: Vec<Transition> = Vec::with_capacity(16);
    let mut sweeps = 0usize;

    loop {
        let mut delta = 0.0f64;

        for &state in all_states {
            if state.is_terminal() {
                continue;
            }

            let mut max_value = f64::NEG_INFINITY;
            let mut best_action = 0usize;

            for action in 0..NUM_ACTIONS {
                transitions_into(state, action, opponent, params, &mut buffer);
                let mut value = 0.0;
                for t in &buffer {
                    value += t.prob * (t.reward + GAMMA * values.get(&t.next));
                }
                if value > max_value {
                    max_value = value;
                    best_action = action;
                }
            }

            delta = delta.max((values.get(&state) - max_value).abs());
            values.set(state, max_value);
            policy.set(state, best_action);
        }

        sweeps += 1;
        if delta < CONVERGENCE_THRESHOLD {
            println!(
                "Value iteration converged after {} sweeps (delta {:.2e}, {:.1} ms)",
                sweeps,
                delta,
                start.elapsed().as_secs_f64() * 1000.0
            );
            break;
        }
        if sweeps >= MAX_SWEEPS {
            return Err(SolveError::NonConvergence { sweeps, delta });
        }
    }

    Ok(Solution {
        values,
        policy,
        sweeps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ACTION_SHOOT, OWNER_PIECE_ONE};

    #[test]
    fn test_value_function_defaults_to_zero() {
        let values = ValueFunction::new();
        assert_eq!(values.get(&GameState::KICKOFF), 0.0);
    }

    #[test]
    fn test_sure_shot_dominates() {
        // Carrier on the goal column with q = 1: shooting always scores and
        // the state is worth exactly the goal reward.
        let state = GameState::new(8, 9, 1, OWNER_PIECE_ONE);
        let params = ModelParams { p: 0.0, q: 1.0 };
        let solution =
            value_iteration(&[state], &OpponentPolicy::uniform(), &params).unwrap();

        assert_eq!(solution.policy.action(&state), Some(ACTION_SHOOT));
        assert!((solution.values.get(&state) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_terminal_states_untouched() {
        let terminal = GameState::new(5, 9, 8, 0);
        let params = ModelParams::default();
        let solution =
            value_iteration(&[terminal], &OpponentPolicy::uniform(), &params).unwrap();

        assert!(solution.policy.is_empty());
        assert!(solution.values.is_empty());
        assert_eq!(solution.sweeps, 1);
    }
}
