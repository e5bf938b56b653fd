//! Match rollouts: play N matches under the computed greedy policy.
//!
//! Each rollout walks the MDP forward: look up the policy's action, expand
//! that action's outcome branches, sample one in proportion to its
//! probability, and stop on an absorbing state. Rollouts are independent, so
//! batches run on rayon with one seeded `SmallRng` per match and are fully
//! reproducible for a given base seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;

use crate::constants::OWNER_GOAL;
use crate::opponent::OpponentPolicy;
use crate::solver::Policy;
use crate::transition::{transitions_into, ModelParams, Transition};
use crate::types::GameState;

/// Results of a batch of simulated matches.
pub struct MatchStats {
    pub matches: usize,
    pub wins: usize,
    pub losses: usize,
    pub mean_length: f64,
    pub elapsed: std::time::Duration,
}

impl MatchStats {
    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / self.matches as f64
    }
}

/// Sample one branch in proportion to its (unnormalized) probability.
///
/// Cumulative scan over the branch list; float drift in the total is
/// absorbed by the final branch.
#[inline(always)]
fn sample_transition<'a>(branches: &'a [Transition], rng: &mut SmallRng) -> &'a Transition {
    let total: f64 = branches.iter().map(|t| t.prob).sum();
    let mut draw = rng.random_range(0.0..total);
    for t in branches {
        if draw < t.prob {
            return t;
        }
        draw -= t.prob;
    }
    branches.last().expect("empty transition list")
}

/// Play one match from `start`, returning every visited state in order.
///
/// The returned path begins with `start` and ends with the first absorbing
/// state reached, either because the sampled branch was terminal or because
/// the loop guard saw an absorbing state before the next decision.
pub fn simulate_match(
    policy: &Policy,
    start: GameState,
    opponent: &OpponentPolicy,
    params: &ModelParams,
    rng: &mut SmallRng,
) -> Vec<GameState> {
    let mut state = start;
    let mut path = vec![state];
    let mut branches: Vec<Transition> = Vec::with_capacity(16);

    while !state.is_terminal() {
        let action = policy
            .action(&state)
            .unwrap_or_else(|| panic!("policy has no action for non-terminal state {}", state));
        transitions_into(state, action, opponent, params, &mut branches);

        let sampled = sample_transition(&branches, rng);
        state = sampled.next;
        path.push(state);

        if sampled.terminal {
            break;
        }
    }

    path
}

/// Play `matches` independent matches in parallel. Match `i` uses
/// `seed.wrapping_add(i)`, so a batch is reproducible and each match
/// decorrelated from its neighbors.
pub fn simulate_batch(
    policy: &Policy,
    start: GameState,
    opponent: &OpponentPolicy,
    params: &ModelParams,
    matches: usize,
    seed: u64,
) -> MatchStats {
    let start_time = Instant::now();

    let outcomes: Vec<(bool, usize)> = (0..matches)
        .into_par_iter()
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
            let path = simulate_match(policy, start, opponent, params, &mut rng);
            let won = path.last().map(|s| s.owner == OWNER_GOAL).unwrap_or(false);
            (won, path.len())
        })
        .collect();

    let elapsed = start_time.elapsed();
    let wins = outcomes.iter().filter(|(won, _)| *won).count();
    let total_length: usize = outcomes.iter().map(|(_, len)| len).sum();

    MatchStats {
        matches,
        wins,
        losses: matches - wins,
        mean_length: total_length as f64 / matches as f64,
        elapsed,
    }
}
