//! # Gridball: optimal play for a 4×4 possession game
//!
//! Two attacking pieces keep a ball away from one defender on a 4×4 pitch
//! and try to score into the `x = 3` side. The crate models the match as a
//! finite MDP and solves it exactly, then checks the computed strategy by
//! playing it.
//!
//! ## Pipeline
//!
//! | Stage | Binary | Rust module | Description |
//! |-------|--------|-------------|-------------|
//! | 1 | `gridball-precompute` | [`state_space`], [`opponent`] | Enumerate the 16,384 state tuples and generate named defender policies |
//! | 2 | `gridball-solve` | [`solver`] | Value iteration to the fixed point, greedy policy extraction |
//! | 3 | `gridball-solve` / `gridball-sweep` | [`simulation`] | Monte Carlo evaluation: play matches from kickoff and count goals |
//!
//! ## State and dynamics
//!
//! A state is `(b1, b2, r, owner)`: attacker cells, defender cell, and an
//! owner code where 0 (possession lost) and 3 (goal) absorb. Ten actions:
//! eight single-cell moves, a pass, and a shot. [`transition`] enumerates
//! every outcome branch with its probability; movement can fail (and lose a
//! carried ball), the defender can tackle on a meeting or a swap, passes are
//! cut out on the passing lane, and shots are blocked from the goal mouth.
//!
//! The defender plays a per-state move distribution loaded from a policy
//! file; unknown states default to uniform. All probabilities, rewards, and
//! the discount live in [`constants`].

pub mod constants;
pub mod env_config;
pub mod grid;
pub mod opponent;
pub mod simulation;
pub mod solver;
pub mod state_space;
pub mod storage;
pub mod transition;
pub mod types;
