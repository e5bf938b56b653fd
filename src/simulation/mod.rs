//! Match simulation under a computed policy.
//!
//! - [`engine`]: single rollouts and parallel batches

pub mod engine;

pub use engine::{simulate_batch, simulate_match, MatchStats};
