//! Game constants: rewards, discount, action and owner codes.
//!
//! The pitch is a 4×4 grid of cells numbered 1–16 (row-major from the
//! bottom-left). Two attacking pieces and one defender move on it; the
//! attackers win by shooting into the goal side of the grid (x = 3).

/// Grid side length.
pub const GRID_SIZE: i32 = 4;

/// Number of cells on the pitch (positions 1..=16).
pub const NUM_CELLS: u8 = 16;

/// Number of attacker actions (8 moves + pass + shoot).
pub const NUM_ACTIONS: usize = 10;

/// Number of defender moves (L/R/U/D).
pub const NUM_DEFENDER_MOVES: usize = 4;

/// Reward for a non-terminal step while keeping possession.
pub const STEP_REWARD: f64 = -1.0;

/// Reward for losing possession (tackle, failed move/pass/shot, out of bounds).
pub const NEGATIVE_REWARD: f64 = -10.0;

/// Reward for scoring a goal.
pub const POSITIVE_REWARD: f64 = 10.0;

/// Discount factor for Bellman updates.
pub const GAMMA: f64 = 0.95;

/// Value iteration stops once the largest per-state change in a sweep
/// drops below this.
pub const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// Hard cap on sweeps. The default discount converges in a few hundred
/// sweeps; hitting this cap is reported as a non-convergence error.
pub const MAX_SWEEPS: usize = 10_000;

/// Owner codes, the fourth field of a state tuple.
pub const OWNER_LOST: u8 = 0;
pub const OWNER_PIECE_ONE: u8 = 1;
pub const OWNER_PIECE_TWO: u8 = 2;
pub const OWNER_GOAL: u8 = 3;

/// Action indices. 0–3 move piece 1, 4–7 move piece 2, then pass and shoot.
pub const ACTION_P1_LEFT: usize = 0;
pub const ACTION_P1_RIGHT: usize = 1;
pub const ACTION_P1_UP: usize = 2;
pub const ACTION_P1_DOWN: usize = 3;
pub const ACTION_P2_LEFT: usize = 4;
pub const ACTION_P2_RIGHT: usize = 5;
pub const ACTION_P2_UP: usize = 6;
pub const ACTION_P2_DOWN: usize = 7;
pub const ACTION_PASS: usize = 8;
pub const ACTION_SHOOT: usize = 9;

/// Human-readable action names.
pub const ACTION_NAMES: [&str; NUM_ACTIONS] = [
    "P1 Left", "P1 Right", "P1 Up", "P1 Down", "P2 Left", "P2 Right", "P2 Up", "P2 Down", "Pass",
    "Shoot",
];

/// (dx, dy) deltas in L, R, U, D order, shared by movers and the defender.
pub const MOVE_DELTAS: [(i32, i32); NUM_DEFENDER_MOVES] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Cells in front of the goal. A defender standing here halves shot odds.
pub const GOAL_MOUTH: [u8; 4] = [7, 8, 11, 12];
