//! Stochastic match dynamics: every outcome of one (state, action) pair.
//!
//! Each call enumerates the joint event space of the defender's move (drawn
//! from the opponent policy) and the attacker's action resolution. Branch
//! probabilities are conditional on the input state and action, and per
//! defender move they partition the event space, so the list's total equals
//! the opponent distribution's total; the model never normalizes.
//!
//! Known quirk kept on purpose: the two mover blocks encode the
//! fail-without-ball owner differently (the 0-3 block writes the incoming
//! owner through, the 4-7 block writes the literal code 1). Both name the
//! same piece, so the outcomes agree; the two blocks stay in their
//! duplicated form rather than sharing a helper.

use crate::constants::*;
use crate::grid::{chebyshev_distance, in_bounds, is_between, position_to_xy, xy_to_position};
use crate::opponent::OpponentPolicy;
use crate::types::GameState;

/// Model parameters: `p` scales movement failure, `q` is the base
/// pass/shot success rate. Neither is range-checked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelParams {
    pub p: f64,
    pub q: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        ModelParams { p: 0.2, q: 0.7 }
    }
}

/// One outcome branch: probability, successor, reward, episode-over flag.
#[derive(Clone, Copy, Debug)]
pub struct Transition {
    pub prob: f64,
    pub next: GameState,
    pub reward: f64,
    pub terminal: bool,
}

/// Enumerate all outcome branches for `state` under `action`.
pub fn transitions(
    state: GameState,
    action: usize,
    opponent: &OpponentPolicy,
    params: &ModelParams,
) -> Vec<Transition> {
    let mut out = Vec::with_capacity(16);
    transitions_into(state, action, opponent, params, &mut out);
    out
}

/// Like [`transitions`], writing into a caller-owned buffer. The solver's
/// inner loop calls this once per (state, action) per sweep; reusing one
/// buffer keeps the sweep allocation-free.
pub fn transitions_into(
    state: GameState,
    action: usize,
    opponent: &OpponentPolicy,
    params: &ModelParams,
    out: &mut Vec<Transition>,
) {
    debug_assert!(action < NUM_ACTIONS, "action {} out of range", action);
    debug_assert!(!state.is_terminal(), "no transitions from terminal state");

    out.clear();
    let GameState { b1, b2, r, owner } = state;
    let distribution = opponent.distribution(&state);

    for (i, &r_prob) in distribution.iter().enumerate() {
        // Defender move resolves first; off the pitch means staying put.
        let (rx, ry) = position_to_xy(r);
        let (dx, dy) = MOVE_DELTAS[i];
        let (rx_new, ry_new) = (rx + dx, ry + dy);
        let new_r = if in_bounds(rx_new, ry_new) {
            xy_to_position(rx_new, ry_new)
        } else {
            r
        };

        match action {
            ACTION_P1_LEFT..=ACTION_P1_DOWN => {
                let (x, y) = position_to_xy(b1);
                let (mx, my) = MOVE_DELTAS[action];
                let (x_new, y_new) = (x + mx, y + my);

                let success_prob = if owner == OWNER_PIECE_ONE {
                    1.0 - 2.0 * params.p
                } else {
                    1.0 - params.p
                };

                if !in_bounds(x_new, y_new) {
                    // Fell out of bounds: possession gone no matter the odds.
                    out.push(Transition {
                        prob: r_prob,
                        next: GameState::new(b1, b2, new_r, OWNER_LOST),
                        reward: NEGATIVE_REWARD,
                        terminal: true,
                    });
                    continue;
                }

                let new_b1 = xy_to_position(x_new, y_new);

                if owner == OWNER_PIECE_ONE {
                    // Movement succeeds, carrying the ball.
                    let moved = GameState::new(new_b1, b2, new_r, OWNER_PIECE_ONE);
                    let tackling = new_b1 == new_r || (new_r == b1 && new_b1 == r);
                    if tackling {
                        out.push(Transition {
                            prob: success_prob * r_prob * 0.5,
                            next: moved,
                            reward: STEP_REWARD,
                            terminal: false,
                        });
                        out.push(Transition {
                            prob: success_prob * r_prob * 0.5,
                            next: GameState::new(new_b1, b2, new_r, OWNER_LOST),
                            reward: NEGATIVE_REWARD,
                            terminal: true,
                        });
                    } else {
                        out.push(Transition {
                            prob: success_prob * r_prob,
                            next: moved,
                            reward: STEP_REWARD,
                            terminal: false,
                        });
                    }
                    // Movement fails with the ball: possession lost.
                    out.push(Transition {
                        prob: (1.0 - success_prob) * r_prob,
                        next: GameState::new(b1, b2, new_r, OWNER_LOST),
                        reward: NEGATIVE_REWARD,
                        terminal: true,
                    });
                } else {
                    out.push(Transition {
                        prob: success_prob * r_prob,
                        next: GameState::new(new_b1, b2, new_r, OWNER_PIECE_TWO),
                        reward: STEP_REWARD,
                        terminal: false,
                    });
                    // Off-ball failure keeps play alive, owner unchanged.
                    out.push(Transition {
                        prob: (1.0 - success_prob) * r_prob,
                        next: GameState::new(b1, b2, new_r, owner),
                        reward: STEP_REWARD,
                        terminal: false,
                    });
                }
            }

            ACTION_P2_LEFT..=ACTION_P2_DOWN => {
                let (x, y) = position_to_xy(b2);
                let (mx, my) = MOVE_DELTAS[action - 4];
                let (x_new, y_new) = (x + mx, y + my);

                let success_prob = if owner == OWNER_PIECE_TWO {
                    1.0 - 2.0 * params.p
                } else {
                    1.0 - params.p
                };

                if !in_bounds(x_new, y_new) {
                    out.push(Transition {
                        prob: r_prob,
                        next: GameState::new(b1, b2, new_r, OWNER_LOST),
                        reward: NEGATIVE_REWARD,
                        terminal: true,
                    });
                    continue;
                }

                let new_b2 = xy_to_position(x_new, y_new);

                if owner == OWNER_PIECE_TWO {
                    let moved = GameState::new(b1, new_b2, new_r, OWNER_PIECE_TWO);
                    let tackling = new_b2 == new_r || (new_r == b2 && new_b2 == r);
                    if tackling {
                        out.push(Transition {
                            prob: success_prob * r_prob * 0.5,
                            next: moved,
                            reward: STEP_REWARD,
                            terminal: false,
                        });
                        out.push(Transition {
                            prob: success_prob * r_prob * 0.5,
                            next: GameState::new(b1, new_b2, new_r, OWNER_LOST),
                            reward: NEGATIVE_REWARD,
                            terminal: true,
                        });
                    } else {
                        out.push(Transition {
                            prob: success_prob * r_prob,
                            next: moved,
                            reward: STEP_REWARD,
                            terminal: false,
                        });
                    }
                    out.push(Transition {
                        prob: (1.0 - success_prob) * r_prob,
                        next: GameState::new(b1, b2, new_r, OWNER_LOST),
                        reward: NEGATIVE_REWARD,
                        terminal: true,
                    });
                } else {
                    out.push(Transition {
                        prob: success_prob * r_prob,
                        next: GameState::new(b1, new_b2, new_r, OWNER_PIECE_ONE),
                        reward: STEP_REWARD,
                        terminal: false,
                    });
                    out.push(Transition {
                        prob: (1.0 - success_prob) * r_prob,
                        next: GameState::new(b1, b2, new_r, OWNER_PIECE_ONE),
                        reward: STEP_REWARD,
                        terminal: false,
                    });
                }
            }

            ACTION_PASS => {
                // Longer passes are harder; a defender on the passing lane
                // halves the odds.
                let mut pass_prob = params.q - 0.1 * chebyshev_distance(b1, b2) as f64;
                if is_between(b1, b2, new_r) {
                    pass_prob /= 2.0;
                }

                out.push(Transition {
                    prob: pass_prob * r_prob,
                    next: GameState::new(b1, b2, new_r, 3 - owner),
                    reward: 0.0,
                    terminal: false,
                });
                out.push(Transition {
                    prob: (1.0 - pass_prob) * r_prob,
                    next: GameState::new(b1, b2, new_r, OWNER_LOST),
                    reward: NEGATIVE_REWARD,
                    terminal: true,
                });
            }

            ACTION_SHOOT => {
                // Shot quality depends on the carrier's column; a defender in
                // the goal mouth halves the odds.
                let (x, _y) = position_to_xy(state.carrier());
                let mut shoot_prob = params.q - 0.2 * (3 - x) as f64;
                if GOAL_MOUTH.contains(&new_r) {
                    shoot_prob /= 2.0;
                }

                out.push(Transition {
                    prob: shoot_prob * r_prob,
                    next: GameState::new(b1, b2, new_r, OWNER_GOAL),
                    reward: POSITIVE_REWARD,
                    terminal: true,
                });
                out.push(Transition {
                    prob: (1.0 - shoot_prob) * r_prob,
                    next: GameState::new(b1, b2, new_r, OWNER_LOST),
                    reward: NEGATIVE_REWARD,
                    terminal: true,
                });
            }

            _ => unreachable!("action {} out of range", action),
        }
    }
}
