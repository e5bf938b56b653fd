//! Parameter sweep: win rate of the optimal policy across a (p, q) grid.
//!
//! Re-solves the MDP for every grid cell and evaluates each solution with a
//! Monte Carlo batch, so the table shows how movement risk and pass/shot
//! quality trade off. With `--output FILE`, also writes the table as CSV.

use std::fs;
use std::io::Write;
use std::time::Instant;

use gridball::simulation::simulate_batch;
use gridball::solver::value_iteration;
use gridball::storage::{load_opponent_policy, load_states, opponent_policy_path, STATES_FILE_PATH};
use gridball::transition::ModelParams;
use gridball::types::GameState;

/// Movement failure coefficients to sweep.
const P_VALUES: &[f64] = &[0.0, 0.1, 0.2, 0.3, 0.4];

/// Pass/shot base success rates to sweep.
const Q_VALUES: &[f64] = &[0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

struct Args {
    policy: String,
    matches: usize,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut policy = "random".to_string();
    let mut matches = 2_000usize;
    let mut seed = 42u64;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--policy" => {
                i += 1;
                if i < args.len() {
                    policy = args[i].clone();
                }
            }
            "--matches" => {
                i += 1;
                if i < args.len() {
                    matches = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --matches value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --seed value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--output" => {
                i += 1;
                if i < args.len() {
                    output = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                println!(
                    "Usage: gridball-sweep [--policy NAME] [--matches N] [--seed S] [--output FILE]"
                );
                println!();
                println!("Options:");
                println!("  --policy NAME  Opponent policy name (default: random)");
                println!("  --matches N    Matches per (p, q) cell (default: 2000)");
                println!("  --seed S       Base RNG seed (default: 42)");
                println!("  --output FILE  Write the sweep table as CSV");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Args {
        policy,
        matches,
        seed,
        output,
    }
}

fn main() {
    let _base = gridball::env_config::init_base_path();
    let args = parse_args();
    gridball::env_config::init_rayon_threads();

    let all_states = match load_states(STATES_FILE_PATH) {
        Ok(states) => states,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run gridball-precompute first.");
            std::process::exit(1);
        }
    };
    let opponent = match load_opponent_policy(&opponent_policy_path(&args.policy)) {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run gridball-precompute first.");
            std::process::exit(1);
        }
    };

    println!(
        "Gridball sweep: {} cells, {} matches each, opponent '{}'",
        P_VALUES.len() * Q_VALUES.len(),
        args.matches,
        args.policy
    );
    println!();

    let mut csv_rows: Vec<(f64, f64, f64, f64)> = Vec::new();
    let sweep_start = Instant::now();

    for &p in P_VALUES {
        for &q in Q_VALUES {
            let params = ModelParams { p, q };
            let solution = match value_iteration(&all_states, &opponent, &params) {
                Ok(solution) => solution,
                Err(e) => {
                    eprintln!("p={} q={}: {}", p, q, e);
                    std::process::exit(1);
                }
            };
            let stats = simulate_batch(
                &solution.policy,
                GameState::KICKOFF,
                &opponent,
                &params,
                args.matches,
                args.seed,
            );
            println!(
                "  p={:.2} q={:.2}: win rate {:>5.1}%, kickoff value {:>8.4}",
                p,
                q,
                stats.win_rate() * 100.0,
                solution.values.get(&GameState::KICKOFF)
            );
            csv_rows.push((
                p,
                q,
                stats.win_rate(),
                solution.values.get(&GameState::KICKOFF),
            ));
        }
    }

    // Summary table once the noisy per-cell output is done.
    println!();
    print!("{:>6}", "p\\q");
    for &q in Q_VALUES {
        print!("{:>8.2}", q);
    }
    println!();
    for (pi, &p) in P_VALUES.iter().enumerate() {
        print!("{:>6.2}", p);
        for qi in 0..Q_VALUES.len() {
            let (_, _, win_rate, _) = csv_rows[pi * Q_VALUES.len() + qi];
            print!("{:>7.1}%", win_rate * 100.0);
        }
        println!();
    }

    println!();
    println!(
        "Sweep finished in {:.1} s",
        sweep_start.elapsed().as_secs_f64()
    );

    if let Some(ref path) = args.output {
        let mut file = match fs::File::create(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Failed to create {}: {}", path, e);
                std::process::exit(1);
            }
        };
        writeln!(file, "p,q,win_rate,kickoff_value").unwrap();
        for (p, q, win_rate, value) in &csv_rows {
            writeln!(file, "{},{},{:.4},{:.4}", p, q, win_rate, value).unwrap();
        }
        println!("Wrote {}", path);
    }
}
