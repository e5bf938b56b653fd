use std::time::Instant;

use gridball::simulation::simulate_batch;
use gridball::solver::value_iteration;
use gridball::storage::{
    load_opponent_policy, load_states, opponent_policy_path, save_solution, STATES_FILE_PATH,
};
use gridball::transition::ModelParams;
use gridball::types::GameState;

struct Args {
    p: f64,
    q: f64,
    policy: String,
    matches: usize,
    seed: u64,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut p = 0.2f64;
    let mut q = 0.7f64;
    let mut policy = "random".to_string();
    let mut matches = 10_000usize;
    let mut seed = 42u64;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--p" | "-p" => {
                i += 1;
                if i < args.len() {
                    p = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --p value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--q" | "-q" => {
                i += 1;
                if i < args.len() {
                    q = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --q value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
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
                    "Usage: gridball-solve [--p FLOAT] [--q FLOAT] [--policy NAME] [--matches N] [--seed S] [--output FILE]"
                );
                println!();
                println!("Options:");
                println!("  --p FLOAT      Movement failure coefficient (default: 0.2)");
                println!("  --q FLOAT      Pass/shot base success rate (default: 0.7)");
                println!("  --policy NAME  Opponent policy name, e.g. random/greedy (default: random)");
                println!("  --matches N    Matches to simulate after solving (default: 10000)");
                println!("  --seed S       Base RNG seed for the simulation batch (default: 42)");
                println!("  --output FILE  Export the computed policy and values as JSON");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!(
                    "Usage: gridball-solve [--p FLOAT] [--q FLOAT] [--policy NAME] [--matches N] [--seed S] [--output FILE]"
                );
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Args {
        p,
        q,
        policy,
        matches,
        seed,
        output,
    }
}

fn main() {
    let _base = gridball::env_config::init_base_path();
    let args = parse_args();
    let num_threads = gridball::env_config::init_rayon_threads();

    println!("Gridball solver (p={}, q={})", args.p, args.q);

    let t0 = Instant::now();
    let all_states = match load_states(STATES_FILE_PATH) {
        Ok(states) => states,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run gridball-precompute first.");
            std::process::exit(1);
        }
    };
    println!(
        "  States:        {} loaded in {:.1} ms",
        all_states.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    let policy_file = opponent_policy_path(&args.policy);
    let t1 = Instant::now();
    let opponent = match load_opponent_policy(&policy_file) {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run gridball-precompute first, or supply {}.", policy_file);
            std::process::exit(1);
        }
    };
    println!(
        "  Opponent:      '{}' ({} rows) in {:.1} ms",
        args.policy,
        opponent.len(),
        t1.elapsed().as_secs_f64() * 1000.0
    );
    println!();

    let params = ModelParams {
        p: args.p,
        q: args.q,
    };
    let solution = match value_iteration(&all_states, &opponent, &params) {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let kickoff = GameState::KICKOFF;
    println!(
        "  Kickoff value: {:.4} for {}",
        solution.values.get(&kickoff),
        kickoff
    );

    if let Some(ref path) = args.output {
        if let Err(e) = save_solution(&solution, path) {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        println!("  Solution:      {}", path);
    }
    println!();

    println!(
        "Simulating {} matches ({} threads)...",
        args.matches, num_threads
    );
    let stats = simulate_batch(
        &solution.policy,
        kickoff,
        &opponent,
        &params,
        args.matches,
        args.seed,
    );

    let per_match_us = stats.elapsed.as_secs_f64() * 1e6 / args.matches as f64;
    println!(
        "  Elapsed:     {:.1} ms",
        stats.elapsed.as_secs_f64() * 1000.0
    );
    println!("  Per match:   {:.1} \u{00b5}s", per_match_us);
    println!();

    println!("Results:");
    println!("  Wins:        {}", stats.wins);
    println!("  Losses:      {}", stats.losses);
    println!("  Win rate:    {:.1}%", stats.win_rate() * 100.0);
    println!("  Mean length: {:.1} states", stats.mean_length);
}
