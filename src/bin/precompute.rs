use gridball::opponent::{greedy_policy, random_policy};
use gridball::state_space::enumerate_states;
use gridball::storage::{
    opponent_policy_path, save_opponent_policy, save_states, STATES_FILE_PATH,
};

fn parse_args() {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!("Usage: gridball-precompute");
                println!();
                println!("Writes under the base path (GRIDBALL_BASE_PATH, default '.'):");
                println!("  {}", STATES_FILE_PATH);
                println!("  {}", opponent_policy_path("random"));
                println!("  {}", opponent_policy_path("greedy"));
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Usage: gridball-precompute");
                std::process::exit(1);
            }
        }
    }
}

fn main() {
    let _base = gridball::env_config::init_base_path();
    parse_args();

    println!("Gridball precomputation tool");

    let states = enumerate_states();
    println!("Enumerated {} states", states.len());

    if let Err(e) = save_states(&states, STATES_FILE_PATH) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    println!("  States:  {}", STATES_FILE_PATH);

    let random = random_policy(&states);
    let path = opponent_policy_path("random");
    if let Err(e) = save_opponent_policy(&random, &path) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    println!("  Policy:  {} ({} rows)", path, random.len());

    let greedy = greedy_policy(&states);
    let path = opponent_policy_path("greedy");
    if let Err(e) = save_opponent_policy(&greedy, &path) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    println!("  Policy:  {} ({} rows)", path, greedy.len());
}
