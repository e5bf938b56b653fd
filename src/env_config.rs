//! Shared environment configuration for the gridball binaries.
//!
//! Consolidates the `GRIDBALL_BASE_PATH` and `RAYON_NUM_THREADS` reads so
//! every binary resolves data paths and the thread pool the same way.

use std::path::PathBuf;

/// Read `GRIDBALL_BASE_PATH` (default `"."`), chdir, print path. Exits on failure.
pub fn init_base_path() -> PathBuf {
    let base_path = std::env::var("GRIDBALL_BASE_PATH").unwrap_or_else(|_| ".".to_string());
    println!("GRIDBALL_BASE_PATH={}", base_path);
    let path = PathBuf::from(&base_path);
    if std::env::set_current_dir(&base_path).is_err() {
        eprintln!("Failed to change directory to {}", base_path);
        std::process::exit(1);
    }
    if let Ok(cwd) = std::env::current_dir() {
        println!("Working directory: {}", cwd.display());
    }
    path
}

/// Read `RAYON_NUM_THREADS` (default 8) and build the global rayon pool.
/// Tolerates an already-initialized pool. Returns the thread count.
pub fn init_rayon_threads() -> usize {
    let num_threads = std::env::var("RAYON_NUM_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok();
    println!("Rayon threads: {}", num_threads);
    num_threads
}
