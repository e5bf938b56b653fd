//! File I/O: the state list, opponent policies, and exported solutions.
//!
//! Everything is JSON. States serialize as `[b1, b2, r, owner]` tuples;
//! an opponent policy is an array of `{state, moves}` rows; a solution
//! export is an array of `{state, action, value}` rows sorted by state so
//! diffs stay stable across runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::opponent::{OpponentPolicy, PolicyEntry};
use crate::solver::Solution;
use crate::types::GameState;

/// Default location of the serialized state enumeration.
pub const STATES_FILE_PATH: &str = "data/all_states.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Opponent policy file for a named defender (`random`, `greedy`, ...).
pub fn opponent_policy_path(name: &str) -> String {
    format!("data/policies/{}_policy.json", name)
}

/// Load the state enumeration.
pub fn load_states(path: &str) -> Result<Vec<GameState>, StorageError> {
    let text = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| StorageError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Save the state enumeration.
pub fn save_states(states: &[GameState], path: &str) -> Result<(), StorageError> {
    write_json(path, states)
}

/// Load an opponent policy. States absent from the file fall back to the
/// uniform distribution at lookup time.
pub fn load_opponent_policy(path: &str) -> Result<OpponentPolicy, StorageError> {
    let text = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_string(),
        source,
    })?;
    let entries: Vec<PolicyEntry> =
        serde_json::from_str(&text).map_err(|source| StorageError::Parse {
            path: path.to_string(),
            source,
        })?;
    Ok(OpponentPolicy::from_entries(entries))
}

/// Save an opponent policy.
pub fn save_opponent_policy(policy: &OpponentPolicy, path: &str) -> Result<(), StorageError> {
    let mut entries = policy.entries();
    entries.sort_by_key(|e| <(u8, u8, u8, u8)>::from(e.state));
    write_json(path, &entries)
}

/// One exported decision: the state, its greedy action, and its value.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SolutionRow {
    pub state: GameState,
    pub action: usize,
    pub value: f64,
}

/// Export a computed solution for offline inspection.
pub fn save_solution(solution: &Solution, path: &str) -> Result<(), StorageError> {
    let mut rows: Vec<SolutionRow> = solution
        .policy
        .iter()
        .map(|(&state, &action)| SolutionRow {
            state,
            action,
            value: solution.values.get(&state),
        })
        .collect();
    rows.sort_by_key(|row| <(u8, u8, u8, u8)>::from(row.state));
    write_json(path, &rows)
}

fn write_json<T: Serialize + ?Sized>(path: &str, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::Write {
            path: path.to_string(),
            source,
        })?;
    }
    let text = serde_json::to_string(value).map_err(|source| StorageError::Parse {
        path: path.to_string(),
        source,
    })?;
    fs::write(path, text).map_err(|source| StorageError::Write {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opponent::random_policy;
    use crate::state_space::enumerate_states;

    #[test]
    fn test_states_roundtrip() {
        let dir = std::env::temp_dir().join("gridball_states_test");
        let _ = fs::create_dir_all(&dir);
        let path = dir.join("all_states.json");
        let path = path.to_str().unwrap();

        let states = enumerate_states();
        save_states(&states, path).unwrap();
        let loaded = load_states(path).unwrap();
        assert_eq!(loaded, states);
    }

    #[test]
    fn test_policy_roundtrip() {
        let dir = std::env::temp_dir().join("gridball_policy_test");
        let _ = fs::create_dir_all(&dir);
        let path = dir.join("random_policy.json");
        let path = path.to_str().unwrap();

        let states: Vec<GameState> = enumerate_states().into_iter().take(256).collect();
        let policy = random_policy(&states);
        save_opponent_policy(&policy, path).unwrap();
        let loaded = load_opponent_policy(path).unwrap();
        assert_eq!(loaded.len(), policy.len());
        for state in states.iter().filter(|s| !s.is_terminal()) {
            assert_eq!(loaded.distribution(state), policy.distribution(state));
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_states("data/does_not_exist.json").unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
    }

    #[test]
    fn test_policy_path_construction() {
        assert_eq!(
            opponent_policy_path("random"),
            "data/policies/random_policy.json"
        );
        assert_eq!(opponent_policy_path("bus"), "data/policies/bus_policy.json");
    }
}
