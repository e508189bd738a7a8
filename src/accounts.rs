//! Account list loading
//!
//! The input file is the same `accounts.json` the balance monitor consumes:
//! a JSON array of objects carrying at least a `name`. Entry order drives
//! panel placement and identifier assignment. Duplicate names are allowed
//! and simply produce duplicate panels.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A monitored account, reduced to the one field the dashboard needs.
///
/// The monitor keeps address, account type and alert thresholds in the same
/// file; those fields are ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Display name, also spliced into each panel's query
    pub name: String,
}

/// Errors that can occur while loading the account list
#[derive(Debug, Error)]
pub enum AccountsError {
    #[error("Failed to read accounts file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Accounts file {path:?} is not a JSON array of objects: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Account at index {index} is missing a string \"name\" field")]
    MissingName { index: usize },
}

/// Load the ordered account list from `path`.
///
/// The whole load fails on the first invalid entry; there are no partial
/// results.
pub fn load_accounts(path: &Path) -> Result<Vec<Account>, AccountsError> {
    let text = std::fs::read_to_string(path).map_err(|e| AccountsError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    let entries: Vec<Map<String, Value>> =
        serde_json::from_str(&text).map_err(|e| AccountsError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(Value::Object(entry))
                .map_err(|_| AccountsError::MissingName { index })
        })
        .collect()
}
