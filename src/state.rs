//! Persisted seen-set
//!
//! The only state that survives between runs: the `token_name`s that were
//! already announced, stored as a JSON array of strings.
//!
//! ## Atomic Writes
//!
//! `save` writes to a temp file in the target's directory, syncs it, then
//! renames it over the target. A crash mid-write leaves the previous file in
//! place.
//!
//! At most one watcher may run against a given state file. Two concurrent
//! runs can each load the same set and the later save wins.

use crate::errors::StateError;
use crate::logger::{self, LogTag};
use std::collections::BTreeSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Set of project names that were already notified
///
/// Grows monotonically: there is no removal API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    names: BTreeSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token_name: &str) -> bool {
        self.names.contains(token_name)
    }

    /// Returns true if the name was not present before
    pub fn insert(&mut self, token_name: impl Into<String>) -> bool {
        self.names.insert(token_name.into())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Load the seen-set from `path`
    ///
    /// A missing file yields an empty set. An unreadable file or one that is
    /// not a JSON array of strings is an error; nothing is repaired.
    pub fn load(path: &Path) -> Result<Self, StateError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                logger::info(
                    LogTag::State,
                    &format!(
                        "No state file at '{}', starting with an empty seen-set",
                        path.display()
                    ),
                );
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(StateError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let names: Vec<String> =
            serde_json::from_slice(&bytes).map_err(|source| StateError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;

        let set: SeenSet = names.into_iter().collect();
        logger::debug(
            LogTag::State,
            &format!("Loaded {} seen projects from '{}'", set.len(), path.display()),
        );
        Ok(set)
    }

    /// Replace the file at `path` with the full set
    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        let names: Vec<&str> = self.iter().collect();
        let json = serde_json::to_string_pretty(&names)?;

        let write_err = |source: std::io::Error| StateError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.write_all(b"\n").map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        logger::debug(
            LogTag::State,
            &format!("Saved {} seen projects to '{}'", self.len(), path.display()),
        );
        Ok(())
    }
}

impl FromIterator<String> for SeenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
