//! Durable redemption ledger
//!
//! Whole-set persistence of redeemed code identifiers as a JSON array of
//! strings at a fixed location. The ledger is the source of truth across
//! restarts: the registry reconciles against it at load time.
//!
//! A missing or malformed file is treated as an empty set, never fatal.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

/// Ledger store backed by a single JSON file
///
/// Concurrent redemptions of different codes serialize briefly on the
/// interior mutex for the duration of the file write only.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full redeemed set
    ///
    /// Missing file, unreadable file, or anything other than a JSON array of
    /// strings all load as the empty set.
    pub fn load(&self) -> HashSet<String> {
        let _guard = self.lock.lock();
        self.read_set()
    }

    /// Add one code and persist the whole set
    ///
    /// Read-merge-write under the mutex so concurrent appends cannot drop
    /// each other's entries.
    pub fn append(&self, code: &str) -> std::io::Result<()> {
        let _guard = self.lock.lock();
        let mut set = self.read_set();
        set.insert(code.to_string());
        self.write_set(&set)
    }

    /// Overwrite the ledger with an empty set
    pub fn clear(&self) -> std::io::Result<()> {
        let _guard = self.lock.lock();
        self.write_set(&HashSet::new())
    }

    fn read_set(&self) -> HashSet<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(codes) => codes.into_iter().collect(),
                Err(e) => {
                    tracing::warn!(
                        target: "persistence",
                        path = %self.path.display(),
                        error = %e,
                        "Malformed ledger file, treating as empty"
                    );
                    HashSet::new()
                }
            },
            Err(_) => HashSet::new(),
        }
    }

    fn write_set(&self, set: &HashSet<String>) -> std::io::Result<()> {
        let mut codes: Vec<&String> = set.iter().collect();
        codes.sort();
        let json = serde_json::to_string_pretty(&codes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, json)
    }
}
