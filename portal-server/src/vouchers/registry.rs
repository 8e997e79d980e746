//! Code registry
//!
//! Authoritative in-memory view of all voucher records, loaded exactly once
//! per process lifetime and reconciled against the durable ledger.
//!
//! # Code sources
//!
//! `load()` populates records from the first source that yields codes:
//!
//! 1. inline comma-separated list (config)
//! 2. newline-delimited file
//! 3. built-in sample set
//!
//! Unreadable or malformed sources are skipped, never fatal: the registry
//! always starts with at least the sample set.
//!
//! # Concurrency
//!
//! Records live in a [`DashMap`]; shard-level locking makes every
//! check-then-set on a single code atomic while operations on different
//! codes proceed in parallel.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;

use super::ledger::LedgerStore;
use super::record::VoucherRecord;

/// Built-in fallback codes, used only when no configured source yields any
const SAMPLE_CODES: [&str; 11] = [
    "COCA001", "COCA002", "COCA003", "COCA004", "COCA005", "COCA006", "COCA007", "COCA008",
    "COCA009", "COCA010", "valid",
];

/// Where codes are loaded from, in priority order
#[derive(Debug, Clone, Default)]
pub struct CodeSources {
    /// Inline comma-separated list
    pub inline: Option<String>,
    /// Newline-delimited file
    pub file: Option<PathBuf>,
}

/// Read-only validation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeStatus {
    /// Code absent from the registry
    Unknown,
    /// Code known and not yet redeemed (an unexpired reservation does not
    /// affect this outcome)
    Active,
    /// Code known and redeemed
    Redeemed,
}

/// Voucher code registry
#[derive(Debug)]
pub struct VoucherRegistry {
    pub(super) records: DashMap<String, VoucherRecord>,
    pub(super) ledger: LedgerStore,
    pub(super) reserve_ttl: chrono::Duration,
    sources: CodeSources,
    loaded: AtomicBool,
    load_lock: Mutex<()>,
}

impl VoucherRegistry {
    pub fn new(sources: CodeSources, ledger: LedgerStore, reserve_ttl: chrono::Duration) -> Self {
        Self {
            records: DashMap::new(),
            ledger,
            reserve_ttl,
            sources,
            loaded: AtomicBool::new(false),
            load_lock: Mutex::new(()),
        }
    }

    /// Load codes and reconcile against the ledger
    ///
    /// Idempotent: a second call is a no-op returning the current record
    /// count. Returns the number of records in the registry.
    pub fn load(&self) -> usize {
        let _guard = self.load_lock.lock();
        if self.loaded.load(Ordering::Acquire) {
            return self.records.len();
        }

        // (a) inline list
        if let Some(inline) = self.sources.inline.clone() {
            let count = self.insert_codes(inline.split(','));
            if count > 0 {
                tracing::info!(count, "Loaded codes from inline list");
            }
        }

        // (b) newline-delimited file
        if self.records.is_empty()
            && let Some(path) = &self.sources.file
        {
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    let count = self.insert_codes(content.lines());
                    if count > 0 {
                        tracing::info!(count, path = %path.display(), "Loaded codes from file");
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Unreadable codes file, skipping source"
                    );
                }
            }
        }

        // (c) fallback sample set
        if self.records.is_empty() {
            let count = self.insert_codes(SAMPLE_CODES.into_iter());
            tracing::info!(count, "Seeded sample codes");
        }

        self.reconcile();
        self.loaded.store(true, Ordering::Release);
        self.records.len()
    }

    /// Validate a code without side effects
    ///
    /// The code is trimmed; an empty or unknown code is simply [`CodeStatus::Unknown`].
    pub fn validate(&self, code: &str) -> CodeStatus {
        let code = code.trim();
        if code.is_empty() {
            return CodeStatus::Unknown;
        }

        match self.records.get(code) {
            None => CodeStatus::Unknown,
            Some(record) if record.is_redeemed() => CodeStatus::Redeemed,
            Some(_) => CodeStatus::Active,
        }
    }

    /// Number of records currently loaded
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert trimmed, non-empty codes that are not already present
    fn insert_codes<'a>(&self, codes: impl Iterator<Item = &'a str>) -> usize {
        let mut inserted = 0;
        for raw in codes {
            let code = raw.trim();
            if code.is_empty() {
                continue;
            }
            if !self.records.contains_key(code) {
                self.records
                    .insert(code.to_string(), VoucherRecord::new(code));
                inserted += 1;
            }
        }
        inserted
    }

    /// Force-set every record whose code appears in the ledger to redeemed
    ///
    /// The ledger is durable and the registry is not; this keeps redemption
    /// idempotent across process restarts.
    fn reconcile(&self) {
        let redeemed = self.ledger.load();
        if redeemed.is_empty() {
            return;
        }

        let mut applied = 0;
        let now = Utc::now();
        for code in &redeemed {
            if let Some(mut record) = self.records.get_mut(code)
                && !record.is_redeemed()
            {
                record.mark_redeemed(now);
                applied += 1;
            }
        }

        tracing::info!(
            ledger = redeemed.len(),
            applied,
            "Reconciled registry against ledger"
        );
    }

    /// Shift a reservation timestamp into the past (test-only)
    #[cfg(test)]
    pub(crate) fn backdate_reservation(&self, code: &str, secs: i64) {
        if let Some(mut record) = self.records.get_mut(code)
            && let Some(at) = record.reserved_at
        {
            record.reserved_at = Some(at - chrono::Duration::seconds(secs));
        }
    }
}
