//! Reservation arbitration
//!
//! Gives a claimant temporary exclusivity on a code before redemption, so two
//! concurrent cashiers cannot both believe they are about to redeem the same
//! still-active code.
//!
//! Reservations are an optimistic courtesy lock, not a correctness guarantee:
//! they are lost on restart, and the redemption path independently re-checks
//! status at commit time.

use chrono::Utc;

use super::registry::VoucherRegistry;

/// Outcome of a reservation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReserveOutcome {
    /// Code absent from the registry
    NotFound,
    /// Code already redeemed, nothing to reserve
    AlreadyRedeemed,
    /// An unexpired reservation is held by another claimant; carries the
    /// holder's identity so the caller can surface the conflict
    ReservedByOther(String),
    /// Reservation taken (or refreshed) for the requesting claimant
    Reserved,
}

impl VoucherRegistry {
    /// Reserve a code for a claimant
    ///
    /// The whole check-then-set runs under the record's shard lock, so two
    /// concurrent claims on the same code serialize and exactly one wins.
    /// An expired reservation, or one already held by the same claimant, is
    /// overwritten and the timestamp refreshed.
    pub fn reserve(&self, code: &str, claimant: &str) -> ReserveOutcome {
        let code = code.trim();
        if code.is_empty() {
            return ReserveOutcome::NotFound;
        }

        let now = Utc::now();
        match self.records.get_mut(code) {
            None => ReserveOutcome::NotFound,
            Some(mut record) => {
                if record.is_redeemed() {
                    return ReserveOutcome::AlreadyRedeemed;
                }

                let holder = record
                    .active_reserver(self.reserve_ttl, now)
                    .map(str::to_string);
                if let Some(holder) = holder
                    && holder != claimant
                {
                    return ReserveOutcome::ReservedByOther(holder);
                }

                record.reserve_for(claimant, now);
                ReserveOutcome::Reserved
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vouchers::{CodeSources, LedgerStore};
    use tempfile::tempdir;

    fn registry(dir: &std::path::Path) -> VoucherRegistry {
        let ledger = LedgerStore::new(dir.join("redeemed.json"));
        let sources = CodeSources {
            inline: Some("X1,X2".to_string()),
            file: None,
        };
        let registry = VoucherRegistry::new(sources, ledger, chrono::Duration::seconds(120));
        registry.load();
        registry
    }

    #[test]
    fn test_reserve_unknown_code() {
        let dir = tempdir().expect("tempdir");
        let registry = registry(dir.path());

        assert_eq!(registry.reserve("NOPE", "alice"), ReserveOutcome::NotFound);
        assert_eq!(registry.reserve("", "alice"), ReserveOutcome::NotFound);
    }

    #[test]
    fn test_conflicting_claimants_within_ttl() {
        let dir = tempdir().expect("tempdir");
        let registry = registry(dir.path());

        assert_eq!(registry.reserve("X1", "alice"), ReserveOutcome::Reserved);
        // A second claimant inside the TTL window is told who holds it
        assert_eq!(
            registry.reserve("X1", "bob"),
            ReserveOutcome::ReservedByOther("alice".to_string())
        );
        // The holder may refresh its own reservation
        assert_eq!(registry.reserve("X1", "alice"), ReserveOutcome::Reserved);
        // A different code is unaffected
        assert_eq!(registry.reserve("X2", "bob"), ReserveOutcome::Reserved);
    }

    #[test]
    fn test_expired_reservation_is_reclaimable() {
        let dir = tempdir().expect("tempdir");
        let registry = registry(dir.path());

        assert_eq!(registry.reserve("X1", "alice"), ReserveOutcome::Reserved);
        registry.backdate_reservation("X1", 121);

        assert_eq!(registry.reserve("X1", "bob"), ReserveOutcome::Reserved);
    }

    #[test]
    fn test_reserve_redeemed_code() {
        let dir = tempdir().expect("tempdir");
        let registry = registry(dir.path());

        registry.redeem("X1");
        assert_eq!(
            registry.reserve("X1", "alice"),
            ReserveOutcome::AlreadyRedeemed
        );
    }

    #[test]
    fn test_reserve_trims_code() {
        let dir = tempdir().expect("tempdir");
        let registry = registry(dir.path());

        assert_eq!(registry.reserve("  X1 ", "alice"), ReserveOutcome::Reserved);
        assert_eq!(
            registry.reserve("X1", "bob"),
            ReserveOutcome::ReservedByOther("alice".to_string())
        );
    }
}
