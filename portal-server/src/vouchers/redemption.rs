//! Redemption coordination
//!
//! The single authoritative state transition: active/reserved → redeemed,
//! written through to the durable ledger before returning.
//!
//! Redeemed status is monotonic within a reset epoch: no sequence of
//! reserve or redeem calls returns a redeemed code to active, only
//! [`VoucherRegistry::reset_all`] does.

use chrono::Utc;

use super::registry::VoucherRegistry;

/// Outcome of a redemption attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemOutcome {
    /// Code absent from the registry
    NotFound,
    /// Code was already redeemed; idempotent success, no new effect
    AlreadyRedeemed,
    /// This call performed the redemption
    Redeemed,
}

impl VoucherRegistry {
    /// Redeem a code
    ///
    /// The check-then-set runs under the record's shard lock; the ledger
    /// write happens after the lock is released so redemptions of different
    /// codes only serialize on the file write itself.
    ///
    /// A failed ledger write does not fail the operation: in-memory state
    /// already reflects the redemption. The failure is logged distinctly
    /// because after a restart the ledger would not reflect this redemption.
    pub fn redeem(&self, code: &str) -> RedeemOutcome {
        let code = code.trim();
        if code.is_empty() {
            return RedeemOutcome::NotFound;
        }

        match self.records.get_mut(code) {
            None => return RedeemOutcome::NotFound,
            Some(mut record) => {
                if record.is_redeemed() {
                    return RedeemOutcome::AlreadyRedeemed;
                }
                record.mark_redeemed(Utc::now());
            }
        }

        if let Err(e) = self.ledger.append(code) {
            tracing::error!(
                target: "persistence",
                code = %code,
                path = %self.ledger.path().display(),
                error = %e,
                "Ledger write failed; redemption held in memory only"
            );
        }

        RedeemOutcome::Redeemed
    }

    /// Reset all redemption state (administrative)
    ///
    /// Every record returns to active with redemption and reservation fields
    /// cleared; the ledger is overwritten with an empty set. The in-memory
    /// reset is unconditional; the return value reflects only whether the
    /// durable write succeeded.
    pub fn reset_all(&self) -> bool {
        for mut record in self.records.iter_mut() {
            record.reset();
        }

        match self.ledger.clear() {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    target: "persistence",
                    path = %self.ledger.path().display(),
                    error = %e,
                    "Failed to clear ledger during reset"
                );
                false
            }
        }
    }
}
