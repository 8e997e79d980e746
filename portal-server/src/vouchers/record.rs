//! Voucher record model
//!
//! One record per distinct code. Records are created in bulk at registry load
//! time and never individually afterward; only a full reset returns a redeemed
//! record to active.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Voucher lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherStatus {
    Active,
    Redeemed,
}

/// One voucher record
///
/// `reserved_by`/`reserved_at` form a time-boxed soft lock: they are only
/// meaningful while the TTL has not elapsed. Expiry is evaluated lazily on
/// access; the fields are not swept in the background.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherRecord {
    /// The code itself (unique, case-sensitive)
    pub code: String,
    /// Current status
    pub status: VoucherStatus,
    /// Redemption timestamp, present iff status is Redeemed
    pub redeemed_at: Option<DateTime<Utc>>,
    /// Claimant currently holding the reservation
    pub reserved_by: Option<String>,
    /// When the reservation was taken
    pub reserved_at: Option<DateTime<Utc>>,
}

impl VoucherRecord {
    /// Create a fresh active record
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            status: VoucherStatus::Active,
            redeemed_at: None,
            reserved_by: None,
            reserved_at: None,
        }
    }

    pub fn is_redeemed(&self) -> bool {
        self.status == VoucherStatus::Redeemed
    }

    /// The claimant holding an unexpired reservation, if any
    ///
    /// An expired reservation is treated as absent regardless of whether the
    /// fields were physically cleared.
    pub fn active_reserver(&self, ttl: Duration, now: DateTime<Utc>) -> Option<&str> {
        let reserved_at = self.reserved_at?;
        if now.signed_duration_since(reserved_at) < ttl {
            self.reserved_by.as_deref()
        } else {
            None
        }
    }

    /// Take the reservation for a claimant, stamping the current time
    pub fn reserve_for(&mut self, claimant: &str, now: DateTime<Utc>) {
        self.reserved_by = Some(claimant.to_string());
        self.reserved_at = Some(now);
    }

    /// Mark as redeemed, clearing any reservation
    ///
    /// A redeemed record never carries an active reservation.
    pub fn mark_redeemed(&mut self, now: DateTime<Utc>) {
        self.status = VoucherStatus::Redeemed;
        self.redeemed_at = Some(now);
        self.clear_reservation();
    }

    pub fn clear_reservation(&mut self) {
        self.reserved_by = None;
        self.reserved_at = None;
    }

    /// Return the record to active, clearing redemption and reservation state
    pub fn reset(&mut self) {
        self.status = VoucherStatus::Active;
        self.redeemed_at = None;
        self.clear_reservation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_expiry_is_lazy() {
        let mut record = VoucherRecord::new("A1");
        let t0 = Utc::now();
        record.reserve_for("cashier-1", t0);

        let ttl = Duration::seconds(120);
        assert_eq!(record.active_reserver(ttl, t0), Some("cashier-1"));

        // Inside the window
        let t1 = t0 + Duration::seconds(119);
        assert_eq!(record.active_reserver(ttl, t1), Some("cashier-1"));

        // At and past the window the reservation reads as absent even though
        // the fields are still set
        let t2 = t0 + Duration::seconds(120);
        assert_eq!(record.active_reserver(ttl, t2), None);
        assert!(record.reserved_by.is_some());
    }

    #[test]
    fn test_mark_redeemed_clears_reservation() {
        let mut record = VoucherRecord::new("A1");
        let now = Utc::now();
        record.reserve_for("cashier-1", now);
        record.mark_redeemed(now);

        assert!(record.is_redeemed());
        assert!(record.redeemed_at.is_some());
        assert!(record.reserved_by.is_none());
        assert!(record.reserved_at.is_none());
    }

    #[test]
    fn test_reset_returns_to_active() {
        let mut record = VoucherRecord::new("A1");
        record.mark_redeemed(Utc::now());
        record.reset();

        assert_eq!(record.status, VoucherStatus::Active);
        assert!(record.redeemed_at.is_none());
    }
}
