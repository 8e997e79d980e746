//! Voucher API DTOs
//!
//! Request/response types for the voucher endpoints. The response shapes are
//! the method-level contracts of the redemption core: `validate` reports
//! `{exists, redeemed}`, `reserve` adds the reservation outcome, `redeem`
//! reports `{ok, already}` and `reset` a bare success flag.

use serde::{Deserialize, Serialize};

// =============================================================================
// Voucher API DTOs
// =============================================================================

/// Validate request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub code: String,
}

/// Validate response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub exists: bool,
    pub redeemed: bool,
}

/// Reserve request (claimant comes from the session, not the body)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub code: String,
}

/// Reserve response
///
/// `reserved_by` names the cashier holding the reservation: the caller on
/// success, the conflicting cashier otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveResponse {
    pub exists: bool,
    pub redeemed: bool,
    pub reserved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_by: Option<String>,
}

/// Redeem request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemRequest {
    pub code: String,
}

/// Redeem response
///
/// `ok && !already` means this call performed the redemption;
/// `ok && already` means the code was already redeemed (idempotent success).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemResponse {
    pub ok: bool,
    pub already: bool,
}

/// Reset response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub ok: bool,
}
