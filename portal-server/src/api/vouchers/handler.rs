//! Voucher Handlers
//!
//! Thin HTTP adapters over the registry; all semantics live in the vouchers
//! core. Expected conditions (unknown code, already redeemed, reservation
//! conflict) are typed results, never HTTP errors.

use axum::{extract::State, Extension, Json};

use crate::auth::CurrentCashier;
use crate::core::ServerState;
use crate::vouchers::{CodeStatus, RedeemOutcome, ReserveOutcome};

// Re-use shared DTOs for API consistency
use shared::voucher::{
    RedeemRequest, RedeemResponse, ReserveRequest, ReserveResponse, ResetResponse,
    ValidateRequest, ValidateResponse,
};

/// Validate handler (read-only)
pub async fn validate(
    State(state): State<ServerState>,
    Json(req): Json<ValidateRequest>,
) -> Json<ValidateResponse> {
    let response = match state.registry.validate(&req.code) {
        CodeStatus::Unknown => ValidateResponse {
            exists: false,
            redeemed: false,
        },
        CodeStatus::Active => ValidateResponse {
            exists: true,
            redeemed: false,
        },
        CodeStatus::Redeemed => ValidateResponse {
            exists: true,
            redeemed: true,
        },
    };

    Json(response)
}

/// Reserve handler
///
/// The claimant is the logged-in cashier. On success `reserved_by` echoes the
/// caller; on conflict it names the cashier holding the reservation.
pub async fn reserve(
    State(state): State<ServerState>,
    Extension(cashier): Extension<CurrentCashier>,
    Json(req): Json<ReserveRequest>,
) -> Json<ReserveResponse> {
    let response = match state.registry.reserve(&req.code, &cashier.id) {
        ReserveOutcome::NotFound => ReserveResponse {
            exists: false,
            redeemed: false,
            reserved: false,
            reserved_by: None,
        },
        ReserveOutcome::AlreadyRedeemed => ReserveResponse {
            exists: true,
            redeemed: true,
            reserved: false,
            reserved_by: None,
        },
        ReserveOutcome::ReservedByOther(holder) => {
            tracing::info!(
                cashier_id = %cashier.id,
                held_by = %holder,
                "Reservation conflict"
            );
            ReserveResponse {
                exists: true,
                redeemed: false,
                reserved: true,
                reserved_by: Some(holder),
            }
        }
        ReserveOutcome::Reserved => ReserveResponse {
            exists: true,
            redeemed: false,
            reserved: true,
            reserved_by: Some(cashier.id),
        },
    };

    Json(response)
}

/// Redeem handler
///
/// A newly performed redemption increments the cashier's durable counter;
/// the idempotent repeat does not.
pub async fn redeem(
    State(state): State<ServerState>,
    Extension(cashier): Extension<CurrentCashier>,
    Json(req): Json<RedeemRequest>,
) -> Json<RedeemResponse> {
    let response = match state.registry.redeem(&req.code) {
        RedeemOutcome::NotFound => RedeemResponse {
            ok: false,
            already: false,
        },
        RedeemOutcome::AlreadyRedeemed => RedeemResponse {
            ok: true,
            already: true,
        },
        RedeemOutcome::Redeemed => {
            let processed_count = state.stats.increment(&cashier.id);
            tracing::info!(
                cashier_id = %cashier.id,
                processed_count,
                "Voucher redeemed"
            );
            RedeemResponse {
                ok: true,
                already: false,
            }
        }
    };

    Json(response)
}

/// Reset handler (administrative)
///
/// Unconditional: every code returns to active and both the ledger and the
/// per-cashier counters are emptied. `ok` reflects only the durable writes.
pub async fn reset(
    State(state): State<ServerState>,
    Extension(cashier): Extension<CurrentCashier>,
) -> Json<ResetResponse> {
    let codes_ok = state.registry.reset_all();
    let stats_ok = state.stats.reset();

    tracing::info!(
        cashier_id = %cashier.id,
        ok = codes_ok && stats_ok,
        "Redemption state reset"
    );

    Json(ResetResponse {
        ok: codes_ok && stats_ok,
    })
}
