//! Authentication Handlers
//!
//! Handles cashier login, logout, and session retrieval

use std::time::Duration;

use axum::{extract::State, response::IntoResponse, Extension, Json};
use http::header;

use crate::auth::{build_clear_cookie, build_session_cookie, CurrentCashier};
use crate::core::ServerState;
use crate::AppError;

// Re-use shared DTOs for API consistency
use shared::client::{LoginRequest, LoginResponse, SessionInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login handler
///
/// Checks the cashier credential pair and sets the session cookie.
/// Credential strength is out of scope: a single configured id/pin pair,
/// unified error message on any mismatch.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Fixed delay to keep the failure path timing-flat
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let config = &state.config;
    if req.cashier_id != config.cashier_id || req.pin != config.cashier_pin {
        tracing::warn!(cashier_id = %req.cashier_id, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(&req.cashier_id)
        .map_err(|e| AppError::internal(format!("Failed to generate session token: {}", e)))?;

    let processed_count = state.stats.count(&req.cashier_id);

    tracing::info!(cashier_id = %req.cashier_id, "Cashier logged in");

    let cookie = build_session_cookie(&token, config.is_production());
    let response = LoginResponse {
        ok: true,
        cashier_id: req.cashier_id,
        processed_count,
    };

    Ok(([(header::SET_COOKIE, cookie)], Json(response)))
}

/// Get current session info
///
/// The processed count comes from the durable per-cashier counters, not the
/// session itself, so it survives re-login and server restarts.
pub async fn me(
    State(state): State<ServerState>,
    Extension(cashier): Extension<CurrentCashier>,
) -> Result<Json<SessionInfo>, AppError> {
    let processed_count = state.stats.count(&cashier.id);

    Ok(Json(SessionInfo {
        ok: true,
        cashier_id: cashier.id,
        processed_count,
    }))
}

/// Logout handler
pub async fn logout(
    Extension(cashier): Extension<CurrentCashier>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(cashier_id = %cashier.id, "Cashier logged out");

    Ok((
        [(header::SET_COOKIE, build_clear_cookie())],
        Json(serde_json::json!({ "ok": true })),
    ))
}
