//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.
//! These types are shared between portal-server and the cashier UI.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub cashier_id: String,
    pub pin: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub cashier_id: String,
    pub processed_count: u64,
}

/// Current session info (returned by `/api/auth/me`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub ok: bool,
    pub cashier_id: String,
    pub processed_count: u64,
}
