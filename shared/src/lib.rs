//! Shared types for the voucher portal
//!
//! Common request/response types exchanged between the portal server
//! and its clients (cashier terminals).

pub mod client;
pub mod voucher;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, SessionInfo};
pub use voucher::{
    RedeemRequest, RedeemResponse, ReserveRequest, ReserveResponse, ResetResponse,
    ValidateRequest, ValidateResponse,
};
