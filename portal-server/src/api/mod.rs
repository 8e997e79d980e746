//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口 (登录/登出/会话)
//! - [`vouchers`] - 兑换码接口 (校验/预留/兑换/重置)

pub mod auth;
pub mod health;
pub mod vouchers;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
