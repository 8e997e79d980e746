//! 认证模块 - JWT 会话与 Cookie 传输
//!
//! 核心不做身份认证，只消费会话层给出的收银员标识；
//! 本模块即该会话层：登录签发令牌，中间件验证并注入 [`CurrentCashier`]。

pub mod cookie;
pub mod jwt;
pub mod middleware;

pub use cookie::{build_clear_cookie, build_session_cookie, SESSION_COOKIE};
pub use jwt::{Claims, CurrentCashier, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
