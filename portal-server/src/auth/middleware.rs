//! 认证中间件
//!
//! 为基于 Cookie 的 JWT 会话认证提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{cookie, CurrentCashier, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::AppError;

/// 认证中间件 - 要求收银员已登录
///
/// 优先从 `session` Cookie 提取会话令牌，其次接受
/// `Authorization: Bearer <token>` 头 (便于脚本化客户端)。
/// 验证成功后将 [`CurrentCashier`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (健康检查等正常返回)
/// - `/api/auth/login` (登录接口)
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无会话 Cookie 且无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // 公共 API 路由跳过认证
    if path == "/api/auth/login" {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();

    // 先取 Cookie，再退回 Bearer 头
    let token = match cookie::extract_session_token(req.headers()) {
        Some(t) => t,
        None => {
            let bearer = req
                .headers()
                .get(http::header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(JwtService::extract_from_header);

            match bearer {
                Some(t) => t.to_string(),
                None => {
                    security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
                    return Err(AppError::unauthorized());
                }
            }
        }
    };

    // 验证令牌
    match jwt_service.validate_token(&token) {
        Ok(claims) => {
            let cashier = CurrentCashier::from(claims);
            req.extensions_mut().insert(cashier);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token()),
            }
        }
    }
}
