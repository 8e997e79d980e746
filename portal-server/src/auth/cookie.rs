//! 会话 Cookie 传输
//!
//! 会话令牌通过名为 `session` 的 HttpOnly Cookie 传输。
//! 生产环境附加 `Secure` 标志。

use http::HeaderMap;

/// 会话 Cookie 名称
pub const SESSION_COOKIE: &str = "session";

/// 会话 Cookie 有效期 (秒, 30 天)
const SESSION_MAX_AGE_SECS: u64 = 2_592_000;

/// 构造登录成功后的 Set-Cookie 值
pub fn build_session_cookie(token: &str, secure: bool) -> String {
    let secure = if secure { "Secure; " } else { "" };
    format!(
        "{}={}; Path=/; HttpOnly; {}SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, secure, SESSION_MAX_AGE_SECS
    )
}

/// 构造清除会话的 Set-Cookie 值 (登出)
pub fn build_clear_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; Max-Age=0; SameSite=Lax",
        SESSION_COOKIE
    )
}

/// 从请求头提取会话令牌
///
/// Cookie 头可能包含多个 `name=value` 对，按 `;` 切分后取 `session`。
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(http::header::COOKIE)?.to_str().ok()?;

    for pair in cookie_header.split(';') {
        let mut parts = pair.splitn(2, '=');
        let name = parts.next()?.trim();
        if name == SESSION_COOKIE {
            let value = parts.next().unwrap_or("").trim();
            if value.is_empty() {
                return None;
            }
            return Some(value.to_string());
        }
    }

    None
}
