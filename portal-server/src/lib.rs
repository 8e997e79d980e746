//! Voucher Portal Server - 收银员兑换码门户服务端
//!
//! # 架构概述
//!
//! 本模块是 Portal Server 的主入口，提供以下核心功能：
//!
//! - **兑换核心** (`vouchers`): 兑换码注册表、预留仲裁、兑换协调与台账持久化
//! - **认证** (`auth`): JWT 会话 + Cookie 传输
//! - **统计** (`stats`): 按收银员持久化的兑换计数
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! portal-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 会话、Cookie、中间件
//! ├── vouchers/      # 兑换码核心 (注册表/预留/兑换/台账)
//! ├── stats/         # 收银员兑换计数
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod stats;
pub mod utils;
pub mod vouchers;

// Re-export 公共类型
pub use auth::{CurrentCashier, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ____             __        __
   / __ \____  _____/ /_____ _/ /
  / /_/ / __ \/ ___/ __/ __ `/ /
 / ____/ /_/ / /  / /_/ /_/ / /
/_/    \____/_/   \__/\__,_/_/
    "#
    );
}
