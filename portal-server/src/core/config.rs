use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置 - 门户服务端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/portal | 工作目录 (台账、统计、兑换码文件) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | CODES | (无) | 内联兑换码列表 (逗号分隔，最高优先级) |
/// | CODES_FILE | WORK_DIR/codes.csv | 按行分隔的兑换码文件 |
/// | RESERVE_TTL_SECS | 120 | 预留有效期 (秒) |
/// | CASHIER_ID | test | 收银员账号 |
/// | CASHIER_PIN | 1234 | 收银员 PIN |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/portal CODES=A1,A2,A3 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储台账、统计等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 内联兑换码列表 (逗号分隔)，优先于文件来源
    pub codes_inline: Option<String>,
    /// 兑换码文件路径 (未设置时使用 work_dir/codes.csv)
    pub codes_file: Option<String>,
    /// 预留有效期 (秒)
    pub reserve_ttl_secs: u64,
    /// 收银员凭证 (MVP: 单一账号，凭证强度不在范围内)
    pub cashier_id: String,
    pub cashier_pin: String,
    /// JWT 会话配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
}

/// 台账文件名 (已兑换集合)
pub const LEDGER_FILE: &str = "redeemed.json";
/// 统计文件名 (按收银员计数)
pub const STATS_FILE: &str = "stats.json";
/// 默认兑换码文件名
pub const CODES_FILE: &str = "codes.csv";

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/portal".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            codes_inline: std::env::var("CODES").ok().filter(|v| !v.trim().is_empty()),
            codes_file: std::env::var("CODES_FILE").ok(),
            reserve_ttl_secs: std::env::var("RESERVE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
            cashier_id: std::env::var("CASHIER_ID").unwrap_or_else(|_| "test".into()),
            cashier_pin: std::env::var("CASHIER_PIN").unwrap_or_else(|_| "1234".into()),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 确保工作目录存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)
    }

    /// 台账文件路径 (work_dir/redeemed.json)
    pub fn ledger_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(LEDGER_FILE)
    }

    /// 统计文件路径 (work_dir/stats.json)
    pub fn stats_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(STATS_FILE)
    }

    /// 兑换码文件路径
    pub fn codes_path(&self) -> PathBuf {
        match &self.codes_file {
            Some(p) => PathBuf::from(p),
            None => PathBuf::from(&self.work_dir).join(CODES_FILE),
        }
    }

    /// 预留有效期
    pub fn reserve_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.reserve_ttl_secs as i64)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
