use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::error::Result;
use crate::core::Config;
use crate::stats::CashierStats;
use crate::vouchers::{CodeSources, LedgerStore, VoucherRegistry};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是门户服务端的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | registry | Arc<VoucherRegistry> | 兑换码注册表 (权威内存视图) |
/// | stats | CashierStats | 收银员兑换计数 (持久化) |
/// | jwt_service | Arc<JwtService> | JWT 会话服务 |
/// | epoch | String | 进程实例标识 (每次启动生成) |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 兑换码注册表
    pub registry: Arc<VoucherRegistry>,
    /// 收银员兑换计数
    pub stats: CashierStats,
    /// JWT 会话服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 进程实例标识 - 每次启动生成
    ///
    /// 预留不跨进程持久化，客户端可借此察觉服务端重启
    pub epoch: String,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录 (确保存在)
    /// 2. 台账存储 (work_dir/redeemed.json)
    /// 3. 注册表加载 + 台账对账
    /// 4. 统计、JWT 服务
    pub fn initialize(config: &Config) -> Result<Self> {
        // 0. Ensure work_dir exists
        config.ensure_work_dir_structure()?;

        // 1. Ledger store + registry
        let ledger = LedgerStore::new(config.ledger_path());
        let sources = CodeSources {
            inline: config.codes_inline.clone(),
            file: Some(config.codes_path()),
        };
        let registry = Arc::new(VoucherRegistry::new(sources, ledger, config.reserve_ttl()));
        let count = registry.load();
        tracing::info!(codes = count, "Voucher registry loaded");

        // 2. Services
        let stats = CashierStats::new(config.stats_path());
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let epoch = uuid::Uuid::new_v4().to_string();
        tracing::info!(epoch = %epoch, "Server state initialized with new epoch");

        Ok(Self {
            config: config.clone(),
            registry,
            stats,
            jwt_service,
            epoch,
        })
    }

    /// 获取注册表
    pub fn registry(&self) -> &Arc<VoucherRegistry> {
        &self.registry
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 获取进程实例标识
    pub fn epoch(&self) -> &str {
        &self.epoch
    }
}
