//! 兑换码核心 - 预留与兑换协调
//!
//! # 组件
//!
//! - [`VoucherRegistry`] - 权威内存注册表 (加载、校验、台账对账)
//! - [`ReserveOutcome`] - 预留仲裁 (短时软锁，按 claimant 标识)
//! - [`RedeemOutcome`] - 兑换协调 (单次状态转移 + 台账直写)
//! - [`LedgerStore`] - 已兑换集合的持久化存储
//!
//! 注册表是唯一共享可变资源；同一兑换码上的 check-then-set 在分片锁内
//! 原子执行，不同兑换码完全并行。预留不持久化，正确性由兑换提交时的
//! 单调 Redeemed 检查保证。

pub mod ledger;
pub mod record;
pub mod redemption;
pub mod registry;
pub mod reservation;

pub use ledger::LedgerStore;
pub use record::{VoucherRecord, VoucherStatus};
pub use redemption::RedeemOutcome;
pub use registry::{CodeSources, CodeStatus, VoucherRegistry};
pub use reservation::ReserveOutcome;
