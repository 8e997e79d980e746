//! 收银员兑换计数
//!
//! 按收银员持久化的已处理计数，存储为 work_dir/stats.json 的 JSON 对象
//! (`{"cashier_id": count}`)。计数归外围协作层所有，兑换核心只在
//! 新增兑换成功时触发递增。文件缺失或损坏按空映射处理。

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

/// Durable per-cashier counters backed by a single JSON file
#[derive(Debug, Clone)]
pub struct CashierStats {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl CashierStats {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current count for a cashier (0 when unknown)
    pub fn count(&self, cashier_id: &str) -> u64 {
        if cashier_id.is_empty() {
            return 0;
        }
        let _guard = self.lock.lock();
        self.read_map().get(cashier_id).copied().unwrap_or(0)
    }

    /// Increment a cashier's count and persist the whole map
    ///
    /// Returns the new count. A failed write is logged and the new count is
    /// still returned; the next successful write will persist it.
    pub fn increment(&self, cashier_id: &str) -> u64 {
        if cashier_id.is_empty() {
            return 0;
        }
        let _guard = self.lock.lock();
        let mut map = self.read_map();
        let next = map.get(cashier_id).copied().unwrap_or(0) + 1;
        map.insert(cashier_id.to_string(), next);

        if let Err(e) = self.write_map(&map) {
            tracing::error!(
                target: "persistence",
                cashier_id = %cashier_id,
                path = %self.path.display(),
                error = %e,
                "Failed to persist cashier stats"
            );
        }
        next
    }

    /// Overwrite all counters with an empty map
    pub fn reset(&self) -> bool {
        let _guard = self.lock.lock();
        match self.write_map(&HashMap::new()) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    target: "persistence",
                    path = %self.path.display(),
                    error = %e,
                    "Failed to reset cashier stats"
                );
                false
            }
        }
    }

    fn read_map(&self) -> HashMap<String, u64> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => HashMap::new(),
        }
    }

    fn write_map(&self, map: &HashMap<String, u64>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(map)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, json)
    }
}
