//! 配置内存存储实现
//!
//! 功能：
//! - 配置读取（按 id 排序）
//! - 存活状态写入
//! - 测试辅助：插入、修改、删除配置，统计 `active` 写入次数

use crate::error::StorageError;
use crate::traits::ConfigurationStore;
use domain::{Configuration, DefaultOn};
use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// 配置内存存储
///
/// 使用 RwLock + BTreeMap 提供线程安全的内存存储。
pub struct InMemoryConfigurationStore {
    configurations: RwLock<BTreeMap<i64, Configuration>>,
    active_writes: AtomicU64,
}

impl InMemoryConfigurationStore {
    /// 创建空的配置存储
    pub fn new() -> Self {
        Self {
            configurations: RwLock::new(BTreeMap::new()),
            active_writes: AtomicU64::new(0),
        }
    }

    /// 以给定配置初始化
    pub fn with_configurations(configurations: Vec<Configuration>) -> Self {
        let store = Self::new();
        for configuration in configurations {
            store.upsert(configuration);
        }
        store
    }

    /// 插入或整体替换配置（模拟配置 API 的写入）
    pub fn upsert(&self, configuration: Configuration) {
        if let Ok(mut map) = self.configurations.write() {
            map.insert(configuration.id, configuration);
        }
    }

    /// 修改期望状态（模拟配置 API 的启用/停用）
    pub fn set_enabled(&self, id: i64, enabled: bool) -> bool {
        match self.configurations.write() {
            Ok(mut map) => match map.get_mut(&id) {
                Some(configuration) => {
                    configuration.enable = DefaultOn::set(enabled);
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    /// 删除配置
    pub fn remove(&self, id: i64) -> Option<Configuration> {
        self.configurations
            .write()
            .ok()
            .and_then(|mut map| map.remove(&id))
    }

    /// `set_active` 实际写入次数（不含 `set_all_inactive`）
    pub fn active_writes(&self) -> u64 {
        self.active_writes.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryConfigurationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ConfigurationStore for InMemoryConfigurationStore {
    async fn list_configurations(&self) -> Result<Vec<Configuration>, StorageError> {
        let map = self
            .configurations
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(map.values().cloned().collect())
    }

    async fn find_configuration(&self, id: i64) -> Result<Option<Configuration>, StorageError> {
        let map = self
            .configurations
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(map.get(&id).cloned())
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<u64, StorageError> {
        let mut map = self
            .configurations
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let Some(configuration) = map.get_mut(&id) else {
            return Ok(0);
        };
        configuration.active = DefaultOn::set(active);
        self.active_writes.fetch_add(1, Ordering::Relaxed);
        Ok(1)
    }

    async fn set_all_inactive(&self) -> Result<u64, StorageError> {
        let mut map = self
            .configurations
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        for configuration in map.values_mut() {
            configuration.active = DefaultOn::set(false);
        }
        Ok(map.len() as u64)
    }
}
