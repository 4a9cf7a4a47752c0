//! 资产映射内存存储实现
//!
//! 以 (配置, 项目, 标识) 三元组为键，保证每个键至多一条映射。

use crate::error::StorageError;
use crate::models::{AssetMappingKey, AssetMappingRecord, AssetMappingWriteResult};
use crate::traits::AssetMappingStore;
use domain::AssetId;
use std::collections::HashMap;
use std::sync::RwLock;

/// 资产映射内存存储
pub struct InMemoryAssetMappingStore {
    mappings: RwLock<HashMap<AssetMappingKey, AssetMappingRecord>>,
}

impl InMemoryAssetMappingStore {
    /// 创建新的映射存储
    pub fn new() -> Self {
        Self {
            mappings: RwLock::new(HashMap::new()),
        }
    }

    /// 当前映射总数
    pub fn len(&self) -> usize {
        self.mappings.read().map(|map| map.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryAssetMappingStore {
    fn default() -> Self {
        Self::new()
    }
}

fn key_of(configuration_id: i64, project_id: &str, identifier: &str) -> AssetMappingKey {
    AssetMappingKey {
        configuration_id,
        project_id: project_id.to_string(),
        identifier: identifier.to_string(),
    }
}

#[async_trait::async_trait]
impl AssetMappingStore for InMemoryAssetMappingStore {
    async fn find_asset_mapping(
        &self,
        configuration_id: i64,
        project_id: &str,
        identifier: &str,
    ) -> Result<Option<AssetMappingRecord>, StorageError> {
        let map = self
            .mappings
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(map
            .get(&key_of(configuration_id, project_id, identifier))
            .cloned())
    }

    async fn insert_asset_mapping(
        &self,
        record: AssetMappingRecord,
    ) -> Result<AssetMappingWriteResult, StorageError> {
        let mut map = self
            .mappings
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let key = record.key();
        if let Some(existing) = map.get(&key) {
            if existing.asset_id != record.asset_id {
                return Err(StorageError::conflict(format!(
                    "asset mapping exists for {}/{}/{} with asset {}",
                    key.configuration_id, key.project_id, key.identifier, existing.asset_id
                )));
            }
            return Ok(AssetMappingWriteResult {
                record: existing.clone(),
                inserted: false,
            });
        }
        map.insert(key, record.clone());
        Ok(AssetMappingWriteResult {
            record,
            inserted: true,
        })
    }

    async fn replace_asset_mapping(
        &self,
        record: AssetMappingRecord,
    ) -> Result<Option<AssetId>, StorageError> {
        let mut map = self
            .mappings
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let previous = map.insert(record.key(), record);
        Ok(previous.map(|item| item.asset_id))
    }

    async fn list_asset_mappings(
        &self,
        configuration_id: i64,
    ) -> Result<Vec<AssetMappingRecord>, StorageError> {
        let map = self
            .mappings
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut items: Vec<AssetMappingRecord> = map
            .values()
            .filter(|item| item.configuration_id == configuration_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.project_id
                .cmp(&b.project_id)
                .then_with(|| a.identifier.cmp(&b.identifier))
        });
        Ok(items)
    }
}
