//! 资产注册表：(配置, 项目, 设备标识) → 平台资产 ID

use crate::error::PollError;
use domain::AssetId;
use kx_config::MappingConflictPolicy;
use kx_storage::{AssetMappingRecord, AssetMappingStore, StorageError, StorageErrorKind};
use std::sync::Arc;
use tracing::{info, warn};

/// 资产注册表
///
/// 查不到映射返回 `Ok(None)`，由调用方据此创建资产；查询失败才返回错误。
#[derive(Clone)]
pub struct AssetRegistry {
    store: Arc<dyn AssetMappingStore>,
    conflict_policy: MappingConflictPolicy,
}

impl AssetRegistry {
    pub fn new(store: Arc<dyn AssetMappingStore>) -> Self {
        Self::with_policy(store, MappingConflictPolicy::LastWriteWins)
    }

    pub fn with_policy(
        store: Arc<dyn AssetMappingStore>,
        conflict_policy: MappingConflictPolicy,
    ) -> Self {
        Self {
            store,
            conflict_policy,
        }
    }

    pub async fn find_asset_id(
        &self,
        configuration_id: i64,
        project_id: &str,
        identifier: &str,
    ) -> Result<Option<AssetId>, PollError> {
        let record = self
            .store
            .find_asset_mapping(configuration_id, project_id, identifier)
            .await
            .map_err(persistence)?;
        Ok(record.map(|record| record.asset_id))
    }

    /// 记录映射。
    ///
    /// 相同资产 ID 的重复记录视为成功；不同资产 ID 按冲突策略覆盖或拒绝。
    pub async fn record_asset(
        &self,
        configuration_id: i64,
        project_id: &str,
        identifier: &str,
        asset_id: AssetId,
    ) -> Result<(), PollError> {
        let record = AssetMappingRecord::new(configuration_id, project_id, identifier, asset_id);
        let err = match self.store.insert_asset_mapping(record.clone()).await {
            Ok(written) => {
                if !written.inserted {
                    info!(
                        target: "kx.poller",
                        configuration_id,
                        project_id = %project_id,
                        identifier = %identifier,
                        asset_id = %asset_id,
                        "asset_mapping_duplicate_ignored"
                    );
                }
                return Ok(());
            }
            Err(err) => err,
        };
        if err.kind() != StorageErrorKind::Conflict {
            return Err(persistence(err));
        }

        match self.conflict_policy {
            MappingConflictPolicy::Reject => {
                warn!(
                    target: "kx.poller",
                    configuration_id,
                    project_id = %project_id,
                    identifier = %identifier,
                    asset_id = %asset_id,
                    policy = "reject",
                    "asset_mapping_conflict"
                );
                Err(PollError::Conflict(err.message().to_string()))
            }
            MappingConflictPolicy::LastWriteWins => {
                let previous = self
                    .store
                    .replace_asset_mapping(record)
                    .await
                    .map_err(persistence)?;
                warn!(
                    target: "kx.poller",
                    configuration_id,
                    project_id = %project_id,
                    identifier = %identifier,
                    asset_id = %asset_id,
                    previous_asset_id = ?previous.map(AssetId::value),
                    policy = "last_write_wins",
                    "asset_mapping_conflict"
                );
                Ok(())
            }
        }
    }
}

/// 映射存储的任何失败都按持久化错误处理（查不到不会走到这里）。
fn persistence(err: StorageError) -> PollError {
    PollError::Persistence(err.to_string())
}
