//! 存储接口 Trait 定义
//!
//! 定义轮询调度依赖的持久化接口：
//! - ConfigurationStore：集成配置读取与存活状态写入
//! - AssetMappingStore：资产映射查询与写入
//!
//! 设计原则：
//! - 所有接口返回 StorageError
//! - 查询不到返回 `Ok(None)`，与查询失败区分
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{AssetMappingRecord, AssetMappingWriteResult};
use async_trait::async_trait;
use domain::{AssetId, Configuration};

/// 集成配置存储接口
///
/// 配置的增删改由配置 API 负责，这里只暴露轮询需要的读取和 `active` 写入。
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// 列出全部配置（按 id 升序）
    async fn list_configurations(&self) -> Result<Vec<Configuration>, StorageError>;

    /// 查找指定配置
    async fn find_configuration(&self, id: i64) -> Result<Option<Configuration>, StorageError>;

    /// 写入存活状态，返回受影响行数
    async fn set_active(&self, id: i64, active: bool) -> Result<u64, StorageError>;

    /// 将全部配置标记为未激活，返回受影响行数
    async fn set_all_inactive(&self) -> Result<u64, StorageError>;
}

/// 资产映射存储接口
#[async_trait]
pub trait AssetMappingStore: Send + Sync {
    /// 查找映射
    async fn find_asset_mapping(
        &self,
        configuration_id: i64,
        project_id: &str,
        identifier: &str,
    ) -> Result<Option<AssetMappingRecord>, StorageError>;

    /// 插入映射
    ///
    /// 已存在且资产 ID 相同时返回 `inserted = false`；资产 ID 不同时返回 Conflict。
    async fn insert_asset_mapping(
        &self,
        record: AssetMappingRecord,
    ) -> Result<AssetMappingWriteResult, StorageError>;

    /// 覆盖映射，返回被覆盖的资产 ID
    async fn replace_asset_mapping(
        &self,
        record: AssetMappingRecord,
    ) -> Result<Option<AssetId>, StorageError>;

    /// 列出指定配置的全部映射
    async fn list_asset_mappings(
        &self,
        configuration_id: i64,
    ) -> Result<Vec<AssetMappingRecord>, StorageError>;
}
