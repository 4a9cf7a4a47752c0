//! 数据模型
//!
//! 定义存储相关的数据模型：
//! - 配置模型：直接使用 `domain::Configuration`
//! - 资产映射模型：AssetMappingRecord、AssetMappingWriteResult

use domain::AssetId;

/// 资产映射记录：(配置, 项目, 设备标识) → 平台资产 ID。
///
/// 同一三元组至多一条映射；映射创建后不随设备名称/地址变化而更新。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMappingRecord {
    pub configuration_id: i64,
    pub project_id: String,
    pub identifier: String,
    pub asset_id: AssetId,
}

impl AssetMappingRecord {
    pub fn new(
        configuration_id: i64,
        project_id: impl Into<String>,
        identifier: impl Into<String>,
        asset_id: AssetId,
    ) -> Self {
        Self {
            configuration_id,
            project_id: project_id.into(),
            identifier: identifier.into(),
            asset_id,
        }
    }

    /// 映射键。
    pub fn key(&self) -> AssetMappingKey {
        AssetMappingKey {
            configuration_id: self.configuration_id,
            project_id: self.project_id.clone(),
            identifier: self.identifier.clone(),
        }
    }
}

/// 映射键（三元组）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetMappingKey {
    pub configuration_id: i64,
    pub project_id: String,
    pub identifier: String,
}

/// 映射写入结果。
///
/// `inserted = false` 表示同一三元组已存在且资产 ID 相同（幂等写入）。
#[derive(Debug, Clone)]
pub struct AssetMappingWriteResult {
    pub record: AssetMappingRecord,
    pub inserted: bool,
}
