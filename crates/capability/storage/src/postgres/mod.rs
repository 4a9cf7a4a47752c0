//! # PostgreSQL 存储实现模块
//!
//! 生产环境使用的存储实现。
//!
//! ## 包含的实现
//!
//! - **ConfigurationStore** (`configuration.rs`)：配置读取与存活状态写入
//! - **AssetMappingStore** (`asset_mapping.rs`)：资产映射查询与写入
//!
//! ## 数据库模式要求
//!
//! - `configuration`：配置表（id, address, api_key, enable, refresh_interval,
//!   request_timeout, active, project_ids）
//! - `asset_mapping`：资产映射表（configuration_id, project_id, identifier, asset_id），
//!   `(configuration_id, project_id, identifier)` 唯一约束
//!
//! 表结构由迁移脚本维护，不在本 crate 内创建。
//!
//! ## 错误处理
//!
//! - `sqlx::Error` 自动转换为 `StorageError`
//! - 返回 `Option<T>` 表示"可能不存在"

pub mod asset_mapping;
pub mod configuration;

pub use asset_mapping::*;
pub use configuration::*;
