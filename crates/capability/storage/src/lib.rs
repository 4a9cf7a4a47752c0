//! # KX Storage 模块
//!
//! 轮询调度依赖的持久化协作方：集成配置与资产映射。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：ConfigurationStore、AssetMappingStore 异步接口
//! 2. **数据模型层** (`models.rs`)：资产映射记录与写入结果
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型（带错误分类）
//! 4. **连接管理层** (`connection.rs`)：数据库连接池管理
//! 5. **实现层**：
//!    - `in_memory/`：内存存储实现（用于测试和演示）
//!    - `postgres/`：PostgreSQL 存储实现（生产环境使用）
//!
//! ## 幂等约束
//!
//! 同一 (配置, 项目, 设备标识) 至多一条资产映射。重复写入相同资产 ID 视为成功
//! （`inserted = false`）；写入不同资产 ID 返回 `StorageErrorKind::Conflict`，
//! 是否覆盖由调用方决定（`replace_asset_mapping`）。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use kx_storage::{ConfigurationStore, PgConfigurationStore};
//!
//! let store = PgConfigurationStore::connect("postgresql://kx:kx@localhost:5432/kx").await?;
//! let configurations = store.list_configurations().await?;
//! ```

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod traits;

pub use connection::*;
pub use error::*;
pub use models::*;
pub use traits::*;

pub use in_memory::{InMemoryAssetMappingStore, InMemoryConfigurationStore};

pub use postgres::{PgAssetMappingStore, PgConfigurationStore};
