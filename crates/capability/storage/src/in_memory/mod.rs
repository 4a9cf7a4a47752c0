//! 内存存储实现模块
//!
//! 用于测试和本地演示。
//!
//! 包含以下实现：
//! - ConfigurationStore: InMemoryConfigurationStore
//! - AssetMappingStore: InMemoryAssetMappingStore

pub mod asset_mapping;
pub mod configuration;

pub use asset_mapping::*;
pub use configuration::*;
