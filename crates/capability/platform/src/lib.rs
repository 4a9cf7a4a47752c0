//! 资产管理平台对接
//!
//! 只实现轮询需要的最小契约：资产 upsert 与最新读数写入。

pub mod client;
pub mod error;
pub mod types;

pub use client::{AssetPlatform, HttpAssetPlatform, PlatformSettings};
pub use error::PlatformError;
pub use types::{AssetData, AssetUpsert, DataSubtype};
