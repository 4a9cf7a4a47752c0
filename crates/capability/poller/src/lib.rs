//! # KX Poller
//!
//! 安防设备轮询：在途去重、按设备类型分发、资产幂等发现、激活状态边沿写入、读数上报。
//!
//! ```text
//! driver ──poll_once──▶ PollScheduler ──▶ ConfigurationActivation ──▶ ConfigurationStore
//!                            │
//!                            ├──▶ DeviceSource（设备描述 / 门锁 / 读数）
//!                            └──▶ AssetSynchronizer ──▶ AssetRegistry ──▶ AssetMappingStore
//!                                        └──▶ AssetPlatform
//! ```

pub mod activation;
pub mod error;
pub mod in_flight;
pub mod registry;
pub mod scheduler;
pub mod synchronizer;

pub use activation::ConfigurationActivation;
pub use error::PollError;
pub use in_flight::{InFlightPermit, InFlightSet};
pub use registry::AssetRegistry;
pub use scheduler::{PollOutcome, PollScheduler, SchedulerDeps};
pub use synchronizer::{
    AssetDescriptor, AssetSynchronizer, ProjectAsset, SubDeviceAssets, device_info_attributes,
};
