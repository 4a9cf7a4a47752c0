//! 设备接入
//!
//! 负责与安防设备的 HTTP API 通信，把设备报文解码为领域描述与读数。
//!
//! ```text
//! ┌──────────────┐   GET api/info        ┌──────────────────┐
//! │ PollScheduler│ ───────────────────▶ │ HttpDeviceClient │ ──▶ 设备
//! │ (kx-poller)  │ ◀─────────────────── │  (DeviceSource)  │
//! └──────────────┘   DeviceDescriptor    └──────────────────┘
//! ```
//!
//! 所有接口响应均为 `{ "data": ... }` 外层结构。

pub mod client;
pub mod error;
pub mod types;

pub use client::{DeviceSource, HttpDeviceClient};
pub use error::DeviceError;
pub use types::{DOORLOCKS_PATH, DeviceTarget, INFO_PATH, SENSORS_PATH};
