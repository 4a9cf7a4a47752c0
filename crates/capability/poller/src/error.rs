//! 轮询错误分类
//!
//! 设备、平台、存储三类协作方的错误在这里归一，调度器只按分类记录日志。

use kx_device::DeviceError;
use kx_platform::PlatformError;
use kx_storage::{StorageError, StorageErrorKind};

/// 轮询错误
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// 设备或平台不可达、超时、拒绝请求
    #[error("transport error: {0}")]
    Transport(String),

    /// 设备报文格式错误
    #[error("decode error: {0}")]
    Decode(String),

    /// 配置或父资产映射不存在
    #[error("not found: {0}")]
    NotFound(String),

    /// 本地存储读写失败
    #[error("persistence error: {0}")]
    Persistence(String),

    /// 同一映射键被记录为不同资产
    #[error("conflict: {0}")]
    Conflict(String),
}

impl PollError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
            Self::NotFound(_) => "not_found",
            Self::Persistence(_) => "persistence",
            Self::Conflict(_) => "conflict",
        }
    }
}

impl From<DeviceError> for PollError {
    fn from(err: DeviceError) -> Self {
        match err {
            DeviceError::Transport(message) => Self::Transport(message),
            DeviceError::Decode(message) => Self::Decode(message),
        }
    }
}

impl From<PlatformError> for PollError {
    fn from(err: PlatformError) -> Self {
        Self::Transport(format!("platform: {err}"))
    }
}

impl From<StorageError> for PollError {
    fn from(err: StorageError) -> Self {
        match err.kind() {
            StorageErrorKind::NotFound => Self::NotFound(err.message().to_string()),
            StorageErrorKind::Conflict => Self::Conflict(err.message().to_string()),
            StorageErrorKind::Backend => Self::Persistence(err.message().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_kinds_map_to_poll_errors() {
        assert!(matches!(
            PollError::from(StorageError::not_found("cfg 9")),
            PollError::NotFound(_)
        ));
        assert!(matches!(
            PollError::from(StorageError::conflict("AC-1")),
            PollError::Conflict(_)
        ));
        assert!(matches!(
            PollError::from(StorageError::new("pool closed")),
            PollError::Persistence(_)
        ));
    }

    #[test]
    fn platform_errors_are_transport() {
        let err = PollError::from(PlatformError::Rejected {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(err.kind(), "transport");
        assert_eq!(PollError::from(DeviceError::Decode("x".into())).kind(), "decode");
    }
}
