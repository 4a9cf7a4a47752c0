//! 设备访问错误类型定义

/// 设备访问错误
///
/// 两类错误对调度器都不是致命的：只中止当前配置的本轮周期。
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// 连接失败、超时、非成功状态码
    #[error("transport error: {0}")]
    Transport(String),

    /// 响应体不是预期的 JSON 结构
    #[error("decode error: {0}")]
    Decode(String),
}
