/// 资产平台调用错误
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// 平台不可达或超时
    #[error("transport error: {0}")]
    Transport(String),

    /// 平台返回非成功状态码
    #[error("rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// 平台响应无法解析
    #[error("decode error: {0}")]
    Decode(String),
}
