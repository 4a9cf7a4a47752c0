//! 集成配置：一台远端设备与若干目标项目的绑定。

/// 三态开关：`None` 表示未设置，按 `true` 处理。
///
/// `enable`（期望状态）与 `active`（观测到的存活状态）都使用该类型，
/// 读取时统一走 [`DefaultOn::get`]，避免各处自行判断缺省值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultOn(Option<bool>);

impl DefaultOn {
    pub const fn new(value: Option<bool>) -> Self {
        Self(value)
    }

    /// 显式设置的值。
    pub const fn set(value: bool) -> Self {
        Self(Some(value))
    }

    /// 未设置（按 true 处理）。
    pub const fn unset() -> Self {
        Self(None)
    }

    /// 生效值：未设置时为 true。
    pub fn get(self) -> bool {
        self.0.unwrap_or(true)
    }

    /// 原始值（持久化层使用）。
    pub fn raw(self) -> Option<bool> {
        self.0
    }
}

impl From<Option<bool>> for DefaultOn {
    fn from(value: Option<bool>) -> Self {
        Self(value)
    }
}

impl From<bool> for DefaultOn {
    fn from(value: bool) -> Self {
        Self(Some(value))
    }
}

/// 集成配置记录。
///
/// `id` 由持久化层分配，之后不可变；`active` 只由激活状态管理写入，
/// 配置 API 不修改它。
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub id: i64,
    pub address: String,
    pub api_key: String,
    pub enable: DefaultOn,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub active: DefaultOn,
    pub project_ids: Vec<String>,
}

impl Configuration {
    /// 构造启用状态的配置（其余字段取默认值）。
    pub fn new(id: i64, address: impl Into<String>) -> Self {
        Self {
            id,
            address: address.into(),
            api_key: String::new(),
            enable: DefaultOn::unset(),
            refresh_interval_secs: 60,
            request_timeout_secs: 120,
            active: DefaultOn::unset(),
            project_ids: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enable.get()
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// 刷新间隔（秒），至少为 1。
    pub fn refresh_interval_secs(&self) -> u64 {
        self.refresh_interval_secs.max(1)
    }

    /// 请求超时（秒），至少为 1。
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs.max(1)
    }

    /// 打印用的 API Key（只保留末尾 4 位）。
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}
